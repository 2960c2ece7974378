//! End-to-end smoke tests for the Gnomon CLI.

use std::fs;

use tempfile::tempdir;

use gnomon::{DocumentBuilder, name::Name, value::Value};
use gnomon_cli::{Args, run};

/// Builds a small valid document JSON through the library API.
fn sample_document_json() -> String {
    let builder = DocumentBuilder::default();
    let mut document = builder.new_document();

    let box_id = document
        .create(
            "BoxAnnotation",
            [(Name::new("fill_alpha"), Value::Float(0.6))],
        )
        .expect("BoxAnnotation is a catalog class");
    document.add_root(box_id).expect("box was just created");

    builder.render_json(&document).expect("sample renders")
}

fn args(input: &std::path::Path, output: &std::path::Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_valid_document_normalizes() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("plot.json");
    let output = temp_dir.path().join("normalized.json");

    fs::write(&input, sample_document_json()).unwrap();

    run(&args(&input, &output)).expect("valid document should process");

    // The normalized output is itself a valid document.
    let normalized = fs::read_to_string(&output).unwrap();
    let builder = DocumentBuilder::default();
    let document = builder.parse(&normalized).expect("output should re-parse");
    assert_eq!(document.len(), 5, "box plus four frame-edge markers");
}

#[test]
fn e2e_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("nope.json");
    let output = temp_dir.path().join("out.json");

    let result = run(&args(&input, &output));
    assert!(result.is_err(), "missing input should fail");
}

#[test]
fn e2e_malformed_document_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("broken.json");
    let output = temp_dir.path().join("out.json");

    fs::write(&input, "{ not a document }").unwrap();

    let result = run(&args(&input, &output));
    assert!(result.is_err(), "malformed input should fail");
    assert!(!output.exists(), "no output on failure");
}

#[test]
fn e2e_invalid_attribute_value_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("invalid.json");
    let output = temp_dir.path().join("out.json");

    // line_width declares a numeric type; "red" must be rejected.
    let doc = r#"{
        "version": 1,
        "roots": [1],
        "instances": [
            {"id": 1, "class": "Span", "attributes": {"line_width": "red"}}
        ]
    }"#;
    fs::write(&input, doc).unwrap();

    let result = run(&args(&input, &output));
    assert!(result.is_err(), "type mismatch should fail");
}
