//! CLI logic for the Gnomon document tool.
//!
//! This module contains the core CLI logic for the Gnomon document tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use gnomon::{DocumentBuilder, GnomonError};

/// Run the Gnomon CLI application
///
/// This function reads a document file, validates it against the built-in
/// model catalog, and writes the normalized document to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `GnomonError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed or invalid documents
/// - Unserializable documents (dangling references, cycles)
pub fn run(args: &Args) -> Result<(), GnomonError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing document"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Validate and normalize using the DocumentBuilder API
    let builder = DocumentBuilder::new(app_config);
    let document = builder.parse(&source)?;
    info!(instances = document.len(), roots = document.roots().len(); "Document is valid");

    let normalized = builder.render_json(&document)?;

    // Write output file
    fs::write(&args.output, normalized)?;

    info!(output_file = args.output; "Normalized document exported successfully");

    Ok(())
}
