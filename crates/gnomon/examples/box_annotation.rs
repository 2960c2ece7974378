//! Example: Building an annotated document programmatically
//!
//! This example constructs a box annotation and a span in a document,
//! subscribes to change notifications, and renders the document to JSON.

use std::rc::Rc;

use gnomon::{
    ChangeEvent, ChangeObserver, DocumentBuilder, config::AppConfig,
    name::Name, value::Value,
};

#[derive(Debug)]
struct PrintObserver;

impl ChangeObserver for PrintObserver {
    fn on_change(&self, event: &ChangeEvent) {
        println!(
            "  changed {}.{}: {:?} -> {:?}",
            event.instance(),
            event.attribute(),
            event.old(),
            event.new_value()
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building document from the annotation catalog...\n");

    let builder = DocumentBuilder::new(AppConfig::default());
    let mut document = builder.new_document();

    // A box anchored to the frame on three sides, with an explicit bottom.
    let box_id = document.create(
        "BoxAnnotation",
        [
            (Name::new("bottom"), Value::Float(0.0)),
            (Name::new("fill_color"), Value::Str("#fff9ba".into())),
            (Name::new("fill_alpha"), Value::Float(0.6)),
        ],
    )?;
    document.add_root(box_id)?;

    // A vertical marker line.
    let span_id = document.create(
        "Span",
        [
            (Name::new("location"), Value::Float(42.0)),
            (Name::new("dimension"), Value::Str("height".into())),
        ],
    )?;
    document.add_root(span_id)?;

    // Watch interactive edits.
    document.subscribe(Rc::new(PrintObserver));
    println!("Editing:");
    document.set(box_id, "fill_alpha", Value::Float(0.3))?;
    document.set(span_id, "location", Value::Float(47.5))?;

    let json = builder.render_json(&document)?;
    println!("\nSerialized document ({} instances):\n{json}", document.len());

    Ok(())
}
