//! Gnomon - A declarative model layer for plot annotations and documents.
//!
//! Gnomon describes plots as graphs of typed model instances: annotation
//! classes declare validated, observable attributes through property
//! descriptors; instances live in a [`Document`] and reference each other by
//! id; the whole graph serializes to a flat JSON document for an external
//! rendering/interaction layer.

pub mod catalog;
pub mod config;
pub mod property;
pub mod schema;

mod document;
mod error;
mod instance;
mod observe;

pub use gnomon_core::{color, datatype, id, name, value};

pub use document::{Document, DocumentData, DocumentError, InstanceData, RefToken, WIRE_VERSION, WireValue};
pub use error::GnomonError;
pub use instance::ModelInstance;
pub use observe::{ChangeEvent, ChangeObserver};

use std::rc::Rc;

use log::{debug, info, trace};

use config::AppConfig;
use schema::ModelRegistry;

/// Builder for reading and writing Gnomon documents.
///
/// This pairs a model registry (the classes a document may contain) with the
/// application configuration, and moves documents between their in-memory
/// graph form and their JSON wire form.
///
/// # Examples
///
/// ```rust
/// use gnomon::{DocumentBuilder, config::AppConfig};
///
/// let builder = DocumentBuilder::default();
///
/// // Start an empty document over the built-in catalog
/// let mut document = builder.new_document();
/// let span = document.create("Span", []).expect("Span is a catalog class");
/// document.add_root(span).expect("span was just created");
///
/// // Render the document graph to JSON
/// let json = builder.render_json(&document).expect("Failed to render");
///
/// // And read it back
/// let restored = builder.parse(&json).expect("Failed to parse");
/// assert_eq!(restored.len(), document.len());
/// ```
pub struct DocumentBuilder {
    config: AppConfig,
    registry: Rc<ModelRegistry>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl DocumentBuilder {
    /// Create a new document builder over the built-in catalog.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including serialization
    ///   settings
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            registry: ModelRegistry::builtin(),
        }
    }

    /// Create a document builder over a custom registry.
    pub fn with_registry(config: AppConfig, registry: Rc<ModelRegistry>) -> Self {
        Self { config, registry }
    }

    /// The registry documents are resolved against.
    pub fn registry(&self) -> &Rc<ModelRegistry> {
        &self.registry
    }

    /// Start an empty document over this builder's registry.
    pub fn new_document(&self) -> Document {
        Document::new(Rc::clone(&self.registry))
    }

    /// Parse a JSON document into an instance graph.
    ///
    /// This decodes the wire format and performs the two-pass
    /// allocate-then-link reconstruction, validating classes, attributes,
    /// values, and references along the way.
    ///
    /// # Errors
    ///
    /// Returns [`GnomonError`] for malformed JSON, unknown classes or
    /// attributes, type mismatches, and unresolved references.
    pub fn parse(&self, source: &str) -> Result<Document, GnomonError> {
        info!("Parsing document");

        let data = DocumentData::from_json(source)?;
        let document = Document::deserialize(Rc::clone(&self.registry), &data)?;

        debug!(instances = document.len(); "Document parsed successfully");
        trace!(document:?; "Parsed document");

        Ok(document)
    }

    /// Render a document's reachable graph to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`GnomonError`] for dangling references and reference
    /// cycles.
    pub fn render_json(&self, document: &Document) -> Result<String, GnomonError> {
        info!(roots = document.roots().len(); "Serializing document");

        let serialization = self.config.serialization();
        let data = document.serialize_with(serialization)?;
        let rendered = data.to_json(serialization.pretty())?;

        info!(bytes = rendered.len(); "Document serialized successfully");
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builder_uses_builtin_catalog() {
        let builder = DocumentBuilder::default();
        assert!(builder.registry().group("line").is_some());
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let builder = DocumentBuilder::default();
        let result = builder.parse("this is not a document");
        assert!(matches!(
            result,
            Err(GnomonError::Document(DocumentError::Json(_)))
        ));
    }

    #[test]
    fn test_render_and_parse_round_trip() {
        let builder = DocumentBuilder::default();

        let mut document = builder.new_document();
        let span = document.create("Span", []).unwrap();
        document.add_root(span).unwrap();

        let json = builder.render_json(&document).unwrap();
        let restored = builder.parse(&json).unwrap();

        assert_eq!(restored.len(), document.len());
        assert_eq!(restored.roots(), document.roots());
    }
}
