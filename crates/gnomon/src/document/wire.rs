//! The flat wire representation of a document.
//!
//! A serialized document is a version tag, the root ids, and a flat list of
//! instance records `{id, class, attributes}`. Attribute values that are
//! instance references are emitted as `{"ref": id}` tokens; every other
//! value maps directly onto JSON. Attribute names are the resolved
//! (prefixed, overridden) names from the class schema.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use gnomon_core::{id::ModelId, name::Name, value::Value};

use crate::document::DocumentError;

/// The wire format version this build reads and writes.
pub const WIRE_VERSION: u32 = 1;

/// A `{"ref": id}` reference token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefToken {
    #[serde(rename = "ref")]
    id: ModelId,
}

impl RefToken {
    /// The referenced instance id.
    pub fn id(self) -> ModelId {
        self.id
    }
}

/// A wire attribute value.
///
/// The untagged representation matches plain JSON: booleans, numbers,
/// strings, arrays, `null`, and `{"ref": id}` objects for instance
/// references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    Ref(RefToken),
    Bool(bool),
    Float(f64),
    Str(String),
    List(Vec<WireValue>),
    Null,
}

impl From<&Value> for WireValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => WireValue::Null,
            Value::Bool(flag) => WireValue::Bool(*flag),
            Value::Float(number) => WireValue::Float(*number),
            Value::Str(text) => WireValue::Str(text.clone()),
            Value::List(items) => WireValue::List(items.iter().map(WireValue::from).collect()),
            Value::Ref(id) => WireValue::Ref(RefToken { id: *id }),
        }
    }
}

impl From<&WireValue> for Value {
    fn from(value: &WireValue) -> Self {
        match value {
            WireValue::Null => Value::Null,
            WireValue::Bool(flag) => Value::Bool(*flag),
            WireValue::Float(number) => Value::Float(*number),
            WireValue::Str(text) => Value::Str(text.clone()),
            WireValue::List(items) => Value::List(items.iter().map(Value::from).collect()),
            WireValue::Ref(token) => Value::Ref(token.id()),
        }
    }
}

/// One serialized instance record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceData {
    id: ModelId,
    class: Name,
    attributes: IndexMap<Name, WireValue>,
}

impl InstanceData {
    pub fn new(id: ModelId, class: Name, attributes: IndexMap<Name, WireValue>) -> Self {
        Self {
            id,
            class,
            attributes,
        }
    }

    /// The instance id.
    pub fn id(&self) -> ModelId {
        self.id
    }

    /// The class name.
    pub fn class(&self) -> Name {
        self.class
    }

    /// The serialized attribute values, in resolved attribute order.
    pub fn attributes(&self) -> &IndexMap<Name, WireValue> {
        &self.attributes
    }
}

/// A complete serialized document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentData {
    version: u32,
    roots: Vec<ModelId>,
    instances: Vec<InstanceData>,
}

impl DocumentData {
    pub fn new(roots: Vec<ModelId>, instances: Vec<InstanceData>) -> Self {
        Self {
            version: WIRE_VERSION,
            roots,
            instances,
        }
    }

    /// The wire format version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The root instance ids.
    pub fn roots(&self) -> &[ModelId] {
        &self.roots
    }

    /// The instance records, in emission order.
    pub fn instances(&self) -> &[InstanceData] {
        &self.instances
    }

    /// Renders this document as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Json`] on encoding failure.
    pub fn to_json(&self, pretty: bool) -> Result<String, DocumentError> {
        let rendered = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(rendered)
    }

    /// Parses a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Json`] on malformed input.
    pub fn from_json(source: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(source)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_value_round_trip() {
        let values = vec![
            Value::Null,
            Value::Bool(true),
            Value::Float(0.4),
            Value::Str("#fff9ba".into()),
            Value::List(vec![Value::Float(1.0), Value::Ref(ModelId::reserve(5))]),
            Value::Ref(ModelId::reserve(6)),
        ];

        for value in values {
            let wire = WireValue::from(&value);
            let back = Value::from(&wire);
            assert_eq!(back, value);
        }
    }

    #[test]
    fn test_ref_token_json_shape() {
        let wire = WireValue::Ref(RefToken {
            id: ModelId::reserve(12),
        });
        let json = serde_json::to_string(&wire).unwrap();
        assert_eq!(json, r#"{"ref":12}"#);

        let back: WireValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wire);
    }

    #[test]
    fn test_null_json_shape() {
        let json = serde_json::to_string(&WireValue::Null).unwrap();
        assert_eq!(json, "null");

        let back: WireValue = serde_json::from_str("null").unwrap();
        assert_eq!(back, WireValue::Null);
    }

    #[test]
    fn test_document_json_round_trip() {
        let mut attributes = IndexMap::new();
        attributes.insert(Name::new("visible"), WireValue::Bool(true));
        attributes.insert(
            Name::new("left"),
            WireValue::Ref(RefToken {
                id: ModelId::reserve(2),
            }),
        );

        let data = DocumentData::new(
            vec![ModelId::reserve(1)],
            vec![InstanceData::new(
                ModelId::reserve(1),
                Name::new("BoxAnnotation"),
                attributes,
            )],
        );

        let json = data.to_json(false).unwrap();
        let back = DocumentData::from_json(&json).unwrap();

        assert_eq!(back.version(), WIRE_VERSION);
        assert_eq!(back.roots(), data.roots());
        assert_eq!(back.instances().len(), 1);
        assert_eq!(back.instances()[0].class(), "BoxAnnotation");
        assert_eq!(
            back.instances()[0].attributes().get(&Name::new("left")),
            Some(&WireValue::Ref(RefToken {
                id: ModelId::reserve(2)
            }))
        );
    }

    #[test]
    fn test_empty_document_json() {
        let data = DocumentData::new(Vec::new(), Vec::new());
        let json = data.to_json(false).unwrap();
        assert_eq!(json, r#"{"version":1,"roots":[],"instances":[]}"#);

        let back = DocumentData::from_json(&json).unwrap();
        assert!(back.roots().is_empty());
        assert!(back.instances().is_empty());
    }
}
