//! The dynamic attribute value model.
//!
//! Every attribute on a model instance holds a [`Value`]. The variants cover
//! the vocabulary the plot-model layer needs: scalars, strings, sequences,
//! an explicit null, and non-owning references to other model instances.

use crate::id::ModelId;

/// A dynamic attribute value.
///
/// Instance references are carried by id ([`Value::Ref`]); they are relational
/// links resolved within the enclosing document, never ownership links.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The explicit "no value" sentinel accepted by nullable types.
    Null,
    Bool(bool),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    /// A reference to another model instance, by document-unique id.
    Ref(ModelId),
}

impl Value {
    /// Returns a short tag describing this value's variant, for error
    /// messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Ref(_) => "reference",
        }
    }

    /// Returns true for the null sentinel.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float payload, if this is a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the list payload, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the referenced instance id, if this is a reference.
    pub fn as_ref_id(&self) -> Option<ModelId> {
        match self {
            Value::Ref(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<ModelId> for Value {
    fn from(id: ModelId) -> Self {
        Value::Ref(id)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::List(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::Bool(true).kind(), "boolean");
        assert_eq!(Value::Float(1.5).kind(), "float");
        assert_eq!(Value::Str("red".into()).kind(), "string");
        assert_eq!(Value::List(vec![]).kind(), "list");
        assert_eq!(Value::Ref(ModelId::reserve(1)).kind(), "reference");
    }

    #[test]
    fn test_accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert_eq!(Value::Float(2.0).as_float(), Some(2.0));
        assert_eq!(Value::Str("data".into()).as_str(), Some("data"));
        assert_eq!(Value::Float(2.0).as_str(), None);

        let id = ModelId::reserve(9);
        assert_eq!(Value::Ref(id).as_ref_id(), Some(id));
        assert_eq!(Value::Null.as_ref_id(), None);
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(0.4), Value::Float(0.4));
        assert_eq!(Value::from("screen"), Value::Str("screen".into()));
        assert_eq!(
            Value::from(vec![Value::from(1.0), Value::from(2.0)]),
            Value::List(vec![Value::Float(1.0), Value::Float(2.0)])
        );
    }
}
