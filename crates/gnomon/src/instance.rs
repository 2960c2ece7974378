//! Constructed model instances.

use std::{fmt, rc::Rc};

use indexmap::IndexMap;

use gnomon_core::{id::ModelId, name::Name, value::Value};

use crate::schema::ModelClass;

/// A concrete, mutable object conforming to a [`ModelClass`] schema.
///
/// An instance holds one resolved value per descriptor reachable from its
/// class, in the class's linearized attribute order, and is identified by a
/// document-unique [`ModelId`]. Mutation goes through
/// [`Document::set`](crate::document::Document::set), which re-runs
/// coercion and validation and notifies observers.
#[derive(Debug, Clone)]
pub struct ModelInstance {
    id: ModelId,
    class: Rc<ModelClass>,
    values: IndexMap<Name, Value>,
}

impl ModelInstance {
    pub(crate) fn new(id: ModelId, class: Rc<ModelClass>, values: IndexMap<Name, Value>) -> Self {
        Self { id, class, values }
    }

    /// The instance's document-unique id.
    pub fn id(&self) -> ModelId {
        self.id
    }

    /// The instance's class.
    pub fn class(&self) -> &Rc<ModelClass> {
        &self.class
    }

    /// The instance's class name.
    pub fn class_name(&self) -> Name {
        self.class.name()
    }

    /// Returns the value of the named attribute, or `None` for a name the
    /// class does not resolve.
    pub fn value(&self, name: Name) -> Option<&Value> {
        self.values.get(&name)
    }

    /// Iterates `(attribute, value)` pairs in the class's attribute order.
    pub fn values(&self) -> impl Iterator<Item = (Name, &Value)> {
        self.values.iter().map(|(name, value)| (*name, value))
    }

    /// Collects the instance references held by this instance's attribute
    /// values, including references inside sequence values.
    pub fn references(&self) -> Vec<(Name, ModelId)> {
        let mut refs = Vec::new();
        for (name, value) in &self.values {
            collect_refs(value, *name, &mut refs);
        }
        refs
    }

    /// Stores a resolved value, returning the previous one.
    ///
    /// The caller (the document) has already run coercion and validation.
    pub(crate) fn assign(&mut self, name: Name, value: Value) -> Value {
        self.values
            .insert(name, value)
            .expect("assigned attribute was resolved against the class")
    }
}

impl fmt::Display for ModelInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.class_name(), self.id)
    }
}

fn collect_refs(value: &Value, name: Name, out: &mut Vec<(Name, ModelId)>) {
    match value {
        Value::Ref(id) => out.push((name, *id)),
        Value::List(items) => {
            for item in items {
                collect_refs(item, name, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::ModelRegistry;

    use super::*;

    fn sample_instance() -> ModelInstance {
        let registry = ModelRegistry::new();
        let class = ModelClass::build("Probe").build(&registry).unwrap();

        let mut values = IndexMap::new();
        values.insert(Name::new("location"), Value::Float(4.0));
        values.insert(Name::new("edge"), Value::Ref(ModelId::reserve(77)));
        values.insert(
            Name::new("trail"),
            Value::List(vec![
                Value::Float(1.0),
                Value::Ref(ModelId::reserve(78)),
            ]),
        );

        ModelInstance::new(ModelId::next(), class, values)
    }

    #[test]
    fn test_value_lookup() {
        let instance = sample_instance();

        assert_eq!(
            instance.value(Name::new("location")),
            Some(&Value::Float(4.0))
        );
        assert_eq!(instance.value(Name::new("missing")), None);
    }

    #[test]
    fn test_references_walk_lists() {
        let instance = sample_instance();
        let refs = instance.references();

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0], (Name::new("edge"), ModelId::reserve(77)));
        assert_eq!(refs[1], (Name::new("trail"), ModelId::reserve(78)));
    }

    #[test]
    fn test_assign_returns_old_value() {
        let mut instance = sample_instance();

        let old = instance.assign(Name::new("location"), Value::Float(9.0));
        assert_eq!(old, Value::Float(4.0));
        assert_eq!(
            instance.value(Name::new("location")),
            Some(&Value::Float(9.0))
        );
    }

    #[test]
    fn test_display() {
        let instance = sample_instance();
        let rendered = instance.to_string();
        assert!(rendered.starts_with("Probe(p"));
    }
}
