//! The model registry: group templates and built classes.

use std::rc::Rc;

use indexmap::IndexMap;
use log::debug;

use gnomon_core::name::Name;

use crate::schema::{GroupTemplate, ModelClass, SchemaError};

/// The registry of group templates and model classes.
///
/// Populated at load time — group templates first, then the classes built
/// against them — and immutable thereafter: consumers share it behind `Rc`.
/// [`ModelRegistry::builtin`] returns a registry pre-populated with the
/// standard annotation catalog.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    groups: IndexMap<&'static str, GroupTemplate>,
    classes: IndexMap<Name, Rc<ModelClass>>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an extendable registry pre-populated with the built-in
    /// catalog (style groups, frame-edge markers, annotation classes).
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        crate::catalog::install(&mut registry)
            .expect("the built-in catalog is internally consistent");
        registry
    }

    /// Returns the shared built-in registry value.
    pub fn builtin() -> Rc<Self> {
        Rc::new(Self::with_builtin())
    }

    /// Registers a group template.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateGroup`] if the name is taken.
    pub fn register_group(&mut self, template: GroupTemplate) -> Result<(), SchemaError> {
        let name = template.name();
        if self.groups.contains_key(name) {
            return Err(SchemaError::DuplicateGroup {
                group: name.to_string(),
            });
        }
        debug!(group = name; "Registering style group");
        self.groups.insert(name, template);
        Ok(())
    }

    /// Looks up a group template by name.
    pub fn group(&self, name: &str) -> Option<&GroupTemplate> {
        self.groups.get(name)
    }

    /// Registers a built class.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateClass`] if the name is taken.
    pub fn register_class(&mut self, class: &Rc<ModelClass>) -> Result<(), SchemaError> {
        let name = class.name();
        if self.classes.contains_key(&name) {
            return Err(SchemaError::DuplicateClass { class: name });
        }
        debug!(class = name.to_string(), attributes = class.attribute_count(); "Registering model class");
        self.classes.insert(name, Rc::clone(class));
        Ok(())
    }

    /// Looks up a class by name.
    pub fn class(&self, name: Name) -> Option<&Rc<ModelClass>> {
        self.classes.get(&name)
    }

    /// Looks up a class by name, failing with [`SchemaError::UnknownClass`].
    pub fn expect_class(&self, name: Name) -> Result<Rc<ModelClass>, SchemaError> {
        self.classes
            .get(&name)
            .cloned()
            .ok_or(SchemaError::UnknownClass { class: name })
    }

    /// Iterates the registered classes in registration order.
    pub fn classes(&self) -> impl Iterator<Item = &Rc<ModelClass>> {
        self.classes.values()
    }

    /// Iterates the registered group templates in registration order.
    pub fn groups(&self) -> impl Iterator<Item = &GroupTemplate> {
        self.groups.values()
    }
}

#[cfg(test)]
mod tests {
    use gnomon_core::{datatype::DataType, value::Value};

    use crate::property::{DefaultValue, PropertyDescriptor};

    use super::*;

    fn sample_group() -> GroupTemplate {
        GroupTemplate::new(
            "fill",
            vec![PropertyDescriptor::new(
                "fill_alpha",
                DataType::Float,
                DefaultValue::Literal(Value::Float(1.0)),
            )],
        )
    }

    #[test]
    fn test_register_and_look_up_group() {
        let mut registry = ModelRegistry::new();
        registry.register_group(sample_group()).unwrap();

        assert!(registry.group("fill").is_some());
        assert!(registry.group("line").is_none());
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let mut registry = ModelRegistry::new();
        registry.register_group(sample_group()).unwrap();

        let err = registry.register_group(sample_group()).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateGroup {
                group: "fill".to_string()
            }
        );
    }

    #[test]
    fn test_register_and_look_up_class() {
        let mut registry = ModelRegistry::new();
        let class = ModelClass::build("Marker").build(&registry).unwrap();
        registry.register_class(&class).unwrap();

        assert!(registry.class(Name::new("Marker")).is_some());
        assert!(registry.expect_class(Name::new("Marker")).is_ok());

        let err = registry.expect_class(Name::new("Ghost")).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownClass {
                class: Name::new("Ghost")
            }
        );
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let mut registry = ModelRegistry::new();
        let class = ModelClass::build("Marker").build(&registry).unwrap();
        registry.register_class(&class).unwrap();

        let err = registry.register_class(&class).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateClass { .. }));
    }

    #[test]
    fn test_builtin_registry_is_populated() {
        let registry = ModelRegistry::builtin();

        assert!(registry.group("line").is_some());
        assert!(registry.group("fill").is_some());
        assert!(registry.group("hatch").is_some());
        assert!(registry.class(Name::new("BoxAnnotation")).is_some());
        assert!(registry.class(Name::new("Span")).is_some());
    }
}
