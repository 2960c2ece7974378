//! Model classes and the class builder.

use std::rc::Rc;

use indexmap::IndexMap;

use gnomon_core::name::Name;

use crate::property::{DefaultValue, PropertyDescriptor};
use crate::schema::{ModelRegistry, SchemaError};

/// A named, immutable schema of property descriptors.
///
/// The descriptor table is fully resolved at build time: it contains the
/// inherited, included, and direct descriptors in linearized order, with
/// overrides already applied. Lookups during instantiation never walk the
/// parent chain.
#[derive(Debug)]
pub struct ModelClass {
    name: Name,
    parent: Option<Rc<ModelClass>>,
    properties: IndexMap<Name, Rc<PropertyDescriptor>>,
}

impl ModelClass {
    /// Starts building a class with the given name.
    ///
    /// # Examples
    ///
    /// ```
    /// use gnomon::property::{DefaultValue, PropertyDescriptor};
    /// use gnomon::schema::{ModelClass, ModelRegistry};
    /// use gnomon_core::{datatype::DataType, value::Value};
    ///
    /// let registry = ModelRegistry::new();
    /// let marker = ModelClass::build("Marker")
    ///     .property(PropertyDescriptor::new(
    ///         "size",
    ///         DataType::Float,
    ///         DefaultValue::Literal(Value::Float(4.0)),
    ///     ))
    ///     .build(&registry)
    ///     .unwrap();
    ///
    /// assert_eq!(marker.name(), "Marker");
    /// assert_eq!(marker.attribute_count(), 1);
    /// ```
    pub fn build(name: &str) -> ClassBuilder {
        ClassBuilder::new(name)
    }

    /// The class name.
    pub fn name(&self) -> Name {
        self.name
    }

    /// The parent class, if any.
    pub fn parent(&self) -> Option<&Rc<ModelClass>> {
        self.parent.as_ref()
    }

    /// Looks up a resolved descriptor by attribute name.
    pub fn descriptor(&self, name: Name) -> Option<&Rc<PropertyDescriptor>> {
        self.properties.get(&name)
    }

    /// Returns true if the class resolves the given attribute name.
    pub fn has_attribute(&self, name: Name) -> bool {
        self.properties.contains_key(&name)
    }

    /// Iterates the resolved descriptors in linearized order.
    pub fn properties(&self) -> impl Iterator<Item = &Rc<PropertyDescriptor>> {
        self.properties.values()
    }

    /// Iterates the resolved attribute names in linearized order.
    pub fn attribute_names(&self) -> impl Iterator<Item = Name> + '_ {
        self.properties.keys().copied()
    }

    /// The number of resolved attributes.
    pub fn attribute_count(&self) -> usize {
        self.properties.len()
    }
}

/// A direct declaration on a class under construction.
#[derive(Debug)]
enum Declaration {
    /// A new descriptor.
    Property(PropertyDescriptor),
    /// A default replacement for an inherited or included descriptor.
    Override { name: Name, default: DefaultValue },
}

/// Builder for [`ModelClass`].
///
/// Declarations are collected and resolved by [`build`](ClassBuilder::build):
/// parent descriptors first, then included groups in declared order, then
/// direct declarations.
#[derive(Debug)]
pub struct ClassBuilder {
    name: Name,
    parent: Option<Rc<ModelClass>>,
    includes: Vec<(&'static str, Option<&'static str>)>,
    direct: Vec<Declaration>,
}

impl ClassBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: Name::new(name),
            parent: None,
            includes: Vec::new(),
            direct: Vec::new(),
        }
    }

    /// Sets the parent class. All of the parent's resolved descriptors are
    /// inherited.
    pub fn extends(mut self, parent: &Rc<ModelClass>) -> Self {
        self.parent = Some(Rc::clone(parent));
        self
    }

    /// Includes a registered group template without a prefix.
    pub fn include(mut self, group: &'static str) -> Self {
        self.includes.push((group, None));
        self
    }

    /// Includes a registered group template under a prefix; every group
    /// attribute `a` resolves as `{prefix}_{a}`.
    pub fn include_prefixed(mut self, group: &'static str, prefix: &'static str) -> Self {
        self.includes.push((group, Some(prefix)));
        self
    }

    /// Declares a descriptor directly on this class.
    pub fn property(mut self, descriptor: PropertyDescriptor) -> Self {
        self.direct.push(Declaration::Property(descriptor));
        self
    }

    /// Replaces the default of an inherited or included descriptor.
    ///
    /// This binds to the existing attribute slot: declared type, coercions,
    /// and position in the linearized order are unchanged.
    pub fn override_default(mut self, name: &str, default: DefaultValue) -> Self {
        self.direct.push(Declaration::Override {
            name: Name::new(name),
            default,
        });
        self
    }

    /// Resolves the declarations into an immutable class.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::UnknownGroup`] when an included group is not
    ///   registered.
    /// - [`SchemaError::NameCollision`] when two sources bind the same
    ///   resolved name and the later one is not an override.
    /// - [`SchemaError::UnknownOverrideTarget`] when an override names an
    ///   attribute that does not exist.
    /// - [`SchemaError::InvalidDefault`] when a literal default fails its
    ///   own declared type.
    pub fn build(self, registry: &ModelRegistry) -> Result<Rc<ModelClass>, SchemaError> {
        let mut properties: IndexMap<Name, Rc<PropertyDescriptor>> = match &self.parent {
            Some(parent) => parent.properties.clone(),
            None => IndexMap::new(),
        };

        for (group_name, prefix) in &self.includes {
            let group = registry
                .group(group_name)
                .ok_or_else(|| SchemaError::UnknownGroup {
                    class: self.name,
                    group: (*group_name).to_string(),
                })?;
            for descriptor in group.expand(*prefix) {
                Self::insert_new(&mut properties, self.name, descriptor)?;
            }
        }

        for declaration in self.direct {
            match declaration {
                Declaration::Property(descriptor) => {
                    Self::insert_new(&mut properties, self.name, descriptor)?;
                }
                Declaration::Override { name, default } => {
                    let existing = properties.get(&name).ok_or(
                        SchemaError::UnknownOverrideTarget {
                            class: self.name,
                            attribute: name,
                        },
                    )?;
                    let replacement = existing.with_default(default);
                    // IndexMap keeps the original position on re-insert, so
                    // the overridden slot stays where the ancestor put it.
                    properties.insert(name, Rc::new(replacement));
                }
            }
        }

        // Literal defaults must satisfy their own declared type.
        for (name, descriptor) in &properties {
            if let DefaultValue::Literal(value) = descriptor.default() {
                descriptor.dtype().check(value).map_err(|source| {
                    SchemaError::InvalidDefault {
                        class: self.name,
                        attribute: *name,
                        source,
                    }
                })?;
            }
        }

        Ok(Rc::new(ModelClass {
            name: self.name,
            parent: self.parent,
            properties,
        }))
    }

    fn insert_new(
        properties: &mut IndexMap<Name, Rc<PropertyDescriptor>>,
        class: Name,
        descriptor: PropertyDescriptor,
    ) -> Result<(), SchemaError> {
        let name = descriptor.name();
        if properties.contains_key(&name) {
            return Err(SchemaError::NameCollision {
                class,
                attribute: name,
            });
        }
        properties.insert(name, Rc::new(descriptor));
        Ok(())
    }
}
