//! Model class schemas: group templates, the class builder, and the
//! registry.
//!
//! A [`ModelClass`] is a named, immutable table of property descriptors
//! assembled from three sources, linearized in this order:
//!
//! 1. descriptors inherited from the parent class (in ancestor-defined
//!    order),
//! 2. descriptors expanded from included [`GroupTemplate`]s (renamed by
//!    prefix where one is given),
//! 3. directly declared descriptors and default overrides.
//!
//! Classes are built once at load time through [`ClassBuilder`] and are
//! immutable thereafter. The [`ModelRegistry`] holds the group templates
//! queried during building and the built classes used to resolve class
//! names during instantiation and deserialization.

mod class;
mod group;
mod registry;

pub use class::{ClassBuilder, ModelClass};
pub use group::GroupTemplate;
pub use registry::ModelRegistry;

use thiserror::Error;

use gnomon_core::{datatype::ValueError, name::Name};

/// Errors raised while building classes or populating the registry.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaError {
    #[error("name collision on `{class}.{attribute}`: the attribute is already declared")]
    NameCollision { class: Name, attribute: Name },

    #[error("unknown style group `{group}` included by `{class}`")]
    UnknownGroup { class: Name, group: String },

    #[error("override target `{attribute}` does not exist on `{class}`")]
    UnknownOverrideTarget { class: Name, attribute: Name },

    #[error("invalid default for `{class}.{attribute}`: {source}")]
    InvalidDefault {
        class: Name,
        attribute: Name,
        #[source]
        source: ValueError,
    },

    #[error("style group `{group}` is already registered")]
    DuplicateGroup { group: String },

    #[error("model class `{class}` is already registered")]
    DuplicateClass { class: Name },

    #[error("unknown model class `{class}`")]
    UnknownClass { class: Name },
}
