//! Change notification for attribute assignments.
//!
//! The rendering/interaction layer registers a [`ChangeObserver`] on a
//! document and is called synchronously, after the assignment commits and
//! before the triggering call returns. Observers receive the event by shared
//! reference and hold no document handle, so they cannot re-enter mutation.

use gnomon_core::{id::ModelId, name::Name, value::Value};

/// A committed attribute assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    instance: ModelId,
    attribute: Name,
    old: Value,
    new: Value,
}

impl ChangeEvent {
    pub(crate) fn new(instance: ModelId, attribute: Name, old: Value, new: Value) -> Self {
        Self {
            instance,
            attribute,
            old,
            new,
        }
    }

    /// The mutated instance's id.
    pub fn instance(&self) -> ModelId {
        self.instance
    }

    /// The assigned attribute.
    pub fn attribute(&self) -> Name {
        self.attribute
    }

    /// The value before the assignment.
    pub fn old(&self) -> &Value {
        &self.old
    }

    /// The value after the assignment.
    pub fn new_value(&self) -> &Value {
        &self.new
    }
}

/// A consumer of committed attribute assignments.
pub trait ChangeObserver: std::fmt::Debug {
    /// Called synchronously for every committed assignment.
    fn on_change(&self, event: &ChangeEvent);
}
