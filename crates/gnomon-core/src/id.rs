//! Document-unique model instance identifiers.
//!
//! This module provides the [`ModelId`] type. Ids are assigned from a
//! process-wide monotonic counter at construction time and are never reused,
//! even after an instance is removed from its document.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use log::trace;
use serde::{Deserialize, Serialize};

/// Next id to hand out. Ids start at 1; 0 is never a valid id.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A unique identifier for a model instance.
///
/// Ids are stable for the lifetime of the process and serve as the reference
/// currency of the document graph: instance-valued attributes hold a
/// [`ModelId`], never an owning pointer.
///
/// # Examples
///
/// ```
/// use gnomon_core::id::ModelId;
///
/// let a = ModelId::next();
/// let b = ModelId::next();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(u64);

impl ModelId {
    /// Allocates the next unused id.
    pub fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Reconstructs an id from its raw value and reserves it.
    ///
    /// Used when loading a serialized document: the global counter is bumped
    /// past `raw` so ids allocated later in the process never collide with
    /// ids read from the wire.
    pub fn reserve(raw: u64) -> Self {
        let previous = NEXT_ID.fetch_max(raw + 1, Ordering::Relaxed);
        if previous <= raw {
            trace!(id = raw; "Bumped id counter past reserved wire id");
        }
        Self(raw)
    }

    /// Returns the raw numeric value of this id.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_is_unique_and_increasing() {
        let a = ModelId::next();
        let b = ModelId::next();
        let c = ModelId::next();

        assert!(a.raw() < b.raw());
        assert!(b.raw() < c.raw());
    }

    #[test]
    fn test_reserve_prevents_collision() {
        let current = ModelId::next().raw();
        let reserved = ModelId::reserve(current + 100);

        // Every id allocated after the reservation is strictly greater.
        let later = ModelId::next();
        assert!(later.raw() > reserved.raw());
    }

    #[test]
    fn test_reserve_of_old_id_is_harmless() {
        let a = ModelId::next();
        let again = ModelId::reserve(a.raw());
        assert_eq!(a, again);

        let later = ModelId::next();
        assert!(later.raw() > a.raw());
    }

    #[test]
    fn test_display() {
        let id = ModelId::reserve(42);
        assert_eq!(id.to_string(), "p42");
    }

    #[test]
    fn test_serde_transparent() {
        let id = ModelId::reserve(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");

        let back: ModelId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
