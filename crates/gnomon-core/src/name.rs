//! Attribute and class name management using string interning.
//!
//! This module provides the [`Name`] type with an efficient string-interner
//! based approach. Attribute names repeat across every model class and every
//! serialized instance, so they are interned once and compared as symbols.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for attribute and class names.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> &'static Mutex<DefaultStringInterner> {
    INTERNER.get_or_init(|| Mutex::new(DefaultStringInterner::new()))
}

/// An interned attribute or class name.
///
/// Names are cheap to copy and compare, and render back to their string form
/// through [`fmt::Display`].
///
/// # Examples
///
/// ```
/// use gnomon_core::name::Name;
///
/// let line_color = Name::new("line_color");
/// assert_eq!(line_color, "line_color");
///
/// // Prefixed inclusion produces `{prefix}_{attr}` names
/// let hover = Name::new("line_color").with_prefix("hover");
/// assert_eq!(hover, "hover_line_color");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Name(DefaultSymbol);

impl Name {
    /// Creates a `Name` from a string slice.
    pub fn new(name: &str) -> Self {
        let mut interner = interner().lock().expect("Failed to acquire interner lock");
        let symbol = interner.get_or_intern(name);
        Self(symbol)
    }

    /// Returns this name with a `{prefix}_` prepended.
    ///
    /// This is the renaming rule for prefixed style-group inclusion: a group
    /// attribute `line_color` included under prefix `hover` resolves to
    /// `hover_line_color`.
    pub fn with_prefix(self, prefix: &str) -> Self {
        let mut interner = interner().lock().expect("Failed to acquire interner lock");
        let base = interner
            .resolve(self.0)
            .expect("Name symbol should exist in interner");
        let prefixed = format!("{prefix}_{base}");
        let symbol = interner.get_or_intern(&prefixed);
        Self(symbol)
    }

    /// Calls `f` with the string form of this name.
    ///
    /// The interner is locked for the duration of the call; `f` must not
    /// create or render other names.
    pub fn resolve_with<R>(self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let value = interner
            .resolve(self.0)
            .expect("Name symbol should exist in interner");
        f(value)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner().lock().expect("Failed to acquire interner lock");
        let value = interner
            .resolve(self.0)
            .expect("Name symbol should exist in interner");
        write!(f, "{value}")
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Name {
    /// Allows direct comparison with string slices: `name == "line_color"`.
    fn eq(&self, other: &str) -> bool {
        self.resolve_with(|value| value == other)
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.resolve_with(|value| serializer.serialize_str(value))
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NameVisitor;

        impl de::Visitor<'_> for NameVisitor {
            type Value = Name;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an attribute or class name string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Name, E> {
                Ok(Name::new(value))
            }
        }

        deserializer.deserialize_str(NameVisitor)
    }
}
