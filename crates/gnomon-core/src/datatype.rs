//! Declared-type tags and value validation.
//!
//! Every property descriptor declares a [`DataType`]; a value is accepted for
//! an attribute only if the declared type [`admits`](DataType::admits) it
//! (after any declared coercions have run).
//!
//! # Overview
//!
//! - [`DataType`]: the semantic type tags (boolean, float, enum-of-values,
//!   nullable wrapper, sequence, coordinate-like, ...)
//! - [`ValueError`]: the validation failure detail, carried inside the
//!   property layer's type-mismatch errors

use std::fmt;

use thiserror::Error;

use crate::{color::Color, value::Value};

/// A value failed validation against a declared type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValueError {
    #[error("expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },

    #[error("{detail}")]
    InvalidColor { detail: String },
}

/// The declared semantic type of a property.
///
/// `Coordinate` is the coordinate-like type: it admits a plain float (a data
/// or screen coordinate) or a reference to a coordinate model instance such
/// as a frame-edge marker.
///
/// # Examples
///
/// ```
/// use gnomon_core::{datatype::DataType, value::Value};
///
/// let units = DataType::Enum(&["data", "screen"]);
/// assert!(units.admits(&Value::Str("data".into())));
/// assert!(!units.admits(&Value::Str("pixels".into())));
///
/// let alpha = DataType::Nullable(Box::new(DataType::Float));
/// assert!(alpha.admits(&Value::Null));
/// assert!(alpha.admits(&Value::Float(0.3)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    Bool,
    Float,
    Str,
    /// A CSS color string, validated by the [`Color`] parser.
    Color,
    /// One of a fixed set of string values.
    Enum(&'static [&'static str]),
    /// A float or a reference to a coordinate model instance.
    Coordinate,
    /// A reference to another model instance.
    Ref,
    /// The wrapped type, or the explicit null sentinel.
    Nullable(Box<DataType>),
    /// A sequence whose elements all satisfy the element type.
    Seq(Box<DataType>),
}

impl DataType {
    /// Convenience constructor for `Nullable(inner)`.
    pub fn nullable(inner: DataType) -> Self {
        DataType::Nullable(Box::new(inner))
    }

    /// Convenience constructor for `Seq(element)`.
    pub fn seq(element: DataType) -> Self {
        DataType::Seq(Box::new(element))
    }

    /// Returns true if `value` satisfies this declared type.
    pub fn admits(&self, value: &Value) -> bool {
        self.check(value).is_ok()
    }

    /// Validates `value` against this declared type.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError`] describing the expected type and the offending
    /// value when validation fails.
    pub fn check(&self, value: &Value) -> Result<(), ValueError> {
        match (self, value) {
            (DataType::Bool, Value::Bool(_)) => Ok(()),
            (DataType::Float, Value::Float(_)) => Ok(()),
            (DataType::Str, Value::Str(_)) => Ok(()),
            (DataType::Color, Value::Str(text)) => match Color::new(text) {
                Ok(_) => Ok(()),
                Err(detail) => Err(ValueError::InvalidColor { detail }),
            },
            (DataType::Enum(choices), Value::Str(text)) => {
                if choices.contains(&text.as_str()) {
                    Ok(())
                } else {
                    Err(self.mismatch(value))
                }
            }
            (DataType::Coordinate, Value::Float(_) | Value::Ref(_)) => Ok(()),
            (DataType::Ref, Value::Ref(_)) => Ok(()),
            (DataType::Nullable(_), Value::Null) => Ok(()),
            (DataType::Nullable(inner), _) => inner
                .check(value)
                // Report the nullable rendering, not the inner one.
                .map_err(|_| self.mismatch(value)),
            (DataType::Seq(element), Value::List(values)) => {
                for item in values {
                    element.check(item).map_err(|_| self.mismatch(value))?;
                }
                Ok(())
            }
            _ => Err(self.mismatch(value)),
        }
    }

    fn mismatch(&self, value: &Value) -> ValueError {
        ValueError::Mismatch {
            expected: self.to_string(),
            actual: value.kind().to_string(),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Bool => write!(f, "boolean"),
            DataType::Float => write!(f, "float"),
            DataType::Str => write!(f, "string"),
            DataType::Color => write!(f, "color"),
            DataType::Enum(choices) => write!(f, "one of [{}]", choices.join(", ")),
            DataType::Coordinate => write!(f, "coordinate"),
            DataType::Ref => write!(f, "instance reference"),
            DataType::Nullable(inner) => write!(f, "nullable {inner}"),
            DataType::Seq(element) => write!(f, "sequence of {element}"),
        }
    }
}
