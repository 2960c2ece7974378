//! Property descriptors: the typed, validated attribute slots of a model
//! class.
//!
//! A [`PropertyDescriptor`] declares an attribute's name, its
//! [`DataType`], a default, an ordered list of accepted [`Coercion`]s, and
//! optional help text. Descriptors are immutable once a class is built;
//! instances resolve raw values through them on construction and on every
//! assignment.
//!
//! # Defaults
//!
//! Defaults come in three forms:
//!
//! - [`DefaultValue::Literal`]: a plain value, cloned per instance.
//! - [`DefaultValue::Computed`]: a zero-argument producer invoked freshly per
//!   instance, so no mutable default state is ever shared between instances.
//! - [`DefaultValue::Instance`]: the named model class is instantiated fresh
//!   in the owning document per constructed instance and the attribute holds
//!   a reference to it. This is how a box annotation's `left` edge defaults
//!   to its own frame-edge marker.
//!
//! # Coercions
//!
//! Coercions are tested in declared order against the incoming raw value;
//! the first matching pattern rewrites the value before type validation.
//! A value that matches no pattern is validated as-is.

use thiserror::Error;

use gnomon_core::{
    datatype::{DataType, ValueError},
    name::Name,
    value::Value,
};

/// A zero-argument default producer, invoked freshly per instance.
pub type ProducerFn = fn() -> Value;

/// A coercion pattern: does the raw value match?
pub type MatchFn = fn(&Value) -> bool;

/// A coercion rewrite: produce the replacement value from the raw one.
pub type ProduceFn = fn(&Value) -> Value;

/// Errors raised while resolving a value against a descriptor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PropertyError {
    #[error("type mismatch for attribute `{attribute}`: {source}")]
    TypeMismatch {
        attribute: Name,
        #[source]
        source: ValueError,
    },

    #[error("unknown attribute `{attribute}`")]
    UnknownAttribute { attribute: Name },
}

/// The default of a property descriptor.
#[derive(Debug, Clone)]
pub enum DefaultValue {
    /// A literal value, cloned per instance.
    Literal(Value),
    /// A producer invoked freshly per instance.
    Computed(ProducerFn),
    /// A fresh instance of the named class per constructed instance.
    Instance(&'static str),
}

/// What a matched coercion turns the raw value into.
#[derive(Debug, Clone)]
pub enum CoercionInto {
    /// Rewrite the raw value.
    Value(ProduceFn),
    /// Replace the raw value with a reference to a fresh instance of the
    /// named class.
    Instance(&'static str),
}

/// A declared coercion rule: a pattern and its replacement.
#[derive(Debug, Clone)]
pub struct Coercion {
    matches: MatchFn,
    into: CoercionInto,
}

impl Coercion {
    /// Creates a coercion that rewrites matching values.
    pub fn new(matches: MatchFn, produce: ProduceFn) -> Self {
        Self {
            matches,
            into: CoercionInto::Value(produce),
        }
    }

    /// Creates a coercion that replaces matching values with a fresh
    /// instance of `class`.
    pub fn to_instance(matches: MatchFn, class: &'static str) -> Self {
        Self {
            matches,
            into: CoercionInto::Instance(class),
        }
    }

    /// Creates the common "explicit null becomes a fresh instance of
    /// `class`" coercion.
    pub fn null_to_instance(class: &'static str) -> Self {
        Self::to_instance(|value| value.is_null(), class)
    }

    /// Returns true if this coercion's pattern matches `value`.
    pub fn matches(&self, value: &Value) -> bool {
        (self.matches)(value)
    }

    /// The replacement rule applied when the pattern matches.
    pub fn into_what(&self) -> &CoercionInto {
        &self.into
    }
}

/// A named, typed, validated attribute slot on a model class.
///
/// # Examples
///
/// ```
/// use gnomon::property::{DefaultValue, PropertyDescriptor};
/// use gnomon_core::{datatype::DataType, value::Value};
///
/// let width = PropertyDescriptor::new(
///     "line_width",
///     DataType::Float,
///     DefaultValue::Literal(Value::Float(1.0)),
/// )
/// .help("Stroke width in pixels.");
///
/// assert_eq!(width.name(), "line_width");
/// assert!(width.check(&Value::Float(2.5)).is_ok());
/// assert!(width.check(&Value::Str("red".into())).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    name: Name,
    dtype: DataType,
    default: DefaultValue,
    coercions: Vec<Coercion>,
    help: Option<&'static str>,
}

impl PropertyDescriptor {
    /// Creates a descriptor with the given name, declared type, and default.
    pub fn new(name: &str, dtype: DataType, default: DefaultValue) -> Self {
        Self {
            name: Name::new(name),
            dtype,
            default,
            coercions: Vec::new(),
            help: None,
        }
    }

    /// Attaches help text.
    pub fn help(mut self, text: &'static str) -> Self {
        self.help = Some(text);
        self
    }

    /// Appends an accepted coercion. Coercions are tested in the order they
    /// were declared.
    pub fn accepts(mut self, coercion: Coercion) -> Self {
        self.coercions.push(coercion);
        self
    }

    /// The attribute name.
    pub fn name(&self) -> Name {
        self.name
    }

    /// The declared type.
    pub fn dtype(&self) -> &DataType {
        &self.dtype
    }

    /// The default.
    pub fn default(&self) -> &DefaultValue {
        &self.default
    }

    /// The declared coercions, in order.
    pub fn coercions(&self) -> &[Coercion] {
        &self.coercions
    }

    /// The help text, if any.
    pub fn help_text(&self) -> Option<&'static str> {
        self.help
    }

    /// Returns a copy of this descriptor with a different default.
    ///
    /// This is override semantics: the returned descriptor binds to the same
    /// logical attribute slot — same name, same declared type, same
    /// coercions — with only the default replaced.
    pub fn with_default(&self, default: DefaultValue) -> Self {
        Self {
            default,
            ..self.clone()
        }
    }

    /// Returns a copy of this descriptor under a different name.
    ///
    /// Used by prefixed group inclusion (`line_color` → `hover_line_color`).
    pub(crate) fn renamed(&self, name: Name) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }

    /// Finds the first declared coercion whose pattern matches `raw`.
    pub fn coerce(&self, raw: &Value) -> Option<&CoercionInto> {
        self.coercions
            .iter()
            .find(|coercion| coercion.matches(raw))
            .map(Coercion::into_what)
    }

    /// Validates a (possibly already coerced) value against the declared
    /// type.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::TypeMismatch`] carrying this attribute's
    /// name and the validation detail.
    pub fn check(&self, value: &Value) -> Result<(), PropertyError> {
        self.dtype
            .check(value)
            .map_err(|source| PropertyError::TypeMismatch {
                attribute: self.name,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha_descriptor() -> PropertyDescriptor {
        PropertyDescriptor::new(
            "fill_alpha",
            DataType::Float,
            DefaultValue::Literal(Value::Float(1.0)),
        )
    }

    #[test]
    fn test_descriptor_accessors() {
        let descriptor = alpha_descriptor().help("Fill opacity.");

        assert_eq!(descriptor.name(), "fill_alpha");
        assert_eq!(*descriptor.dtype(), DataType::Float);
        assert_eq!(descriptor.help_text(), Some("Fill opacity."));
        assert!(descriptor.coercions().is_empty());
    }

    #[test]
    fn test_check_reports_attribute_name() {
        let descriptor = alpha_descriptor();

        let err = descriptor.check(&Value::Str("red".into())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type mismatch for attribute `fill_alpha`: expected float, got string"
        );
    }

    #[test]
    fn test_with_default_preserves_slot() {
        let descriptor = alpha_descriptor().help("Fill opacity.");
        let overridden = descriptor.with_default(DefaultValue::Literal(Value::Float(0.4)));

        assert_eq!(overridden.name(), descriptor.name());
        assert_eq!(overridden.dtype(), descriptor.dtype());
        assert_eq!(overridden.help_text(), descriptor.help_text());
        assert!(matches!(
            overridden.default(),
            DefaultValue::Literal(Value::Float(alpha)) if *alpha == 0.4
        ));
    }

    #[test]
    fn test_coercion_order_first_match_wins() {
        let descriptor = PropertyDescriptor::new(
            "location",
            DataType::Float,
            DefaultValue::Literal(Value::Float(0.0)),
        )
        .accepts(Coercion::new(
            |value| value.is_null(),
            |_| Value::Float(0.0),
        ))
        .accepts(Coercion::new(
            |value| value.is_null(),
            |_| Value::Float(99.0),
        ));

        let Some(CoercionInto::Value(produce)) = descriptor.coerce(&Value::Null) else {
            panic!("null should match the first coercion");
        };
        assert_eq!(produce(&Value::Null), Value::Float(0.0));
    }

    #[test]
    fn test_no_matching_coercion() {
        let descriptor = alpha_descriptor().accepts(Coercion::null_to_instance("FrameLeft"));
        assert!(descriptor.coerce(&Value::Float(0.5)).is_none());
    }

    #[test]
    fn test_null_to_instance_coercion() {
        let coercion = Coercion::null_to_instance("FrameLeft");
        assert!(coercion.matches(&Value::Null));
        assert!(!coercion.matches(&Value::Float(1.0)));
        assert!(matches!(
            coercion.into_what(),
            CoercionInto::Instance("FrameLeft")
        ));
    }

    #[test]
    fn test_computed_default_is_fresh() {
        let descriptor = PropertyDescriptor::new(
            "xs",
            DataType::seq(DataType::Coordinate),
            DefaultValue::Computed(|| Value::List(Vec::new())),
        );

        let DefaultValue::Computed(produce) = descriptor.default() else {
            panic!("expected a computed default");
        };

        // Two calls yield two independent values.
        let first = produce();
        let second = produce();
        assert_eq!(first, second);
        assert_eq!(first, Value::List(Vec::new()));
    }
}
