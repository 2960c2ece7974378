//! Reusable attribute group templates.
//!
//! A [`GroupTemplate`] is a named, immutable list of property descriptors
//! shared across model classes — the line/fill/hatch style bundles. Inclusion
//! is expansion-time copying: the template's descriptors are cloned into the
//! including class, renamed `{prefix}_{attribute}` when a prefix is given.
//! No inheritance relationship is created.

use crate::property::PropertyDescriptor;

/// A named, immutable bundle of property descriptors.
#[derive(Debug, Clone)]
pub struct GroupTemplate {
    name: &'static str,
    properties: Vec<PropertyDescriptor>,
}

impl GroupTemplate {
    /// Creates a group template from its descriptor list.
    pub fn new(name: &'static str, properties: Vec<PropertyDescriptor>) -> Self {
        Self { name, properties }
    }

    /// The template's registry name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The template's descriptors, in declared order.
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Expands this template for inclusion into a class.
    ///
    /// With a prefix, every descriptor is renamed `{prefix}_{attribute}`;
    /// without one, descriptors keep their template names.
    pub(crate) fn expand(&self, prefix: Option<&str>) -> Vec<PropertyDescriptor> {
        self.properties
            .iter()
            .map(|descriptor| match prefix {
                Some(prefix) => descriptor.renamed(descriptor.name().with_prefix(prefix)),
                None => descriptor.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use gnomon_core::{datatype::DataType, value::Value};

    use crate::property::DefaultValue;

    use super::*;

    fn sample_group() -> GroupTemplate {
        GroupTemplate::new(
            "line",
            vec![
                PropertyDescriptor::new(
                    "line_color",
                    DataType::nullable(DataType::Color),
                    DefaultValue::Literal(Value::Str("black".into())),
                ),
                PropertyDescriptor::new(
                    "line_width",
                    DataType::Float,
                    DefaultValue::Literal(Value::Float(1.0)),
                ),
            ],
        )
    }

    #[test]
    fn test_expand_without_prefix_keeps_names() {
        let group = sample_group();
        let expanded = group.expand(None);

        let names: Vec<String> = expanded.iter().map(|d| d.name().to_string()).collect();
        assert_eq!(names, vec!["line_color", "line_width"]);
    }

    #[test]
    fn test_expand_with_prefix_renames_all() {
        let group = sample_group();
        let expanded = group.expand(Some("hover"));

        let names: Vec<String> = expanded.iter().map(|d| d.name().to_string()).collect();
        assert_eq!(names, vec!["hover_line_color", "hover_line_width"]);

        // The template itself is untouched.
        assert_eq!(group.properties()[0].name(), "line_color");
    }

    #[test]
    fn test_expand_preserves_declaration_order() {
        let group = sample_group();
        let first = group.expand(Some("above"));
        let second = group.expand(Some("above"));

        let names =
            |set: &[PropertyDescriptor]| set.iter().map(|d| d.name().to_string()).collect::<Vec<_>>();
        assert_eq!(names(&first), names(&second));
    }
}
