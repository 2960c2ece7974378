//! The annotation model family.
//!
//! Annotation classes describe shaded regions and marker lines drawn over a
//! plot: a rectangular region ([`BOX_ANNOTATION`]), a polygonal region
//! ([`POLY_ANNOTATION`]), a sloped line ([`SLOPE`]), and a horizontal or
//! vertical span line ([`SPAN`]). All extend the [`ANNOTATION`] base class
//! and compose their appearance from the shared line/fill/hatch style
//! groups, with `hover`-, `above`-, and `below`-prefixed inclusions where a
//! second appearance set applies.

use std::rc::Rc;

use gnomon_core::{datatype::DataType, value::Value};

use crate::{
    catalog::coordinates::{FRAME_BOTTOM, FRAME_LEFT, FRAME_RIGHT, FRAME_TOP},
    catalog::enums::{BOX_MOVABLE, BOX_RESIZABLE, COORDINATE_UNITS, DIMENSIONS},
    catalog::styles::{FILL_GROUP, HATCH_GROUP, LINE_GROUP},
    property::{Coercion, DefaultValue, PropertyDescriptor},
    schema::{ModelClass, ModelRegistry, SchemaError},
};

/// Class name of the annotation base class.
pub const ANNOTATION: &str = "Annotation";

/// Class name of the shaded rectangular region annotation.
pub const BOX_ANNOTATION: &str = "BoxAnnotation";

/// Class name of the shaded polygonal region annotation.
pub const POLY_ANNOTATION: &str = "PolyAnnotation";

/// Class name of the sloped line annotation.
pub const SLOPE: &str = "Slope";

/// Class name of the horizontal/vertical span annotation.
pub const SPAN: &str = "Span";

/// Registers the annotation base class and the concrete annotation family.
pub fn install(registry: &mut ModelRegistry) -> Result<(), SchemaError> {
    let annotation = ModelClass::build(ANNOTATION)
        .property(bool_property("visible", true).help("Whether the annotation is rendered."))
        .build(registry)?;
    registry.register_class(&annotation)?;

    let box_annotation = build_box_annotation(&annotation, registry)?;
    registry.register_class(&box_annotation)?;

    let poly_annotation = build_poly_annotation(&annotation, registry)?;
    registry.register_class(&poly_annotation)?;

    let slope = build_slope(&annotation, registry)?;
    registry.register_class(&slope)?;

    let span = build_span(&annotation, registry)?;
    registry.register_class(&span)?;

    Ok(())
}

fn build_box_annotation(
    annotation: &Rc<ModelClass>,
    registry: &ModelRegistry,
) -> Result<Rc<ModelClass>, SchemaError> {
    ModelClass::build(BOX_ANNOTATION)
        .extends(annotation)
        .property(edge(
            "left",
            FRAME_LEFT,
            "The x-coordinates of the left edge of the box annotation.",
        ))
        .property(edge(
            "right",
            FRAME_RIGHT,
            "The x-coordinates of the right edge of the box annotation.",
        ))
        .property(edge(
            "top",
            FRAME_TOP,
            "The y-coordinates of the top edge of the box annotation.",
        ))
        .property(edge(
            "bottom",
            FRAME_BOTTOM,
            "The y-coordinates of the bottom edge of the box annotation.",
        ))
        .property(units("left_units", "The unit space for the left attribute."))
        .property(units("right_units", "The unit space for the right attribute."))
        .property(units("top_units", "The unit space for the top attribute."))
        .property(units("bottom_units", "The unit space for the bottom attribute."))
        .property(limit("left_limit", "Optional left limit for box movement."))
        .property(limit("right_limit", "Optional right limit for box movement."))
        .property(limit("top_limit", "Optional top limit for box movement."))
        .property(limit("bottom_limit", "Optional bottom limit for box movement."))
        .property(
            float_property("border_radius", 0.0)
                .help("Allows the box to have rounded corners."),
        )
        .property(
            bool_property("editable", false)
                .help("Allows to interactively modify the geometry of this box."),
        )
        .property(
            PropertyDescriptor::new(
                "resizable",
                DataType::Enum(BOX_RESIZABLE),
                DefaultValue::Literal(Value::Str("all".into())),
            )
            .help("Which edge combinations may be dragged when the box is editable."),
        )
        .property(
            PropertyDescriptor::new(
                "movable",
                DataType::Enum(BOX_MOVABLE),
                DefaultValue::Literal(Value::Str("both".into())),
            )
            .help("In which directions the box may be moved when editable."),
        )
        .property(
            bool_property("symmetric", false)
                .help("Whether the box resizes around its center rather than its corners."),
        )
        .include(LINE_GROUP)
        .include(FILL_GROUP)
        .include(HATCH_GROUP)
        .include_prefixed(LINE_GROUP, "hover")
        .include_prefixed(FILL_GROUP, "hover")
        .include_prefixed(HATCH_GROUP, "hover")
        .override_default("line_color", literal_str("#cccccc"))
        .override_default("line_alpha", literal_float(0.3))
        .override_default("fill_color", literal_str("#fff9ba"))
        .override_default("fill_alpha", literal_float(0.4))
        .override_default("hover_line_color", DefaultValue::Literal(Value::Null))
        .override_default("hover_line_alpha", literal_float(0.3))
        .override_default("hover_fill_color", DefaultValue::Literal(Value::Null))
        .override_default("hover_fill_alpha", literal_float(0.4))
        .build(registry)
}

fn build_poly_annotation(
    annotation: &Rc<ModelClass>,
    registry: &ModelRegistry,
) -> Result<Rc<ModelClass>, SchemaError> {
    ModelClass::build(POLY_ANNOTATION)
        .extends(annotation)
        .property(
            coordinate_seq("xs").help("The x-coordinates of the region to draw."),
        )
        .property(units("xs_units", "The unit space for the xs attribute."))
        .property(
            coordinate_seq("ys").help("The y-coordinates of the region to draw."),
        )
        .property(units("ys_units", "The unit space for the ys attribute."))
        .property(
            bool_property("editable", false)
                .help("Allows to interactively modify the geometry of this polygon."),
        )
        .include(LINE_GROUP)
        .include(FILL_GROUP)
        .include(HATCH_GROUP)
        .include_prefixed(LINE_GROUP, "hover")
        .include_prefixed(FILL_GROUP, "hover")
        .include_prefixed(HATCH_GROUP, "hover")
        .override_default("line_color", literal_str("#cccccc"))
        .override_default("line_alpha", literal_float(0.3))
        .override_default("fill_color", literal_str("#fff9ba"))
        .override_default("fill_alpha", literal_float(0.4))
        .override_default("hover_line_color", DefaultValue::Literal(Value::Null))
        .override_default("hover_line_alpha", literal_float(0.3))
        .override_default("hover_fill_color", DefaultValue::Literal(Value::Null))
        .override_default("hover_fill_alpha", literal_float(0.4))
        .build(registry)
}

fn build_slope(
    annotation: &Rc<ModelClass>,
    registry: &ModelRegistry,
) -> Result<Rc<ModelClass>, SchemaError> {
    ModelClass::build(SLOPE)
        .extends(annotation)
        .property(
            nullable_float("gradient").help("The gradient of the line, in data units."),
        )
        .property(
            nullable_float("y_intercept").help("The y intercept of the line, in data units."),
        )
        .include(LINE_GROUP)
        .include_prefixed(FILL_GROUP, "above")
        .include_prefixed(HATCH_GROUP, "above")
        .include_prefixed(FILL_GROUP, "below")
        .include_prefixed(HATCH_GROUP, "below")
        .override_default("above_fill_color", DefaultValue::Literal(Value::Null))
        .override_default("above_fill_alpha", literal_float(0.4))
        .override_default("below_fill_color", DefaultValue::Literal(Value::Null))
        .override_default("below_fill_alpha", literal_float(0.4))
        .build(registry)
}

fn build_span(
    annotation: &Rc<ModelClass>,
    registry: &ModelRegistry,
) -> Result<Rc<ModelClass>, SchemaError> {
    ModelClass::build(SPAN)
        .extends(annotation)
        .property(
            PropertyDescriptor::new(
                "location",
                DataType::nullable(DataType::Coordinate),
                DefaultValue::Literal(Value::Null),
            )
            .help("The location of the span, along `dimension`."),
        )
        .property(units("location_units", "The unit space for the location attribute."))
        .property(
            PropertyDescriptor::new(
                "dimension",
                DataType::Enum(DIMENSIONS),
                DefaultValue::Literal(Value::Str("width".into())),
            )
            .help("The direction of the span: `height` runs along y, `width` along x."),
        )
        .property(
            bool_property("editable", false)
                .help("Allows to interactively modify the geometry of this span."),
        )
        .include(LINE_GROUP)
        .include_prefixed(LINE_GROUP, "hover")
        .override_default("hover_line_color", DefaultValue::Literal(Value::Null))
        .override_default("hover_line_alpha", literal_float(0.3))
        .build(registry)
}

fn edge(name: &'static str, marker: &'static str, help: &'static str) -> PropertyDescriptor {
    PropertyDescriptor::new(name, DataType::Coordinate, DefaultValue::Instance(marker))
        .accepts(Coercion::null_to_instance(marker))
        .help(help)
}

fn units(name: &'static str, help: &'static str) -> PropertyDescriptor {
    PropertyDescriptor::new(
        name,
        DataType::Enum(COORDINATE_UNITS),
        DefaultValue::Literal(Value::Str("data".into())),
    )
    .help(help)
}

fn limit(name: &'static str, help: &'static str) -> PropertyDescriptor {
    PropertyDescriptor::new(
        name,
        DataType::nullable(DataType::Coordinate),
        DefaultValue::Literal(Value::Null),
    )
    .help(help)
}

fn coordinate_seq(name: &'static str) -> PropertyDescriptor {
    PropertyDescriptor::new(
        name,
        DataType::seq(DataType::Coordinate),
        DefaultValue::Computed(|| Value::List(Vec::new())),
    )
}

fn nullable_float(name: &'static str) -> PropertyDescriptor {
    PropertyDescriptor::new(
        name,
        DataType::nullable(DataType::Float),
        DefaultValue::Literal(Value::Null),
    )
}

fn bool_property(name: &'static str, default: bool) -> PropertyDescriptor {
    PropertyDescriptor::new(name, DataType::Bool, DefaultValue::Literal(Value::Bool(default)))
}

fn float_property(name: &'static str, default: f64) -> PropertyDescriptor {
    PropertyDescriptor::new(name, DataType::Float, DefaultValue::Literal(Value::Float(default)))
}

fn literal_str(value: &str) -> DefaultValue {
    DefaultValue::Literal(Value::Str(value.to_string()))
}

fn literal_float(value: f64) -> DefaultValue {
    DefaultValue::Literal(Value::Float(value))
}

#[cfg(test)]
mod tests {
    use gnomon_core::name::Name;

    use super::*;

    fn registry() -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        crate::catalog::install(&mut registry).unwrap();
        registry
    }

    #[test]
    fn test_family_extends_annotation() {
        let registry = registry();

        for name in [BOX_ANNOTATION, POLY_ANNOTATION, SLOPE, SPAN] {
            let class = registry.class(Name::new(name)).unwrap();
            let parent = class.parent().expect("annotation subclasses have a parent");
            assert_eq!(parent.name(), ANNOTATION);
            // Inherited attribute.
            assert!(class.has_attribute(Name::new("visible")));
        }
    }

    #[test]
    fn test_box_annotation_attribute_surface() {
        let registry = registry();
        let class = registry.class(Name::new(BOX_ANNOTATION)).unwrap();

        for attribute in [
            "left",
            "right",
            "top",
            "bottom",
            "left_units",
            "bottom_limit",
            "border_radius",
            "editable",
            "resizable",
            "movable",
            "symmetric",
            "line_color",
            "fill_color",
            "hatch_pattern",
            "hover_line_color",
            "hover_fill_alpha",
            "hover_hatch_scale",
        ] {
            assert!(
                class.has_attribute(Name::new(attribute)),
                "BoxAnnotation should expose `{attribute}`"
            );
        }

        // Prefixed inclusion renames, it does not duplicate.
        assert!(!class.has_attribute(Name::new("hover_left")));
    }

    #[test]
    fn test_box_annotation_overrides() {
        let registry = registry();
        let class = registry.class(Name::new(BOX_ANNOTATION)).unwrap();

        let default_of = |attribute: &str| {
            class
                .descriptor(Name::new(attribute))
                .unwrap()
                .default()
                .clone()
        };

        assert!(matches!(
            default_of("line_color"),
            DefaultValue::Literal(Value::Str(color)) if color == "#cccccc"
        ));
        assert!(matches!(
            default_of("fill_color"),
            DefaultValue::Literal(Value::Str(color)) if color == "#fff9ba"
        ));
        assert!(matches!(
            default_of("hover_line_color"),
            DefaultValue::Literal(Value::Null)
        ));
        assert!(matches!(
            default_of("fill_alpha"),
            DefaultValue::Literal(Value::Float(alpha)) if alpha == 0.4
        ));

        // The un-overridden hover width keeps the group default.
        assert!(matches!(
            default_of("hover_line_width"),
            DefaultValue::Literal(Value::Float(width)) if width == 1.0
        ));
    }

    #[test]
    fn test_box_edges_default_to_distinct_markers() {
        let registry = registry();
        let class = registry.class(Name::new(BOX_ANNOTATION)).unwrap();

        let marker_of = |attribute: &str| match class
            .descriptor(Name::new(attribute))
            .unwrap()
            .default()
        {
            DefaultValue::Instance(marker) => *marker,
            other => panic!("edge default should be an instance default, got {other:?}"),
        };

        assert_eq!(marker_of("left"), FRAME_LEFT);
        assert_eq!(marker_of("right"), FRAME_RIGHT);
        assert_eq!(marker_of("top"), FRAME_TOP);
        assert_eq!(marker_of("bottom"), FRAME_BOTTOM);
    }

    #[test]
    fn test_slope_prefixed_groups() {
        let registry = registry();
        let class = registry.class(Name::new(SLOPE)).unwrap();

        assert!(class.has_attribute(Name::new("above_fill_color")));
        assert!(class.has_attribute(Name::new("below_hatch_pattern")));
        assert!(!class.has_attribute(Name::new("fill_color")));
        assert!(!class.has_attribute(Name::new("hover_line_color")));
    }

    #[test]
    fn test_span_attribute_surface() {
        let registry = registry();
        let class = registry.class(Name::new(SPAN)).unwrap();

        assert!(class.has_attribute(Name::new("location")));
        assert!(class.has_attribute(Name::new("dimension")));
        assert!(class.has_attribute(Name::new("hover_line_dash")));
        assert!(!class.has_attribute(Name::new("fill_color")));
    }
}
