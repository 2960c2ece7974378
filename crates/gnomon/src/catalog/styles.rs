//! Shared line/fill/hatch style group templates.
//!
//! These are the reusable attribute bundles included (plain or prefixed)
//! by every styled model class. Defaults follow the conventional scalar
//! style properties: black solid hairlines, gray fills, fully opaque.

use gnomon_core::{datatype::DataType, value::Value};

use crate::{
    catalog::enums::{HATCH_PATTERNS, LINE_CAPS, LINE_DASHES, LINE_JOINS},
    property::{DefaultValue, PropertyDescriptor},
    schema::{GroupTemplate, ModelRegistry, SchemaError},
};

/// Registry name of the line style group.
pub const LINE_GROUP: &str = "line";

/// Registry name of the fill style group.
pub const FILL_GROUP: &str = "fill";

/// Registry name of the hatch style group.
pub const HATCH_GROUP: &str = "hatch";

/// Registers the three style groups.
pub fn install(registry: &mut ModelRegistry) -> Result<(), SchemaError> {
    registry.register_group(line_group())?;
    registry.register_group(fill_group())?;
    registry.register_group(hatch_group())?;
    Ok(())
}

fn color(name: &str, default: &str) -> PropertyDescriptor {
    PropertyDescriptor::new(
        name,
        DataType::nullable(DataType::Color),
        DefaultValue::Literal(Value::Str(default.to_string())),
    )
}

fn float(name: &str, default: f64) -> PropertyDescriptor {
    PropertyDescriptor::new(name, DataType::Float, DefaultValue::Literal(Value::Float(default)))
}

fn line_group() -> GroupTemplate {
    GroupTemplate::new(
        LINE_GROUP,
        vec![
            color("line_color", "black").help("The line color."),
            float("line_alpha", 1.0).help("The line alpha, from 0 (transparent) to 1 (opaque)."),
            float("line_width", 1.0).help("The line stroke width in pixels."),
            PropertyDescriptor::new(
                "line_cap",
                DataType::Enum(LINE_CAPS),
                DefaultValue::Literal(Value::Str("butt".into())),
            )
            .help("How line endpoints are rendered."),
            PropertyDescriptor::new(
                "line_join",
                DataType::Enum(LINE_JOINS),
                DefaultValue::Literal(Value::Str("bevel".into())),
            )
            .help("How line corners are rendered."),
            PropertyDescriptor::new(
                "line_dash",
                DataType::Enum(LINE_DASHES),
                DefaultValue::Literal(Value::Str("solid".into())),
            )
            .help("The line dash pattern."),
            float("line_dash_offset", 0.0)
                .help("Offset into the dash pattern at which drawing starts."),
        ],
    )
}

fn fill_group() -> GroupTemplate {
    GroupTemplate::new(
        FILL_GROUP,
        vec![
            color("fill_color", "gray").help("The fill color."),
            float("fill_alpha", 1.0).help("The fill alpha, from 0 (transparent) to 1 (opaque)."),
        ],
    )
}

fn hatch_group() -> GroupTemplate {
    GroupTemplate::new(
        HATCH_GROUP,
        vec![
            color("hatch_color", "black").help("The hatch stroke color."),
            float("hatch_alpha", 1.0).help("The hatch alpha, from 0 (transparent) to 1 (opaque)."),
            PropertyDescriptor::new(
                "hatch_pattern",
                DataType::nullable(DataType::Enum(HATCH_PATTERNS)),
                DefaultValue::Literal(Value::Null),
            )
            .help("The named hatch pattern, if any."),
            float("hatch_scale", 12.0).help("The hatch pattern repetition distance in pixels."),
            float("hatch_weight", 1.0).help("The hatch stroke width in pixels."),
        ],
    )
}
