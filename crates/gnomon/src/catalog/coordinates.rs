//! Frame-edge coordinate marker classes.
//!
//! A coordinate-typed attribute holds either a plain number or a reference
//! to a coordinate marker instance. The four classes here mark the edges of
//! the plot frame; a box annotation created with no explicit edges anchors
//! each edge to its own fresh marker, so the box tracks the frame until a
//! concrete coordinate is assigned.

use crate::schema::{ModelClass, ModelRegistry, SchemaError};

/// Class name of the left frame edge marker.
pub const FRAME_LEFT: &str = "FrameLeft";

/// Class name of the right frame edge marker.
pub const FRAME_RIGHT: &str = "FrameRight";

/// Class name of the top frame edge marker.
pub const FRAME_TOP: &str = "FrameTop";

/// Class name of the bottom frame edge marker.
pub const FRAME_BOTTOM: &str = "FrameBottom";

/// Registers the four frame-edge marker classes.
///
/// Markers carry no attributes: their class identity is the coordinate.
pub fn install(registry: &mut ModelRegistry) -> Result<(), SchemaError> {
    for name in [FRAME_LEFT, FRAME_RIGHT, FRAME_TOP, FRAME_BOTTOM] {
        let class = ModelClass::build(name).build(registry)?;
        registry.register_class(&class)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use gnomon_core::name::Name;

    use super::*;

    #[test]
    fn test_markers_register_without_attributes() {
        let mut registry = ModelRegistry::new();
        install(&mut registry).unwrap();

        for name in [FRAME_LEFT, FRAME_RIGHT, FRAME_TOP, FRAME_BOTTOM] {
            let class = registry.class(Name::new(name)).unwrap();
            assert_eq!(class.attribute_count(), 0);
            assert!(class.parent().is_none());
        }
    }
}
