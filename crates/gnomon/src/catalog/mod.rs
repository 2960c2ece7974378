//! The built-in model catalog.
//!
//! This module populates a [`ModelRegistry`] with the standard vocabulary of
//! the plot-model layer:
//!
//! - [`styles`] - shared line/fill/hatch style group templates
//! - [`enums`] - fixed string vocabularies (units, dimensions, dash names)
//! - [`coordinates`] - frame-edge coordinate marker classes
//! - [`annotations`] - the annotation model family (box, polygon, slope,
//!   span)
//!
//! Everything here is declared through the explicit [`ClassBuilder`] surface;
//! the catalog is plain data, installed once at load time.
//!
//! [`ClassBuilder`]: crate::schema::ClassBuilder

pub mod annotations;
pub mod coordinates;
pub mod enums;
pub mod styles;

use log::debug;

use crate::schema::{ModelRegistry, SchemaError};

/// Installs the complete built-in catalog into `registry`.
///
/// # Errors
///
/// Returns the first [`SchemaError`] raised while building or registering
/// catalog entries — only possible when installing over a registry that
/// already defines conflicting names.
pub fn install(registry: &mut ModelRegistry) -> Result<(), SchemaError> {
    styles::install(registry)?;
    coordinates::install(registry)?;
    annotations::install(registry)?;
    debug!("Built-in model catalog installed");
    Ok(())
}
