//! Error types for Gnomon operations.
//!
//! This module provides the main error type [`GnomonError`] which wraps the
//! failure conditions of the layers below it: schema building, property
//! resolution, and document operations.

use std::io;

use thiserror::Error;

use crate::{document::DocumentError, property::PropertyError, schema::SchemaError};

/// The main error type for Gnomon operations.
///
/// All failures are local and synchronous: they surface at the offending
/// call (class build, construction, assignment, serialization) and nothing
/// is retried or silently substituted.
#[derive(Debug, Error)]
pub enum GnomonError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("property error: {0}")]
    Property(#[from] PropertyError),

    #[error("document error: {0}")]
    Document(#[from] DocumentError),
}
