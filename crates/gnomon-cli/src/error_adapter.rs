//! Error adapter for converting GnomonError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error
//! types and miette's rich diagnostic formatting used in the CLI. Document
//! errors carry no source spans, so the adapter contributes an error code
//! and, where one helps, a hint for fixing the document.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use gnomon::{DocumentError, GnomonError};

/// Adapter wrapping a [`GnomonError`] with miette diagnostic metadata.
pub struct ErrorAdapter<'a> {
    /// The wrapped error
    err: &'a GnomonError,
}

impl<'a> ErrorAdapter<'a> {
    /// Create a new error adapter.
    pub fn new(err: &'a GnomonError) -> Self {
        Self { err }
    }

    fn code_str(&self) -> &'static str {
        match self.err {
            GnomonError::Io(_) => "gnomon::io",
            GnomonError::Schema(_) => "gnomon::schema",
            GnomonError::Property(_) => "gnomon::property",
            GnomonError::Document(err) => match err {
                DocumentError::Construction { .. } => "gnomon::document::construction",
                DocumentError::UnknownInstance { .. } => "gnomon::document::unknown_instance",
                DocumentError::UnknownClass { .. } => "gnomon::document::unknown_class",
                DocumentError::DuplicateId { .. } => "gnomon::document::duplicate_id",
                DocumentError::DanglingReference { .. }
                | DocumentError::UnresolvedReference { .. } => "gnomon::document::reference",
                DocumentError::CyclicReference { .. } => "gnomon::document::cycle",
                DocumentError::UnsupportedVersion { .. } => "gnomon::document::version",
                DocumentError::Json(_) => "gnomon::document::json",
            },
        }
    }

    fn help_str(&self) -> Option<&'static str> {
        match self.err {
            GnomonError::Document(DocumentError::CyclicReference { .. }) => {
                Some("document graphs must be acyclic; remove one of the mutual references")
            }
            GnomonError::Document(DocumentError::UnknownClass { .. }) => {
                Some("only classes from the built-in model catalog can appear in a document")
            }
            GnomonError::Document(DocumentError::UnresolvedReference { .. }) => {
                Some("every {\"ref\": id} token must name an instance defined in the same document")
            }
            GnomonError::Document(DocumentError::UnsupportedVersion { .. }) => {
                Some("re-export the document with a matching tool version")
            }
            _ => None,
        }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorAdapter").field("err", &self.err).finish()
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.err)
    }
}

impl std::error::Error for ErrorAdapter<'_> {}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_str().map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}

#[cfg(test)]
mod tests {
    use gnomon_core::{id::ModelId, name::Name};

    use super::*;

    #[test]
    fn test_code_for_cycle() {
        let err = GnomonError::Document(DocumentError::CyclicReference {
            id: ModelId::reserve(3),
        });
        let adapter = ErrorAdapter::new(&err);

        assert_eq!(adapter.code_str(), "gnomon::document::cycle");
        assert!(adapter.help_str().is_some());
    }

    #[test]
    fn test_display_passes_through() {
        let err = GnomonError::Document(DocumentError::UnknownClass {
            class: Name::new("Ghost"),
        });
        let adapter = ErrorAdapter::new(&err);

        assert_eq!(adapter.to_string(), err.to_string());
    }

    #[test]
    fn test_io_has_no_help() {
        let err = GnomonError::Io(std::io::Error::other("boom"));
        let adapter = ErrorAdapter::new(&err);

        assert_eq!(adapter.code_str(), "gnomon::io");
        assert!(adapter.help_str().is_none());
    }
}
