//! Error adapter for converting JoineryError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a [`JoineryError::Validation`] carries several problems, each
//! problem is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use joinery::{ComposeError, JoineryError, validate::ValidationError};

/// Adapter for a single validation problem.
pub struct ValidationAdapter<'a> {
    error: &'a ValidationError,
}

impl<'a> ValidationAdapter<'a> {
    /// Create a new validation adapter.
    pub fn new(error: &'a ValidationError) -> Self {
        Self { error }
    }
}

impl fmt::Debug for ValidationAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationAdapter")
            .field("error", &self.error)
            .finish()
    }
}

impl fmt::Display for ValidationAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error.message())
    }
}

impl std::error::Error for ValidationAdapter<'_> {}

impl MietteDiagnostic for ValidationAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("joinery::validation"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let path = self.error.path();
        if path.is_empty() {
            return None;
        }
        Some(Box::new(format!("at `{path}`")))
    }
}

/// Adapter for non-validation [`JoineryError`] variants.
pub struct ErrorAdapter<'a>(pub &'a JoineryError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            JoineryError::Io(_) => "joinery::io",
            JoineryError::Compose(_) => "joinery::compose",
            JoineryError::Validation(_) => "joinery::validation",
            JoineryError::Config(_) => "joinery::config",
            JoineryError::Decode(_) => "joinery::decode",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            JoineryError::Compose(ComposeError::MissingCatalogueEntry(_)) => {
                "add the missing type, design or port to the kit"
            }
            JoineryError::Compose(ComposeError::StructuralPrecondition(_)) => {
                "check the design's pieces and connections"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// One validation problem.
    Validation(ValidationAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Validation(v) => fmt::Display::fmt(v, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Validation(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Validation(v) => v.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Validation(v) => v.help(),
            Reportable::Error(e) => e.help(),
        }
    }
}

/// Convert a [`JoineryError`] into a list of reportable errors.
///
/// For [`JoineryError::Validation`], this returns one [`Reportable`] for
/// each problem. For other error variants, this returns a single
/// [`Reportable`].
pub fn to_reportables(err: &JoineryError) -> Vec<Reportable<'_>> {
    match err {
        JoineryError::Validation(errors) => errors
            .errors()
            .iter()
            .map(|error| Reportable::Validation(ValidationAdapter::new(error)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use joinery::{
        Composer,
        model::{Connection, Design, Piece, Side, TypeKey},
    };

    use super::*;

    fn invalid_design_error() -> JoineryError {
        let key = TypeKey::new("block", "");
        let design = Design::new("broken")
            .with_piece(Piece::of_type("a", key))
            .with_piece(Piece::of_type("a", key))
            .with_connection(Connection::new(Side::new("a", ""), Side::new("ghost", "")));
        Composer::default()
            .validate(&design)
            .expect_err("design should be invalid")
    }

    #[test]
    fn test_validation_errors_are_split() {
        let err = invalid_design_error();
        let JoineryError::Validation(errors) = &err else {
            panic!("Expected validation error, got {err:?}");
        };

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), errors.len());
        assert!(reportables.len() >= 2);
        for reportable in &reportables {
            assert!(matches!(reportable, Reportable::Validation(_)));
            assert_eq!(
                reportable.code().map(|code| code.to_string()).as_deref(),
                Some("joinery::validation")
            );
        }
    }

    #[test]
    fn test_compose_error() {
        let err = JoineryError::Compose(ComposeError::MissingCatalogueEntry(
            "type `Foo#`".to_string(),
        ));

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(
                    e.to_string(),
                    "Composition error: missing catalogue entry: type `Foo#`"
                );
                assert_eq!(e.code().unwrap().to_string(), "joinery::compose");
                assert!(e.help().is_some());
            }
            Reportable::Validation(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_config_error_has_no_help() {
        let err = JoineryError::Config("bad".to_string());
        let reportables = to_reportables(&err);
        assert_eq!(reportables[0].code().unwrap().to_string(), "joinery::config");
        assert!(reportables[0].help().is_none());
    }
}
