//! Error types for Joinery operations.
//!
//! [`ComposeError`] is raised by the composition engine itself. The façade
//! error [`JoineryError`] wraps it together with validation, configuration,
//! decoding and I/O failures.

use std::io;

use thiserror::Error;

use joinery_core::validate::ValidationErrors;

/// Failure of a composition run.
///
/// Both kinds are raised before any pose is written, so a failed run never
/// yields a partially placed design.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// A type, design or port key cannot be resolved in the catalogue.
    #[error("missing catalogue entry: {0}")]
    MissingCatalogueEntry(String),

    /// The design breaks an assumption the engine relies on, such as a
    /// connection naming an absent piece or a port without geometry.
    #[error("structural precondition violated: {0}")]
    StructuralPrecondition(String),
}

impl ComposeError {
    pub(crate) fn missing(entry: impl Into<String>) -> Self {
        Self::MissingCatalogueEntry(entry.into())
    }

    pub(crate) fn structural(message: impl Into<String>) -> Self {
        Self::StructuralPrecondition(message.into())
    }
}

/// The main error type for Joinery operations.
#[derive(Debug, Error)]
pub enum JoineryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Composition error: {0}")]
    Compose(#[from] ComposeError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Decode error: {0}")]
    Decode(Box<dyn std::error::Error + Send + Sync>),
}

impl JoineryError {
    /// Wraps a decoding failure (for example a malformed kit file)
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Box::new(err))
    }
}
