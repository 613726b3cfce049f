//! Error types for the parsing layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps backend-specific errors and converts them to [`ConvertError`].

use formcsv_core::ConvertError;
use thiserror::Error;

/// Error type for PDF parsing backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax, object resolution).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// The document handle was used after it was released.
    #[error("document has already been released")]
    Released,

    /// Error reading PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] ConvertError),
}

impl From<BackendError> for ConvertError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => ConvertError::UnreadablePdf(msg),
            BackendError::Released => ConvertError::Io(BackendError::Released.to_string()),
            BackendError::Io(e) => ConvertError::Io(e.to_string()),
            BackendError::Core(e) => e,
        }
    }
}
