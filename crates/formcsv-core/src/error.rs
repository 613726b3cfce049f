//! Error type for form-to-CSV conversion.
//!
//! Provides [`ConvertError`], the single error taxonomy surfaced by every
//! conversion entry point. Conversion is all-or-nothing: absence of data is
//! always one of these errors, never an empty CSV.

use std::fmt;

/// Fatal error for a single conversion call.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// Input was empty or otherwise unusable before any parsing.
    InvalidInput(String),
    /// A referenced file or directory does not exist; the message names it.
    NotFound(String),
    /// The PDF backend could not parse the bytes.
    UnreadablePdf(String),
    /// The PDF is encrypted and requires a password to open.
    PasswordRequired,
    /// The supplied password is incorrect for this encrypted PDF.
    InvalidPassword,
    /// The document has no interactive form.
    NoForm,
    /// The interactive form has no terminal fields.
    NoFields,
    /// A configured resource limit was exceeded.
    ResourceLimitExceeded {
        /// Name of the limit that was exceeded (e.g., "max_input_bytes").
        limit_name: String,
        /// The configured limit value.
        limit_value: usize,
        /// The actual value that exceeded the limit.
        actual_value: usize,
    },
    /// I/O error reading an existing source.
    Io(String),
}

impl ConvertError {
    /// Whether the failure is caused by the caller's input.
    ///
    /// HTTP callers map `true` to `400 Bad Request` and `false` to
    /// `500 Internal Server Error`.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ConvertError::Io(_))
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::InvalidInput(msg) => write!(f, "{msg}"),
            ConvertError::NotFound(msg) => write!(f, "{msg}"),
            ConvertError::UnreadablePdf(msg) => write!(f, "unreadable PDF: {msg}"),
            ConvertError::PasswordRequired => write!(f, "PDF is encrypted and requires a password"),
            ConvertError::InvalidPassword => write!(f, "the supplied password is incorrect"),
            ConvertError::NoForm => write!(f, "No AcroForm (form fields) found in this PDF."),
            ConvertError::NoFields => write!(f, "No terminal form fields found in this PDF."),
            ConvertError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
            } => write!(
                f,
                "resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value})"
            ),
            ConvertError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::Io(err.to_string())
    }
}
