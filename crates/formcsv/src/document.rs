//! Scoped handle over a parsed PDF document.

use std::path::Path;

use formcsv_core::{AcroForm, ConvertError, ConvertOptions};
use formcsv_parse::{FormBackend, LopdfBackend};
use tracing::debug;

/// A PDF document opened for form extraction.
///
/// The backend document is released when the handle is dropped, so every
/// exit path of a caller (success, early `?` return, panic unwinding) frees
/// the parsed data.
///
/// # Example
///
/// ```ignore
/// let doc: FormDocument = FormDocument::open(bytes, None)?;
/// let form = doc.form()?;
/// ```
pub struct FormDocument<B: FormBackend = LopdfBackend> {
    doc: B::Document,
    options: ConvertOptions,
}

impl<B: FormBackend> FormDocument<B> {
    /// Open a PDF document from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::InvalidInput`] for empty input,
    /// [`ConvertError::ResourceLimitExceeded`] if the input is larger than
    /// `max_input_bytes`, and the backend's error (usually
    /// [`ConvertError::UnreadablePdf`]) if parsing fails.
    pub fn open(bytes: &[u8], options: Option<ConvertOptions>) -> Result<Self, ConvertError> {
        let options = options.unwrap_or_default();
        check_input(bytes, &options)?;
        let doc = B::open(bytes).map_err(Into::into)?;
        Ok(Self { doc, options })
    }

    /// Open an encrypted PDF document from bytes with a password.
    ///
    /// If the PDF is not encrypted, the password is ignored.
    ///
    /// # Errors
    ///
    /// Same as [`FormDocument::open`], plus [`ConvertError::InvalidPassword`].
    pub fn open_with_password(
        bytes: &[u8],
        password: &str,
        options: Option<ConvertOptions>,
    ) -> Result<Self, ConvertError> {
        let options = options.unwrap_or_default();
        check_input(bytes, &options)?;
        let doc = B::open_with_password(bytes, password).map_err(Into::into)?;
        Ok(Self { doc, options })
    }

    /// Open a PDF document from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::NotFound`] if the path does not exist and
    /// [`ConvertError::Io`] if it cannot be read; otherwise as
    /// [`FormDocument::open`].
    pub fn open_file(
        path: impl AsRef<Path>,
        options: Option<ConvertOptions>,
    ) -> Result<Self, ConvertError> {
        let bytes = read_pdf_file(path.as_ref())?;
        Self::open(&bytes, options)
    }

    /// Read the document's interactive form, `None` if it has none.
    pub fn form(&self) -> Result<Option<AcroForm>, ConvertError> {
        B::form(&self.doc, &self.options).map_err(Into::into)
    }

    /// The options this document was opened with.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }
}

impl<B: FormBackend> Drop for FormDocument<B> {
    fn drop(&mut self) {
        B::release(&mut self.doc);
    }
}

impl<B: FormBackend> std::fmt::Debug for FormDocument<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormDocument")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Validate raw input before handing it to the backend.
fn check_input(bytes: &[u8], options: &ConvertOptions) -> Result<(), ConvertError> {
    if bytes.is_empty() {
        return Err(ConvertError::InvalidInput("PDF file is empty".to_string()));
    }
    if let Some(max_bytes) = options.max_input_bytes {
        if bytes.len() > max_bytes {
            return Err(ConvertError::ResourceLimitExceeded {
                limit_name: "max_input_bytes".to_string(),
                limit_value: max_bytes,
                actual_value: bytes.len(),
            });
        }
    }
    Ok(())
}

/// Read a PDF file, reporting a missing path as [`ConvertError::NotFound`].
pub(crate) fn read_pdf_file(path: &Path) -> Result<Vec<u8>, ConvertError> {
    if !path.exists() {
        return Err(ConvertError::NotFound(format!(
            "PDF file not found: {}",
            path.display()
        )));
    }
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read PDF file");
    Ok(bytes)
}
