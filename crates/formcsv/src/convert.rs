//! Form-to-CSV conversion.

use std::io::Read;
use std::marker::PhantomData;
use std::path::Path;

use formcsv_core::{ConvertError, ConvertOptions, encode_fields};
use formcsv_parse::{FormBackend, LopdfBackend};
use tracing::{debug, info};

use crate::document::{FormDocument, read_pdf_file};

/// Converts the form fields of a PDF into a two-row CSV document.
///
/// Row one holds the fully qualified names of all terminal fields in
/// depth-first document order, row two holds their values. The converter
/// keeps no state between calls and may be shared across threads.
///
/// # Example
///
/// ```ignore
/// let converter = FormCsvConverter::new();
/// let csv = converter.convert(&pdf_bytes)?;
/// assert!(csv.ends_with(b"\n"));
/// ```
pub struct FormCsvConverter<B: FormBackend = LopdfBackend> {
    options: ConvertOptions,
    _backend: PhantomData<fn() -> B>,
}

impl FormCsvConverter {
    /// Create a converter with default options, backed by lopdf.
    pub fn new() -> Self {
        Self::with_options(ConvertOptions::default())
    }

    /// Create a converter with the given options, backed by lopdf.
    pub fn with_options(options: ConvertOptions) -> Self {
        Self::for_backend(options)
    }
}

impl Default for FormCsvConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: FormBackend> FormCsvConverter<B> {
    /// Create a converter using backend `B`.
    pub fn for_backend(options: ConvertOptions) -> Self {
        Self {
            options,
            _backend: PhantomData,
        }
    }

    /// The options applied to every conversion.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert PDF bytes to CSV bytes (UTF-8).
    ///
    /// # Errors
    ///
    /// - [`ConvertError::InvalidInput`] if `bytes` is empty.
    /// - [`ConvertError::ResourceLimitExceeded`] if `bytes` exceeds `max_input_bytes`.
    /// - [`ConvertError::UnreadablePdf`] if the bytes cannot be parsed.
    /// - [`ConvertError::PasswordRequired`] if the document is encrypted.
    /// - [`ConvertError::NoForm`] if the document has no interactive form.
    /// - [`ConvertError::NoFields`] if the form has no terminal fields.
    pub fn convert(&self, bytes: &[u8]) -> Result<Vec<u8>, ConvertError> {
        let doc = FormDocument::<B>::open(bytes, Some(self.options.clone()))?;
        form_to_csv(&doc)
    }

    /// Convert an encrypted PDF, decrypting it with `password`.
    ///
    /// # Errors
    ///
    /// As [`FormCsvConverter::convert`], plus [`ConvertError::InvalidPassword`].
    pub fn convert_with_password(
        &self,
        bytes: &[u8],
        password: &str,
    ) -> Result<Vec<u8>, ConvertError> {
        let doc = FormDocument::<B>::open_with_password(bytes, password, Some(self.options.clone()))?;
        form_to_csv(&doc)
    }

    /// Read a PDF from `reader` and convert it.
    pub fn convert_reader(&self, mut reader: impl Read) -> Result<Vec<u8>, ConvertError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.convert(&bytes)
    }

    /// Read a PDF file and convert it.
    ///
    /// # Errors
    ///
    /// [`ConvertError::NotFound`] if `path` does not exist; otherwise as
    /// [`FormCsvConverter::convert`].
    pub fn convert_file(&self, path: impl AsRef<Path>) -> Result<Vec<u8>, ConvertError> {
        let bytes = read_pdf_file(path.as_ref())?;
        self.convert(&bytes)
    }

    /// Read an encrypted PDF file and convert it, decrypting with `password`.
    ///
    /// # Errors
    ///
    /// As [`FormCsvConverter::convert_file`], plus
    /// [`ConvertError::InvalidPassword`].
    pub fn convert_file_with_password(
        &self,
        path: impl AsRef<Path>,
        password: &str,
    ) -> Result<Vec<u8>, ConvertError> {
        let bytes = read_pdf_file(path.as_ref())?;
        self.convert_with_password(&bytes, password)
    }
}

impl<B: FormBackend> Clone for FormCsvConverter<B> {
    fn clone(&self) -> Self {
        Self::for_backend(self.options.clone())
    }
}

impl<B: FormBackend> std::fmt::Debug for FormCsvConverter<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormCsvConverter")
            .field("options", &self.options)
            .finish()
    }
}

/// Convert PDF bytes with default options.
///
/// Shorthand for `FormCsvConverter::new().convert(bytes)`.
pub fn convert_form_fields_to_csv(bytes: &[u8]) -> Result<Vec<u8>, ConvertError> {
    FormCsvConverter::new().convert(bytes)
}

fn form_to_csv<B: FormBackend>(doc: &FormDocument<B>) -> Result<Vec<u8>, ConvertError> {
    let form = doc.form()?.ok_or(ConvertError::NoForm)?;
    let fields: Vec<_> = form.terminals().collect();
    if fields.is_empty() {
        return Err(ConvertError::NoFields);
    }
    debug!(
        roots = form.fields.len(),
        terminals = fields.len(),
        "collected form fields"
    );

    let csv = encode_fields(&fields);
    info!(fields = fields.len(), bytes = csv.len(), "converted form to CSV");
    Ok(csv.into_bytes())
}
