//! PDF parsing backend trait.
//!
//! Defines the [`FormBackend`] trait that abstracts the PDF library: open a
//! document, read its interactive form as a field tree, release it.

use formcsv_core::{AcroForm, ConvertError, ConvertOptions};

/// Trait abstracting the PDF operations form conversion needs.
///
/// # Associated Types
///
/// - `Document`: The parsed PDF document representation.
/// - `Error`: Backend-specific error type, convertible to [`ConvertError`].
///
/// # Usage
///
/// ```ignore
/// let mut doc = MyBackend::open(pdf_bytes)?;
/// let form = MyBackend::form(&doc, &ConvertOptions::default())?;
/// MyBackend::release(&mut doc);
/// ```
pub trait FormBackend {
    /// The parsed PDF document type.
    type Document;

    /// Backend-specific error type, convertible to [`ConvertError`].
    type Error: std::error::Error + Into<ConvertError>;

    /// Parse PDF bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid PDF document, or if the
    /// document is encrypted.
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    /// Parse and decrypt PDF bytes with a password.
    ///
    /// The password is ignored for unencrypted documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid PDF document or the
    /// password is wrong.
    fn open_with_password(bytes: &[u8], password: &str) -> Result<Self::Document, Self::Error>;

    /// Read the document's interactive form.
    ///
    /// Returns `Ok(None)` when the document has no `/AcroForm`. The root
    /// field list keeps document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the document was already released.
    fn form(doc: &Self::Document, options: &ConvertOptions)
    -> Result<Option<AcroForm>, Self::Error>;

    /// Release the document's parsed data. Calling it more than once is a no-op.
    fn release(doc: &mut Self::Document);
}
