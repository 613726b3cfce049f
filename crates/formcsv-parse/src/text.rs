//! Decoding of PDF text strings (`/T`, `/V` and friends).
//!
//! A text string is UTF-16BE when it starts with the `FE FF` byte order
//! mark, UTF-8 when it starts with `EF BB BF` (PDF 2.0), and
//! PDFDocEncoding otherwise.

use encoding_rs::{UTF_8, UTF_16BE, WINDOWS_1252};

/// Decode the raw bytes of a PDF text string.
///
/// PDFDocEncoding strings are decoded as UTF-8 when they happen to be valid
/// UTF-8 (common for producers that ignore the encoding rules), and as
/// Windows-1252 otherwise, which matches PDFDocEncoding for printable text.
pub(crate) fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let (text, _) = UTF_16BE.decode_without_bom_handling(rest);
        return text.into_owned();
    }
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        let (text, _) = UTF_8.decode_without_bom_handling(rest);
        return text.into_owned();
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text.into_owned()
        }
    }
}
