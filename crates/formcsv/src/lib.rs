//! formcsv: Export the fields of fillable PDF forms as CSV.
//!
//! This is the public API facade crate for formcsv. It re-exports types from
//! formcsv-core and uses formcsv-parse for PDF reading.
//!
//! # Architecture
//!
//! - **formcsv-core**: Field tree, collector, CSV encoder, error taxonomy
//! - **formcsv-parse**: PDF backend trait and the lopdf implementation
//! - **formcsv** (this crate): Scoped document handle, conversion, directory helper
//!
//! # Example
//!
//! ```ignore
//! let csv = formcsv::convert_form_fields_to_csv(&std::fs::read("form.pdf")?)?;
//! ```

mod convert;
mod directory;
mod document;

pub use convert::{FormCsvConverter, convert_form_fields_to_csv};
pub use directory::{PdfDirectory, csv_file_name};
pub use document::FormDocument;
pub use formcsv_core::{
    AcroForm, ConvertError, ConvertOptions, FieldNode, FieldType, TerminalField, Terminals,
    collect_terminal_fields, encode_fields, encode_pairs, escape_cell,
};
pub use formcsv_parse::{BackendError, FormBackend, LopdfBackend, LopdfDocument};
