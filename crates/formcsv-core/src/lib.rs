//! formcsv-core: Backend-independent data types and algorithms.
//!
//! This crate provides the form field tree ([`FieldNode`], [`TerminalField`]),
//! the pre-order collector over that tree, the CSV encoder, and the error
//! taxonomy shared by every formcsv crate. It has no runtime dependencies.

pub mod collect;
pub mod encode;
pub mod error;
pub mod field;
pub mod options;

pub use collect::{Terminals, collect_terminal_fields};
pub use encode::{encode_fields, encode_pairs, encode_row, escape_cell};
pub use error::ConvertError;
pub use field::{AcroForm, FieldNode, FieldType, TerminalField};
pub use options::ConvertOptions;
