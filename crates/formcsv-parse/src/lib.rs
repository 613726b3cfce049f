//! formcsv-parse: PDF parsing backend for form field extraction.
//!
//! This crate defines the [`FormBackend`] trait, the seam between formcsv and
//! the PDF library, and implements it with [`lopdf`] in [`LopdfBackend`].
//! It depends on formcsv-core for the field tree and error types.

pub mod backend;
pub mod error;
pub mod lopdf_backend;
mod text;

pub use backend::FormBackend;
pub use error::BackendError;
pub use formcsv_core;
pub use lopdf_backend::{LopdfBackend, LopdfDocument};
