//! A directory of PDF forms addressed by bare file name.

use std::path::{Path, PathBuf};

use formcsv_core::ConvertError;
use formcsv_parse::FormBackend;
use tracing::debug;

use crate::convert::FormCsvConverter;

/// A configured input directory holding PDF forms.
///
/// Files are addressed by bare name; names that would escape the directory
/// are rejected.
#[derive(Debug, Clone)]
pub struct PdfDirectory {
    root: PathBuf,
}

impl PdfDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List the PDF files in the directory, sorted by name.
    ///
    /// Only regular files whose extension is `pdf` (any case) are listed.
    /// Subdirectories are not searched.
    pub fn list_pdfs(&self) -> Result<Vec<String>, ConvertError> {
        if !self.root.exists() {
            return Err(ConvertError::NotFound(format!(
                "input directory not found: {}",
                self.root.display()
            )));
        }
        if !self.root.is_dir() {
            return Err(ConvertError::InvalidInput(format!(
                "not a directory: {}",
                self.root.display()
            )));
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file() && has_pdf_extension(&path) {
                // Every listed name must round-trip through `resolve(&str)`.
                match path.file_name().and_then(|name| name.to_str()) {
                    Some(name) => names.push(name.to_string()),
                    None => debug!(path = %path.display(), "skipping PDF with non-UTF-8 name"),
                }
            }
        }
        names.sort();
        debug!(dir = %self.root.display(), count = names.len(), "listed PDF files");
        Ok(names)
    }

    /// Resolve a bare file name to a path inside the directory.
    ///
    /// # Errors
    ///
    /// [`ConvertError::InvalidInput`] if the name is empty, contains a path
    /// separator or is a relative component; [`ConvertError::NotFound`] if no
    /// such file exists.
    pub fn resolve(&self, file_name: &str) -> Result<PathBuf, ConvertError> {
        if file_name.is_empty()
            || file_name.contains(['/', '\\'])
            || file_name == "."
            || file_name == ".."
        {
            return Err(ConvertError::InvalidInput(format!(
                "invalid PDF file name: {file_name:?}"
            )));
        }
        let path = self.root.join(file_name);
        if !path.is_file() {
            return Err(ConvertError::NotFound(format!(
                "PDF file not found: {}",
                path.display()
            )));
        }
        Ok(path)
    }

    /// Resolve `file_name` and convert it with `converter`.
    pub fn convert<B: FormBackend>(
        &self,
        file_name: &str,
        converter: &FormCsvConverter<B>,
    ) -> Result<Vec<u8>, ConvertError> {
        let path = self.resolve(file_name)?;
        converter.convert_file(path)
    }
}

/// Name of the CSV produced from a PDF: the PDF's stem with a `.csv` extension.
///
/// ```ignore
/// assert_eq!(csv_file_name("form1.pdf"), "form1.csv");
/// ```
pub fn csv_file_name(pdf_name: &str) -> String {
    let stem = Path::new(pdf_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    if stem.is_empty() {
        "form.csv".to_string()
    } else {
        format!("{stem}.csv")
    }
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
