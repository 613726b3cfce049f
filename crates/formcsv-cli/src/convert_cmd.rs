use std::path::Path;

use formcsv::{ConvertOptions, FormCsvConverter, PdfDirectory, csv_file_name};
use tracing::debug;

use crate::shared::{report, write_csv};

pub fn run(
    file: &Path,
    output: Option<&Path>,
    password: Option<&str>,
    max_input_bytes: Option<usize>,
) -> Result<(), i32> {
    let mut options = ConvertOptions::default();
    if let Some(limit) = max_input_bytes {
        options = options.with_max_input_bytes(limit);
    }
    let converter = FormCsvConverter::with_options(options);

    let csv = match password {
        Some(password) => converter.convert_file_with_password(file, password),
        None => converter.convert_file(file),
    }
    .map_err(|e| report(&e))?;

    write_csv(&csv, output, &csv_file_name(&file_name_of(file)))
}

pub fn run_from_dir(name: &str, dir: &Path, output: Option<&Path>) -> Result<(), i32> {
    debug!(dir = %dir.display(), name, "converting from input directory");
    let csv = PdfDirectory::new(dir)
        .convert(name, &FormCsvConverter::new())
        .map_err(|e| report(&e))?;

    write_csv(&csv, output, &csv_file_name(name))
}

fn file_name_of(file: &Path) -> String {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
