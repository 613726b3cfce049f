use std::io::{self, Write};
use std::path::{Path, PathBuf};

use formcsv::ConvertError;
use tracing::info;

/// Print a conversion error to stderr and map it to an exit code.
///
/// Client errors (bad input, no form, missing file) exit with 1; anything
/// else with 2.
pub fn report(err: &ConvertError) -> i32 {
    eprintln!("Error: {err}");
    exit_code(err)
}

pub fn exit_code(err: &ConvertError) -> i32 {
    if err.is_client_error() { 1 } else { 2 }
}

/// Where the CSV goes: `output` itself, `<output>/<default_name>` when
/// `output` is a directory, or stdout when `output` is `None`.
pub fn output_path(output: Option<&Path>, default_name: &str) -> Option<PathBuf> {
    output.map(|path| {
        if path.is_dir() {
            path.join(default_name)
        } else {
            path.to_path_buf()
        }
    })
}

/// Write CSV bytes to a file or stdout.
pub fn write_csv(csv: &[u8], output: Option<&Path>, default_name: &str) -> Result<(), i32> {
    match output_path(output, default_name) {
        Some(path) => {
            std::fs::write(&path, csv).map_err(|e| {
                report(&ConvertError::Io(format!("{}: {e}", path.display())))
            })?;
            info!(path = %path.display(), bytes = csv.len(), "wrote CSV");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(csv)
                .and_then(|()| stdout.flush())
                .map_err(|e| report(&ConvertError::from(e)))?;
        }
    }
    Ok(())
}
