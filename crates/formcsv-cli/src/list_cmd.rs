use std::path::Path;

use formcsv::PdfDirectory;

use crate::cli::ListFormat;
use crate::shared::report;

pub fn run(dir: &Path, format: &ListFormat) -> Result<(), i32> {
    let names = PdfDirectory::new(dir).list_pdfs().map_err(|e| report(&e))?;

    match format {
        ListFormat::Text => {
            for name in &names {
                println!("{name}");
            }
        }
        ListFormat::Json => {
            let value = serde_json::json!({
                "directory": dir.display().to_string(),
                "count": names.len(),
                "files": names,
            });
            let json = serde_json::to_string_pretty(&value).map_err(|e| {
                eprintln!("Error: failed to serialize JSON: {e}");
                2
            })?;
            println!("{json}");
        }
    }
    Ok(())
}
