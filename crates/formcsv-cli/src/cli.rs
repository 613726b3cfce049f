use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Export the fields of fillable PDF forms as CSV.
#[derive(Debug, Parser)]
#[command(name = "formcsv", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert the form fields of a PDF to a two-row CSV
    Convert {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the CSV to this file, or into this directory as <stem>.csv. Default: stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Password for encrypted PDFs
        #[arg(long)]
        password: Option<String>,

        /// Reject inputs larger than this many bytes
        #[arg(long, value_name = "BYTES")]
        max_input_bytes: Option<usize>,
    },

    /// List the PDF files in the input directory
    List {
        /// Input directory
        #[arg(long, env = "FORMCSV_INPUT_DIR", default_value = ".")]
        dir: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },

    /// Convert a PDF from the input directory, addressed by file name
    ConvertFromDir {
        /// File name of the PDF inside the input directory
        #[arg(value_name = "NAME")]
        name: String,

        /// Input directory
        #[arg(long, env = "FORMCSV_INPUT_DIR", default_value = ".")]
        dir: PathBuf,

        /// Write the CSV to this file, or into this directory as <stem>.csv. Default: stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Output format for `list`.
#[derive(Debug, Clone, ValueEnum)]
pub enum ListFormat {
    /// One file name per line
    Text,
    /// JSON object with the directory and its files
    Json,
}
