mod cli;
mod convert_cmd;
mod list_cmd;
mod shared;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Logs go to stderr; stdout carries the CSV.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formcsv=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Convert {
            ref file,
            ref output,
            ref password,
            max_input_bytes,
        } => convert_cmd::run(
            file,
            output.as_deref(),
            password.as_deref(),
            max_input_bytes,
        ),
        cli::Commands::List {
            ref dir,
            ref format,
        } => list_cmd::run(dir, format),
        cli::Commands::ConvertFromDir {
            ref name,
            ref dir,
            ref output,
        } => convert_cmd::run_from_dir(name, dir, output.as_deref()),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
