use std::{io, process::ExitCode};

use clap::Parser;
use diagnost::cli::{Arguments, ExitStatus};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter, e.g. `DIAGNOST_LOG=trace`.
const LOG_ENV: &str = "DIAGNOST_LOG";

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_tracing(args.verbose());

    match diagnost::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "diagnost=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
