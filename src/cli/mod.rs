//! Command-line interface layer.
//!
//! ## Module Structure
//!
//! - `args`: clap argument definitions
//! - `commands`: one handler per subcommand
//! - `file_scanner`: expands paths into Python files
//! - `finding`: printable view over lint and compile findings
//! - `report`: cargo-style output

mod args;
mod commands;
mod exit_status;
mod file_scanner;
mod finding;
mod report;

use anyhow::Result;

pub use args::{Arguments, Command, CommonArgs, OutputFormat};
pub use exit_status::ExitStatus;

use commands::{analyze::analyze, init::init, lint::lint, tex::tex};

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(Arguments {
        command: Some(command),
    }) = args.with_command_or_help()
    else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Command::Analyze(cmd) => analyze(cmd),
        Command::Lint(cmd) => lint(cmd),
        Command::Tex(cmd) => tex(cmd),
        Command::Init => init(),
    }
}
