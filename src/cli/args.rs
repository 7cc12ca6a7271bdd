//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `analyze`: Extract imports, functions and lint findings from Python files
//! - `lint`: Normalize captured linter output
//! - `tex`: Build a compilation report from a TeX log
//! - `init`: Initialize diagnost configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Analyze(cmd)) => cmd.common.verbose,
            Some(Command::Lint(cmd)) => cmd.common.verbose,
            Some(Command::Tex(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Cargo-style report
    #[default]
    Human,
    /// Pretty-printed JSON on stdout
    Json,
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct AnalyzeCommand {
    /// Python files or directories to analyze
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Captured linter output covering these files (ruff, flake8 or pylint)
    #[arg(long)]
    pub lint_output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct LintCommand {
    /// File holding linter output, or `-` for stdin
    pub input: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct TexCommand {
    /// Compiler log file
    pub log: PathBuf,

    /// Exit code of the compiler process (omit if the compiler did not run)
    #[arg(long, allow_hyphen_values = true)]
    pub exit_code: Option<i32>,

    /// Output file the compiler was asked to produce
    #[arg(long)]
    pub artifact: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze Python sources: imports, function signatures and lint findings
    Analyze(AnalyzeCommand),
    /// Normalize captured linter output into structured violations
    Lint(LintCommand),
    /// Report errors and warnings from a TeX compiler log
    Tex(TexCommand),
    /// Initialize a new .diagnostrc.json configuration file
    Init,
}
