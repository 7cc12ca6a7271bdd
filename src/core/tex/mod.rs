//! Compile diagnostics from TeX and LaTeX log files.
//!
//! The log is read as a sequence of lines by [`TexLogMachine`], which is
//! either scanning for the next marker or accumulating an error message.
//! File attribution comes from a [`FileStack`] rebuilt from the parentheses
//! TeX prints around every input file it opens.
//!
//! Diagnostics keep log order. Their line numbers point into different
//! source files, so a global sort by line would be meaningless.

mod file_stack;
mod machine;
mod markers;

pub use file_stack::FileStack;
pub use machine::{ErrorBlock, ParserState, TexLogMachine};
pub use markers::{Continuation, Marker, match_marker};

use tracing::debug;

use super::data::CompileDiagnostic;
use super::scanner::Scanner;

pub fn parse_log(log: &str) -> Vec<CompileDiagnostic> {
    let scanner = Scanner::new(log);
    let mut lines = scanner.lines();
    let mut machine = TexLogMachine::new();
    while let Some(line) = lines.next() {
        machine.step(line, &mut lines);
    }

    let diagnostics = machine.finish();
    debug!(
        lines = scanner.line_count(),
        diagnostics = diagnostics.len(),
        "parsed TeX log"
    );
    diagnostics
}
