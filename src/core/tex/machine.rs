use std::mem;

use tracing::trace;

use super::file_stack::FileStack;
use super::markers::{self, Continuation, Marker};
use crate::core::data::CompileDiagnostic;
use crate::core::scanner::{Line, Lines};

/// TeX hard-wraps log output at this width.
const MAX_PRINT_LINE: usize = 79;

/// Upper bound on the physical lines a wrapped LaTeX warning may span.
const MAX_WRAPPED_LINES: usize = 4;

/// An error whose message is still being accumulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBlock {
    pub opened_at: usize,
    pub lines: Vec<String>,
    pub source_file: Option<String>,
    pub line: Option<usize>,
    /// The message ended at a blank line but no `l.N` context line has been
    /// seen yet. TeX prints help text between the two.
    pub awaiting_context: bool,
}

impl ErrorBlock {
    fn open(opened_at: usize, message: &str, source_file: Option<String>, line: Option<usize>) -> Self {
        Self {
            opened_at,
            lines: vec![message.to_string()],
            source_file,
            line: line.or_else(|| markers::line_word(message)),
            awaiting_context: false,
        }
    }

    fn push(&mut self, content: &str) {
        if self.line.is_none() {
            self.line = markers::context_line(content).or_else(|| {
                // "line nnn" only counts directly below the marker.
                (self.lines.len() == 1)
                    .then(|| markers::line_word(content))
                    .flatten()
            });
        }
        self.lines.push(content.trim_end().to_string());
    }

    fn into_diagnostic(self) -> CompileDiagnostic {
        CompileDiagnostic {
            source_file: self.source_file,
            line: self.line,
            ..CompileDiagnostic::error(self.lines.join("\n"))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParserState {
    #[default]
    Scanning,
    InErrorBlock(ErrorBlock),
}

/// Line-driven state machine over a TeX log.
///
/// Feed every line through [`TexLogMachine::step`], then call
/// [`TexLogMachine::finish`] to flush an error block left open at end of log.
#[derive(Debug, Default)]
pub struct TexLogMachine {
    state: ParserState,
    files: FileStack,
    diagnostics: Vec<CompileDiagnostic>,
}

impl TexLogMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    pub fn files(&self) -> &FileStack {
        &self.files
    }

    pub fn diagnostics(&self) -> &[CompileDiagnostic] {
        &self.diagnostics
    }

    /// Handle `line`, consuming continuation lines from `rest` when a
    /// warning wraps.
    pub fn step(&mut self, line: Line<'_>, rest: &mut Lines<'_>) {
        let marker = markers::match_marker(line.content);

        if let ParserState::InErrorBlock(mut block) = mem::take(&mut self.state) {
            if marker.is_some() {
                trace!(line = line.number, opened_at = block.opened_at, "marker closes error block");
                self.diagnostics.push(block.into_diagnostic());
            } else if block.awaiting_context {
                if let Some(number) = markers::context_line(line.content) {
                    block.line = Some(number);
                    self.diagnostics.push(block.into_diagnostic());
                } else {
                    self.files.track(line.content);
                    self.state = ParserState::InErrorBlock(block);
                }
                return;
            } else if line.is_blank() {
                if block.line.is_some() {
                    self.diagnostics.push(block.into_diagnostic());
                } else {
                    block.awaiting_context = true;
                    self.state = ParserState::InErrorBlock(block);
                }
                return;
            } else {
                block.push(line.content);
                self.state = ParserState::InErrorBlock(block);
                return;
            }
        }

        match marker {
            Some(Marker::Error { message }) => {
                let file = self.files.current().map(str::to_string);
                self.state =
                    ParserState::InErrorBlock(ErrorBlock::open(line.number, message, file, None));
            }
            Some(Marker::FileLineError {
                file,
                line: number,
                message,
            }) => {
                self.state = ParserState::InErrorBlock(ErrorBlock::open(
                    line.number,
                    message,
                    Some(file.to_string()),
                    Some(number),
                ));
            }
            Some(Marker::Warning {
                start,
                text,
                continuation,
            }) => {
                self.files.track(&line.content[..start]);
                let message = read_warning(text, &continuation, rest);
                let (message, number) = markers::split_input_line(&message);
                self.diagnostics.push(CompileDiagnostic {
                    source_file: self.files.current().map(str::to_string),
                    line: number,
                    ..CompileDiagnostic::warning(message)
                });
            }
            Some(Marker::BadBox {
                text,
                line: number,
                end_line,
            }) => {
                self.diagnostics.push(CompileDiagnostic {
                    source_file: self.files.current().map(str::to_string),
                    line: number,
                    end_line,
                    ..CompileDiagnostic::warning(text)
                });
                skip_box_dump(rest);
            }
            None => self.files.track(line.content),
        }
    }

    pub fn finish(mut self) -> Vec<CompileDiagnostic> {
        if let ParserState::InErrorBlock(block) = mem::take(&mut self.state) {
            trace!(opened_at = block.opened_at, "error block closed by end of log");
            self.diagnostics.push(block.into_diagnostic());
        }
        self.diagnostics
    }
}

fn read_warning(text: &str, continuation: &Continuation, rest: &mut Lines<'_>) -> String {
    let mut message = text.to_string();
    match continuation {
        Continuation::Prefixed(name) => {
            let prefix = format!("({name})");
            while let Some(next) = rest.next_if(|l| l.content.starts_with(&prefix)) {
                let tail = next.content[prefix.len()..].trim();
                if !tail.is_empty() {
                    message.push(' ');
                    message.push_str(tail);
                }
            }
        }
        Continuation::Sentence => {
            let mut previous_len = text.chars().count();
            for _ in 0..MAX_WRAPPED_LINES {
                if message.ends_with('.') {
                    break;
                }
                let Some(next) = rest.next_if(|l| {
                    !l.is_blank()
                        && markers::match_marker(l.content).is_none()
                        && !FileStack::is_file_event(l.content)
                }) else {
                    break;
                };
                if previous_len < MAX_PRINT_LINE {
                    message.push(' ');
                }
                message.push_str(next.content.trim());
                previous_len = next.content.chars().count();
            }
        }
        Continuation::Single => {}
    }
    message
}

/// Box reports are followed by a dump of the offending material up to a
/// blank line.
fn skip_box_dump(rest: &mut Lines<'_>) {
    while rest
        .next_if(|l| !l.is_blank() && markers::match_marker(l.content).is_none())
        .is_some()
    {}
}
