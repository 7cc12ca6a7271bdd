//! Python logical lines.
//!
//! Physical lines are joined while a bracket or triple-quoted string is open
//! or the line ends with `\`. Comments are dropped and simple statements
//! separated by `;` come out one at a time.
//!
//! A construct still open at end-of-text is yielded with `terminated: false`
//! and the scan resumes on the line after its start, so one unclosed bracket
//! cannot hide the rest of the file. An unclosed triple-quoted string is the
//! exception: everything after its opening quotes is string content.

use std::collections::VecDeque;

use tracing::trace;

use super::nesting::{NestingState, split_top_level};
use super::{LineKind, Lines, Scanner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// First physical line.
    pub start: usize,
    /// Last physical line consumed.
    pub end: usize,
    /// Indentation of the first physical line.
    pub indent: usize,
    /// Joined text without indentation, comments or continuation markers.
    pub text: String,
    /// False when end-of-text was reached inside the construct.
    pub terminated: bool,
}

pub struct Statements<'a> {
    scanner: Scanner<'a>,
    lines: Lines<'a>,
    pending: VecDeque<Statement>,
}

impl<'a> Statements<'a> {
    pub(super) fn new(scanner: Scanner<'a>) -> Self {
        Self {
            scanner,
            lines: scanner.lines(),
            pending: VecDeque::new(),
        }
    }

    /// Join physical lines from `first`. The flag is set when end-of-text
    /// was reached inside a triple-quoted string.
    fn join(&mut self, first: super::Line<'a>) -> (Statement, bool) {
        let mut state = NestingState::default();
        let mut text = String::new();
        let mut end = first.number;
        let mut line = first;

        let terminated = loop {
            let joined_in_string = state.in_triple_string();
            let feed = state.feed_line(line.content);

            if text.is_empty() {
                text.push_str(feed.code.trim_start());
            } else if joined_in_string {
                text.push('\n');
                text.push_str(feed.code);
            } else if !feed.code.trim().is_empty() {
                text.push(' ');
                text.push_str(feed.code.trim_start());
            }

            if !feed.continues {
                break true;
            }
            match self.lines.next() {
                Some(next) => {
                    end = next.number;
                    line = next;
                }
                None => break false,
            }
        };
        let open_string = !terminated && state.in_triple_string();

        let statement = Statement {
            start: first.number,
            end,
            indent: first.indent(),
            text: text.trim_end().to_string(),
            terminated,
        };
        (statement, open_string)
    }

    fn queue(&mut self, statement: Statement) {
        let parts = split_top_level(&statement.text, ';').filter(|parts| parts.len() > 1);
        match parts {
            Some(parts) => {
                for part in parts {
                    self.pending.push_back(Statement {
                        text: part.to_string(),
                        ..statement.clone()
                    });
                }
            }
            None => self.pending.push_back(statement),
        }
    }
}

impl Iterator for Statements<'_> {
    type Item = Statement;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending.is_empty() {
            let first = self.lines.next()?;
            if first.kind() != LineKind::Code {
                continue;
            }

            let (statement, open_string) = self.join(first);
            if !statement.terminated && !open_string {
                trace!(
                    line = statement.start,
                    "unterminated construct, resuming scan on next line"
                );
                self.lines = self.scanner.lines_from(statement.start + 1);
            }
            self.queue(statement);
        }
        self.pending.pop_front()
    }
}
