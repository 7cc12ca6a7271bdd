//! Line-oriented scanning shared by every extractor.
//!
//! A [`Scanner`] borrows the input text and hands out fresh iterators on
//! every call, so two scans of the same text never share state.
//!
//! ## Module Structure
//!
//! - `nesting`: bracket depth and string-literal tracking, top-level splitting
//! - `statements`: joins physical lines into Python logical lines

mod nesting;
mod statements;

pub use nesting::{NestingState, find_top_level, matching_close, split_top_level};
pub use statements::{Statement, Statements};

const TAB_WIDTH: usize = 8;

/// How a physical line reads before any multi-line context is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// First non-whitespace character is `#`.
    Comment,
    Code,
}

/// One physical line. `content` never includes the line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub content: &'a str,
}

impl<'a> Line<'a> {
    pub fn kind(&self) -> LineKind {
        let trimmed = self.content.trim_start();
        if trimmed.is_empty() {
            LineKind::Blank
        } else if trimmed.starts_with('#') {
            LineKind::Comment
        } else {
            LineKind::Code
        }
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Indentation width, with tabs advancing to the next multiple of eight.
    pub fn indent(&self) -> usize {
        let mut width = 0;
        for c in self.content.chars() {
            match c {
                ' ' => width += 1,
                '\t' => width = (width / TAB_WIDTH + 1) * TAB_WIDTH,
                '\x0c' => width = 0,
                _ => break,
            }
        }
        width
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Scanner<'a> {
    text: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn lines(&self) -> Lines<'a> {
        self.lines_from(1)
    }

    /// Scan starting at physical line `first` (1-based).
    pub fn lines_from(&self, first: usize) -> Lines<'a> {
        let mut inner = self.text.lines();
        for _ in 1..first {
            if inner.next().is_none() {
                break;
            }
        }
        Lines {
            inner,
            next_number: first.max(1),
            peeked: None,
        }
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    pub fn statements(&self) -> Statements<'a> {
        Statements::new(*self)
    }
}

/// Lazy, peekable sequence of [`Line`]s.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    inner: std::str::Lines<'a>,
    next_number: usize,
    peeked: Option<Option<Line<'a>>>,
}

impl<'a> Lines<'a> {
    pub fn peek(&mut self) -> Option<&Line<'a>> {
        if self.peeked.is_none() {
            let line = self.advance();
            self.peeked = Some(line);
        }
        self.peeked.as_ref().and_then(Option::as_ref)
    }

    /// Consume the next line only if `pred` accepts it.
    pub fn next_if(&mut self, pred: impl FnOnce(&Line<'a>) -> bool) -> Option<Line<'a>> {
        match self.peek() {
            Some(line) if pred(line) => self.next(),
            _ => None,
        }
    }

    fn advance(&mut self) -> Option<Line<'a>> {
        let content = self.inner.next()?;
        let line = Line {
            number: self.next_number,
            content,
        };
        self.next_number += 1;
        Some(line)
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.peeked.take() {
            Some(line) => line,
            None => self.advance(),
        }
    }
}
