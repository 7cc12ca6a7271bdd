//! Linter output normalization.
//!
//! Understands the line formats printed by ruff, flake8 and pylint
//! (`<file>:<line>[:<col>]: <code> <message>`), ruff's newer two-line
//! header (`<code> <message>` then `--> <file>:<line>:<col>`), and ruff's JSON
//! output. Anything else in the output is ignored.

mod ruff_json;
mod severity_map;

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;
use tracing::debug;

pub use ruff_json::SYNTAX_ERROR_CODE;
pub use severity_map::SeverityMap;

use crate::core::data::{LintViolation, SourceLocation};
use crate::core::scanner::{Line, Lines, Scanner};

static VIOLATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<file>.+?):(?P<line>\d+)(?::(?P<col>\d+))?:\s*(?P<code>[A-Z]+[0-9]+):?\s+(?P<fixable>\[\*\]\s*)?(?P<message>.*)$",
    )
    .unwrap()
});

/// First line of ruff's full format since 0.12: `F401 [*] message`.
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<code>[A-Z]+[0-9]+)\s+(?P<fixable>\[\*\]\s*)?(?P<message>.*)$").unwrap()
});

static ARROW_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-->\s*(?P<file>.+?):(?P<line>\d+)(?::(?P<col>\d+))?\s*$").unwrap()
});

static HELP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:=\s*)?help:\s*(?P<help>.+?)\s*$").unwrap());

#[derive(Debug, Error)]
pub enum LintFormatError {
    #[error("invalid ruff JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Turns captured linter output into [`LintViolation`]s.
#[derive(Debug, Clone, Copy)]
pub struct LintNormalizer<'m> {
    severities: &'m SeverityMap,
}

impl<'m> LintNormalizer<'m> {
    pub fn new(severities: &'m SeverityMap) -> Self {
        Self { severities }
    }

    /// Normalize output in any supported format.
    ///
    /// Output starting with a JSON array is decoded as ruff JSON; a decoding
    /// failure is an error rather than an empty result.
    pub fn normalize(&self, output: &str) -> Result<Vec<LintViolation>, LintFormatError> {
        if ruff_json::looks_like_json(output) {
            let violations = ruff_json::parse(output, self.severities)?;
            return Ok(order_by_file_then_line(violations));
        }
        Ok(self.normalize_text(output))
    }

    /// Normalize line-based output. Never fails; unmatched lines are skipped.
    pub fn normalize_text(&self, output: &str) -> Vec<LintViolation> {
        let scanner = Scanner::new(output);
        let mut lines = scanner.lines();
        let mut violations = Vec::new();

        while let Some(line) = lines.next() {
            let Some(mut violation) = self.match_violation(line, &mut lines) else {
                continue;
            };
            violation.fix = take_help(&mut lines);
            violations.push(violation);
        }

        order_by_file_then_line(violations)
    }

    fn match_violation(&self, line: Line<'_>, lines: &mut Lines<'_>) -> Option<LintViolation> {
        if let Some(caps) = VIOLATION_REGEX.captures(line.content) {
            return self.build(&caps, &caps);
        }

        let header = HEADER_REGEX.captures(line.content.trim_end())?;
        let arrow = lines
            .peek()
            .and_then(|next| ARROW_REGEX.captures(next.content))?;
        let violation = self.build(&header, &arrow);
        lines.next();
        violation
    }

    /// `head` supplies code, marker and message; `position` supplies file,
    /// line and column.
    fn build(&self, head: &Captures<'_>, position: &Captures<'_>) -> Option<LintViolation> {
        let line: usize = position.name("line")?.as_str().parse().ok()?;
        if line == 0 {
            return None;
        }
        let code = head.name("code")?.as_str();
        Some(LintViolation {
            rule: code.to_string(),
            message: head.name("message").map_or("", |m| m.as_str()).trim().to_string(),
            severity: self.severities.severity_of(code),
            location: SourceLocation::new(position.name("file")?.as_str().trim(), line),
            column: position
                .name("col")
                .and_then(|c| c.as_str().parse().ok())
                .filter(|c| *c >= 1),
            fixable: head.name("fixable").is_some(),
            fix: None,
        })
    }
}

/// Consume the detail lines that follow a violation and return its help text.
fn take_help(lines: &mut Lines<'_>) -> Option<String> {
    let mut help = None;
    while let Some(next) = lines.peek() {
        if VIOLATION_REGEX.is_match(next.content) || HEADER_REGEX.is_match(next.content.trim_end()) {
            break;
        }
        if help.is_none()
            && let Some(caps) = HELP_REGEX.captures(next.content)
        {
            help = caps.name("help").map(|m| m.as_str().to_string());
        }
        lines.next();
    }
    help
}

/// Files keep their first-seen order; violations within a file are sorted
/// by line, ties in output order.
fn order_by_file_then_line(mut violations: Vec<LintViolation>) -> Vec<LintViolation> {
    let mut rank: HashMap<String, usize> = HashMap::new();
    for v in &violations {
        let next = rank.len();
        rank.entry(v.location.file_path.clone()).or_insert(next);
    }
    violations.sort_by_key(|v| (rank[&v.location.file_path], v.location.line));
    if violations.is_empty() {
        debug!("linter output contained no violations");
    }
    violations
}

/// Normalize with a caller-supplied severity table.
pub fn normalize_output(
    output: &str,
    severities: &SeverityMap,
) -> Result<Vec<LintViolation>, LintFormatError> {
    LintNormalizer::new(severities).normalize(output)
}
