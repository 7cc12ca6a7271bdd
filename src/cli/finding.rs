//! Uniform view over lint violations and compile diagnostics for printing.

use enum_dispatch::enum_dispatch;

use crate::core::{CompileDiagnostic, CompileSeverity, LintViolation, Severity};

/// Where a finding points.
pub enum FindingLocation<'a> {
    /// A line in a Python source file.
    Source {
        path: &'a str,
        line: usize,
        column: Option<usize>,
    },
    /// A position recovered from a TeX log; either part may be unknown.
    Log {
        file: Option<&'a str>,
        line: Option<usize>,
        end_line: Option<usize>,
    },
}

impl FindingLocation<'_> {
    pub fn line(&self) -> Option<usize> {
        match self {
            FindingLocation::Source { line, .. } => Some(*line),
            FindingLocation::Log { line, .. } => *line,
        }
    }
}

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> FindingLocation<'_>;

    /// First line of the message.
    fn headline(&self) -> &str;

    fn severity(&self) -> Severity;

    /// Rule code, for lint findings.
    fn code(&self) -> Option<&str> {
        None
    }

    /// Remaining message lines, shown as notes.
    fn notes(&self) -> Vec<&str> {
        Vec::new()
    }

    fn help(&self) -> Option<&str> {
        None
    }

    /// Text of the offending source line, when the source is at hand.
    fn source_line(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct LintFinding {
    pub violation: LintViolation,
    pub source_line: Option<String>,
}

impl Report for LintFinding {
    fn location(&self) -> FindingLocation<'_> {
        FindingLocation::Source {
            path: &self.violation.location.file_path,
            line: self.violation.location.line,
            column: self.violation.column,
        }
    }

    fn headline(&self) -> &str {
        &self.violation.message
    }

    fn severity(&self) -> Severity {
        self.violation.severity
    }

    fn code(&self) -> Option<&str> {
        Some(&self.violation.rule)
    }

    fn help(&self) -> Option<&str> {
        self.violation.fix.as_deref()
    }

    fn source_line(&self) -> Option<&str> {
        self.source_line.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct CompileFinding {
    pub diagnostic: CompileDiagnostic,
}

impl Report for CompileFinding {
    fn location(&self) -> FindingLocation<'_> {
        FindingLocation::Log {
            file: self.diagnostic.source_file.as_deref(),
            line: self.diagnostic.line,
            end_line: self.diagnostic.end_line,
        }
    }

    fn headline(&self) -> &str {
        self.diagnostic.message.lines().next().unwrap_or_default()
    }

    fn severity(&self) -> Severity {
        match self.diagnostic.severity {
            CompileSeverity::Error => Severity::Error,
            CompileSeverity::Warning => Severity::Warning,
        }
    }

    fn notes(&self) -> Vec<&str> {
        self.diagnostic
            .message
            .lines()
            .skip(1)
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .collect()
    }
}

#[enum_dispatch(Report)]
#[derive(Debug, Clone)]
pub enum Finding {
    Lint(LintFinding),
    Compile(CompileFinding),
}

impl Finding {
    pub fn lint(violation: LintViolation, source_line: Option<String>) -> Self {
        Finding::Lint(LintFinding {
            violation,
            source_line,
        })
    }

    pub fn compile(diagnostic: CompileDiagnostic) -> Self {
        Finding::Compile(CompileFinding { diagnostic })
    }
}
