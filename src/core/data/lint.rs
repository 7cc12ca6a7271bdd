use std::fmt;

use serde::{Deserialize, Serialize};

use super::source::SourceLocation;

/// Severity level of a lint violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintViolation {
    /// Rule code as printed by the linter (`E501`, `F401`, `PLR0913`).
    pub rule: String,
    pub message: String,
    pub severity: Severity,
    pub location: SourceLocation,
    /// 1-based column, when the linter reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// The linter flagged this violation as auto-fixable.
    pub fixable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}
