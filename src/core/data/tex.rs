use std::fmt;

use serde::Serialize;

/// TeX diagnostics are either errors or warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompileSeverity {
    Error,
    Warning,
}

impl fmt::Display for CompileSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileSeverity::Error => write!(f, "error"),
            CompileSeverity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileDiagnostic {
    pub severity: CompileSeverity,
    pub message: String,
    /// File that was on top of the log's file stack, when known.
    pub source_file: Option<String>,
    pub line: Option<usize>,
    /// Last line of a range, for box warnings reported "at lines a--b".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
}

impl CompileDiagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: CompileSeverity::Error,
            message: message.into(),
            source_file: None,
            line: None,
            end_line: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: CompileSeverity::Warning,
            ..Self::error(message)
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == CompileSeverity::Error
    }
}
