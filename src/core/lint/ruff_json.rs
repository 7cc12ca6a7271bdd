//! ruff `--output-format json` decoding.

use serde::Deserialize;

use super::{LintFormatError, SeverityMap};
use crate::core::data::{LintViolation, Severity, SourceLocation};

/// Code used when ruff reports a syntax error without a rule code.
pub const SYNTAX_ERROR_CODE: &str = "syntax-error";

#[derive(Debug, Deserialize)]
struct RuffDiagnostic {
    code: Option<String>,
    message: String,
    filename: String,
    location: Option<RuffLocation>,
    fix: Option<RuffFix>,
}

#[derive(Debug, Deserialize)]
struct RuffLocation {
    row: usize,
    column: usize,
}

#[derive(Debug, Deserialize)]
struct RuffFix {
    message: Option<String>,
}

/// A JSON array of objects (or an empty array). Text output can also start
/// with `[`, as in `[*] 1 fixable` or a `[tool]` banner.
pub(super) fn looks_like_json(output: &str) -> bool {
    output
        .trim_start()
        .strip_prefix('[')
        .is_some_and(|rest| rest.trim_start().starts_with(['{', ']']))
}

/// Entries without a usable location are skipped.
pub(super) fn parse(output: &str, severities: &SeverityMap) -> Result<Vec<LintViolation>, LintFormatError> {
    let diagnostics: Vec<RuffDiagnostic> = serde_json::from_str(output)?;

    Ok(diagnostics
        .into_iter()
        .filter_map(|d| {
            let location = d.location.filter(|l| l.row >= 1)?;
            let (rule, severity) = match d.code {
                Some(code) => {
                    let severity = severities.severity_of(&code);
                    (code, severity)
                }
                None => (SYNTAX_ERROR_CODE.to_string(), Severity::Error),
            };
            Some(LintViolation {
                rule,
                message: d.message,
                severity,
                location: SourceLocation::new(d.filename, location.row),
                column: (location.column >= 1).then_some(location.column),
                fixable: d.fix.is_some(),
                fix: d.fix.and_then(|f| f.message),
            })
        })
        .collect())
}
