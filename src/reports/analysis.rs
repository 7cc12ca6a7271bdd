use serde::Serialize;
use tracing::debug;

use crate::core::data::{FunctionRecord, ImportRecord, LintViolation, Severity};
use crate::core::lint::{LintNormalizer, SeverityMap};
use crate::core::python::{extract_functions, extract_imports};
use crate::core::scanner::Scanner;

/// What the caller got back from the linter for this file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintInput<'a> {
    /// Captured linter stdout, possibly covering several files.
    Output(&'a str),
    /// The linter never ran. Carries the reason.
    Unavailable(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisStatus {
    Clean,
    HasWarnings,
    HasErrors,
}

impl AnalysisStatus {
    /// Errors win over warnings; info-level findings leave a file clean.
    pub fn from_violations(violations: &[LintViolation]) -> Self {
        if violations.iter().any(|v| v.severity == Severity::Error) {
            AnalysisStatus::HasErrors
        } else if violations.iter().any(|v| v.severity == Severity::Warning) {
            AnalysisStatus::HasWarnings
        } else {
            AnalysisStatus::Clean
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintStatus {
    Ran,
    Unavailable,
    /// Output was captured but could not be decoded.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintRun {
    pub status: LintStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl LintRun {
    pub fn ran() -> Self {
        Self {
            status: LintStatus::Ran,
            reason: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAnalysisReport {
    pub file_path: String,
    pub line_count: usize,
    pub imports: Vec<ImportRecord>,
    pub functions: Vec<FunctionRecord>,
    pub violations: Vec<LintViolation>,
    pub lint: LintRun,
    pub status: AnalysisStatus,
}

impl FileAnalysisReport {
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    }
}

/// Runs every Python extractor over one file and merges the results.
#[derive(Debug, Clone, Copy)]
pub struct FileAnalyzer<'m> {
    severities: &'m SeverityMap,
}

impl<'m> FileAnalyzer<'m> {
    pub fn new(severities: &'m SeverityMap) -> Self {
        Self { severities }
    }

    pub fn analyze(&self, file_path: &str, source: &str, lint: LintInput<'_>) -> FileAnalysisReport {
        let line_count = Scanner::new(source).line_count();
        let imports = extract_imports(file_path, source);
        let functions = extract_functions(file_path, source);

        let (violations, lint) = match lint {
            LintInput::Unavailable(reason) => (
                Vec::new(),
                LintRun {
                    status: LintStatus::Unavailable,
                    reason: Some(reason.to_string()),
                },
            ),
            LintInput::Output(output) => match LintNormalizer::new(self.severities).normalize(output) {
                Ok(all) => (bounded_to_file(all, file_path, line_count), LintRun::ran()),
                Err(err) => {
                    debug!(file = file_path, error = %err, "discarding undecodable linter output");
                    (
                        Vec::new(),
                        LintRun {
                            status: LintStatus::Failed,
                            reason: Some(err.to_string()),
                        },
                    )
                }
            },
        };

        let status = AnalysisStatus::from_violations(&violations);
        FileAnalysisReport {
            file_path: file_path.to_string(),
            line_count,
            imports,
            functions,
            violations,
            lint,
            status,
        }
    }
}

/// Keep violations reported for `file_path` and pull their lines inside the
/// content.
fn bounded_to_file(
    violations: Vec<LintViolation>,
    file_path: &str,
    line_count: usize,
) -> Vec<LintViolation> {
    violations
        .into_iter()
        .filter(|v| same_file(&v.location.file_path, file_path))
        .filter_map(|mut v| {
            if line_count == 0 {
                debug!(rule = %v.rule, "dropping violation reported for empty file");
                return None;
            }
            if v.location.line > line_count {
                debug!(
                    rule = %v.rule,
                    line = v.location.line,
                    line_count,
                    "clamping violation past end of file"
                );
                v.location.line = line_count;
                v.column = None;
            }
            Some(v)
        })
        .collect()
}

/// Paths match when one is a component-wise suffix of the other, so
/// `src/app.py` matches `/work/src/app.py` and `./src/app.py`.
fn same_file(reported: &str, analysed: &str) -> bool {
    let reported: Vec<_> = components(reported).collect();
    let analysed: Vec<_> = components(analysed).collect();
    if reported.is_empty() || analysed.is_empty() {
        return false;
    }
    let shorter = reported.len().min(analysed.len());
    reported[reported.len() - shorter..] == analysed[analysed.len() - shorter..]
}

fn components(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != ".")
}
