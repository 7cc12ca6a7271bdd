use serde::Serialize;

use crate::core::data::CompileDiagnostic;
use crate::core::tex::parse_log;

/// Outcome of one compiler run.
///
/// `success` requires both a zero exit code and a log without error
/// diagnostics. A compiler that never ran has no exit code and never succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilationReport {
    pub success: bool,
    pub diagnostics: Vec<CompileDiagnostic>,
    /// Only reported for successful runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_artifact: Option<String>,
    pub exit_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
    pub error_count: usize,
    pub warning_count: usize,
    pub summary: String,
}

impl CompilationReport {
    pub fn builder() -> CompilationReportBuilder {
        CompilationReportBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompilationReportBuilder {
    exit_code: Option<i32>,
    diagnostics: Vec<CompileDiagnostic>,
    log_file: Option<String>,
    artifact: Option<String>,
}

impl CompilationReportBuilder {
    pub fn exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    /// Parse `log` and append its diagnostics.
    pub fn log(mut self, log: &str) -> Self {
        self.diagnostics.extend(parse_log(log));
        self
    }

    pub fn diagnostics(mut self, diagnostics: impl IntoIterator<Item = CompileDiagnostic>) -> Self {
        self.diagnostics.extend(diagnostics);
        self
    }

    pub fn log_file(mut self, path: impl Into<String>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Artifact the compiler was asked to produce; dropped unless the run
    /// succeeds.
    pub fn artifact(mut self, path: impl Into<String>) -> Self {
        self.artifact = Some(path.into());
        self
    }

    pub fn build(self) -> CompilationReport {
        let error_count = self.diagnostics.iter().filter(|d| d.is_error()).count();
        let warning_count = self.diagnostics.len() - error_count;
        let success = self.exit_code == Some(0) && error_count == 0;

        CompilationReport {
            success,
            output_artifact: self.artifact.filter(|_| success),
            exit_code: self.exit_code,
            log_file: self.log_file,
            error_count,
            warning_count,
            summary: format!("{warning_count} warnings, {error_count} errors found"),
            diagnostics: self.diagnostics,
        }
    }
}
