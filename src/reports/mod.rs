//! Aggregate reports built from the extractors' output.
//!
//! ## Module Structure
//!
//! - `analysis`: per-file Python analysis combining imports, functions and lint
//! - `compilation`: pass/fail report for one TeX compiler run

pub mod analysis;
pub mod compilation;

pub use analysis::{
    AnalysisStatus, FileAnalysisReport, FileAnalyzer, LintInput, LintRun, LintStatus,
};
pub use compilation::{CompilationReport, CompilationReportBuilder};
