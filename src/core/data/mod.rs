//! Record types produced by the extractors.
//!
//! ## Module Structure
//!
//! - `source`: SourceLocation shared by every extractor
//! - `python`: ImportRecord, FunctionRecord and Parameter
//! - `lint`: LintViolation and the three-level Severity
//! - `tex`: CompileDiagnostic and its two-level severity

pub mod lint;
pub mod python;
pub mod source;
pub mod tex;

pub use lint::{LintViolation, Severity};
pub use python::{FunctionRecord, ImportRecord, ModuleImport, Parameter, ParameterKind};
pub use source::SourceLocation;
pub use tex::{CompileDiagnostic, CompileSeverity};
