//! Extraction engine.
//!
//! Every extractor takes text that is already in memory and returns an
//! ordered list of records. Nothing here touches the filesystem.
//!
//! ## Module Structure
//!
//! - `data`: record types shared by the extractors
//! - `scanner`: physical and logical line iteration
//! - `patterns`: tagged matchers for Python statements
//! - `python`: import and function signature extraction
//! - `lint`: linter output normalization
//! - `tex`: TeX log state machine

pub mod data;
pub mod lint;
pub mod patterns;
pub mod python;
pub mod scanner;
pub mod tex;

pub use data::{
    CompileDiagnostic, CompileSeverity, FunctionRecord, ImportRecord, LintViolation, ModuleImport,
    Parameter, ParameterKind, Severity, SourceLocation,
};
pub use lint::{LintFormatError, LintNormalizer, SeverityMap, normalize_output};
pub use python::{extract_functions, extract_imports};
pub use scanner::Scanner;
pub use tex::parse_log;
