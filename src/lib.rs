//! Diagnost - structured diagnostics from Python sources, linter output and
//! TeX compiler logs
//!
//! Extractors take text the caller has already read and return ordered
//! records. Aggregators combine them into per-file and per-compilation
//! reports that serialize to JSON.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extractors and the record types they produce
//! - `reports`: File analysis and compilation reports

pub mod cli;
pub mod config;
pub mod core;
pub mod reports;
