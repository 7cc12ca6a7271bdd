//! Report formatting and printing utilities.
//!
//! Findings are printed cargo-style. Kept apart from the commands so the
//! library can be used without any terminal output.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::finding::{Finding, FindingLocation, Report};
use crate::core::Severity;
use crate::reports::{CompilationReport, FileAnalysisReport};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print findings in cargo-style format to stdout.
pub fn report(findings: &[Finding]) {
    report_to(findings, &mut io::stdout().lock());
}

/// Print findings to a custom writer, in the order given.
pub fn report_to<W: Write>(findings: &[Finding], writer: &mut W) {
    let max_line_width = calculate_max_line_width(findings);
    for finding in findings {
        print_finding(finding, writer, max_line_width);
    }
}

/// Serialize `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}

pub fn print_warning(message: &str) {
    let _ = writeln!(
        io::stderr().lock(),
        "{} {}",
        "warning:".bold().yellow(),
        message
    );
}

pub fn print_analysis_summary_to<W: Write>(reports: &[FileAnalysisReport], writer: &mut W) {
    for report in reports {
        let _ = writeln!(
            writer,
            "{}",
            format!(
                "{}: {}, {}, {}",
                report.file_path,
                plural(report.line_count, "line"),
                plural(report.imports.len(), "import"),
                plural(report.functions.len(), "function"),
            )
            .dimmed()
        );
    }

    let errors: usize = reports.iter().map(FileAnalysisReport::error_count).sum();
    let warnings: usize = reports.iter().map(FileAnalysisReport::warning_count).sum();
    let files = plural(reports.len(), "file");
    print_counts(writer, &format!("Analyzed {files}"), errors, warnings);
}

pub fn print_lint_summary_to<W: Write>(findings: &[Finding], writer: &mut W) {
    let errors = findings
        .iter()
        .filter(|f| f.severity() == Severity::Error)
        .count();
    let warnings = findings
        .iter()
        .filter(|f| f.severity() == Severity::Warning)
        .count();
    let violations = plural(findings.len(), "violation");
    print_counts(writer, &format!("Normalized {violations}"), errors, warnings);
}

pub fn print_compilation_summary_to<W: Write>(report: &CompilationReport, writer: &mut W) {
    if report.success {
        let artifact = report
            .output_artifact
            .as_deref()
            .map(|path| format!(" -> {}", path))
            .unwrap_or_default();
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Compilation succeeded: {}{}", report.summary, artifact).green()
        );
    } else {
        let reason = match report.exit_code {
            None => " (compiler did not run)".to_string(),
            Some(0) => String::new(),
            Some(code) => format!(" (exit code {})", code),
        };
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!("Compilation failed{}: {}", reason, report.summary).red()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_counts<W: Write>(writer: &mut W, what: &str, errors: usize, warnings: usize) {
    if errors == 0 && warnings == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("{} - no issues found", what).green()
        );
        return;
    }

    let counts = format!(
        "{}, {}",
        plural(errors, "error"),
        plural(warnings, "warning")
    );
    let (mark, line) = if errors > 0 {
        (FAILURE_MARK.red(), format!("{}: {}", what, counts).red())
    } else {
        (FAILURE_MARK.yellow(), format!("{}: {}", what, counts).yellow())
    };
    let _ = writeln!(writer, "{} {}", mark, line);
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn print_finding<W: Write>(finding: &Finding, writer: &mut W, max_line_width: usize) {
    let severity = finding.severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
        Severity::Info => "info".bold().cyan(),
    };

    match finding.code() {
        Some(code) => {
            let _ = writeln!(
                writer,
                "{}: {}  {}",
                severity_str,
                finding.headline(),
                code.dimmed().cyan()
            );
        }
        None => {
            let _ = writeln!(writer, "{}: {}", severity_str, finding.headline());
        }
    }

    let location = finding.location();
    if let Some(rendered) = render_location(&location) {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), rendered);
    }

    if let (Some(source_line), FindingLocation::Source { line, column, .. }) =
        (finding.source_line(), &location)
    {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
            Severity::Info => "^".cyan(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // Caret pointing to the column (col is 1-based)
        let col = column.unwrap_or(1);
        let prefix = if col > 1 {
            source_line.chars().take(col - 1).collect::<String>()
        } else {
            String::new()
        };
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    for note in finding.notes() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            note,
            width = max_line_width
        );
    }

    if let Some(help) = finding.help() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "help:".bold().cyan(),
            help,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between findings
}

fn render_location(location: &FindingLocation<'_>) -> Option<String> {
    match location {
        FindingLocation::Source { path, line, column } => Some(match column {
            Some(col) => format!("{}:{}:{}", path, line, col),
            None => format!("{}:{}", path, line),
        }),
        FindingLocation::Log {
            file,
            line,
            end_line,
        } => {
            let lines = match (line, end_line) {
                (Some(start), Some(end)) => Some(format!("{}-{}", start, end)),
                (Some(start), None) => Some(start.to_string()),
                _ => None,
            };
            match (file, lines) {
                (Some(file), Some(lines)) => Some(format!("{}:{}", file, lines)),
                (Some(file), None) => Some(file.to_string()),
                (None, Some(lines)) => Some(format!("line {}", lines)),
                (None, None) => None,
            }
        }
    }
}

fn calculate_max_line_width(findings: &[Finding]) -> usize {
    findings
        .iter()
        .filter_map(|f| f.location().line())
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}
