use std::{io, path::Path};

use anyhow::Result;
use rayon::prelude::*;
use tracing::debug;

use super::super::{
    args::{AnalyzeCommand, OutputFormat},
    exit_status::ExitStatus,
    file_scanner::scan_python_files,
    finding::Finding,
    report::{print_analysis_summary_to, print_json, print_warning, report},
};
use super::helper::{current_config, read_input, read_text_file};
use crate::reports::{AnalysisStatus, FileAnalysisReport, FileAnalyzer, LintInput, LintStatus};

const NO_LINT_OUTPUT: &str = "no linter output supplied";

pub fn analyze(cmd: AnalyzeCommand) -> Result<ExitStatus> {
    let config = current_config()?;
    let ignores = config.ignore_patterns()?;
    let scan = scan_python_files(&cmd.paths, &ignores)?;
    if scan.skipped_count > 0 {
        debug!(skipped = scan.skipped_count, "some paths could not be read");
    }

    let lint_output = cmd.lint_output.as_deref().map(read_input).transpose()?;
    let lint = match &lint_output {
        Some(output) => LintInput::Output(output),
        None => LintInput::Unavailable(NO_LINT_OUTPUT),
    };

    let severities = config.severity_map();
    let analyzer = FileAnalyzer::new(&severities);

    // Parallel read and analysis; collect keeps the scan order.
    let analyzed = scan
        .files
        .par_iter()
        .map(|path| {
            let source = read_text_file(Path::new(path))?;
            let report = analyzer.analyze(path, &source, lint);
            Ok((source, report))
        })
        .collect::<Result<Vec<_>>>()?;
    let (sources, reports): (Vec<String>, Vec<FileAnalysisReport>) = analyzed.into_iter().unzip();

    let failed = reports
        .iter()
        .any(|report| report.status == AnalysisStatus::HasErrors);

    match cmd.common.format {
        OutputFormat::Json => print_json(&reports)?,
        OutputFormat::Human => print_human(&sources, &reports, cmd.common.verbose),
    }

    Ok(ExitStatus::failure_if(failed))
}

fn print_human(sources: &[String], reports: &[FileAnalysisReport], verbose: bool) {
    if reports.is_empty() {
        print_warning("no Python files found");
    }

    let findings: Vec<Finding> = sources
        .iter()
        .zip(reports)
        .flat_map(|(source, report)| {
            report.violations.iter().map(move |violation| {
                let source_line = source
                    .lines()
                    .nth(violation.location.line - 1)
                    .map(str::to_string);
                Finding::lint(violation.clone(), source_line)
            })
        })
        .collect();
    report(&findings);

    // Every file sees the same linter output, so one status covers them all.
    if let Some(first) = reports.first() {
        match first.lint.status {
            LintStatus::Ran => {}
            LintStatus::Unavailable => {
                if verbose {
                    print_warning("lint checks skipped (pass --lint-output)");
                }
            }
            LintStatus::Failed => print_warning(&format!(
                "linter output could not be read: {}",
                first.lint.reason.as_deref().unwrap_or("unknown format")
            )),
        }
    }

    print_analysis_summary_to(reports, &mut io::stdout().lock());
}
