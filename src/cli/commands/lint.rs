use std::io;

use anyhow::{Context, Result};

use super::super::{
    args::{LintCommand, OutputFormat},
    exit_status::ExitStatus,
    finding::Finding,
    report::{print_json, print_lint_summary_to, report},
};
use super::helper::{current_config, read_input};
use crate::core::{Severity, normalize_output};

pub fn lint(cmd: LintCommand) -> Result<ExitStatus> {
    let config = current_config()?;
    let output = read_input(&cmd.input)?;
    let violations = normalize_output(&output, &config.severity_map())
        .context("Failed to normalize linter output")?;

    let failed = violations.iter().any(|v| v.severity == Severity::Error);

    match cmd.common.format {
        OutputFormat::Json => print_json(&violations)?,
        OutputFormat::Human => {
            let findings: Vec<Finding> = violations
                .into_iter()
                .map(|v| Finding::lint(v, None))
                .collect();
            report(&findings);
            print_lint_summary_to(&findings, &mut io::stdout().lock());
        }
    }

    Ok(ExitStatus::failure_if(failed))
}
