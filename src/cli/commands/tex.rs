use std::io;

use anyhow::Result;

use super::super::{
    args::{OutputFormat, TexCommand},
    exit_status::ExitStatus,
    finding::Finding,
    report::{print_compilation_summary_to, print_json, report},
};
use super::helper::read_input;
use crate::reports::CompilationReport;

pub fn tex(cmd: TexCommand) -> Result<ExitStatus> {
    let log = read_input(&cmd.log)?;

    let mut builder = CompilationReport::builder().log(&log);
    if cmd.log.as_os_str() != "-" {
        builder = builder.log_file(cmd.log.to_string_lossy());
    }
    if let Some(code) = cmd.exit_code {
        builder = builder.exit_code(code);
    }
    if let Some(artifact) = &cmd.artifact {
        builder = builder.artifact(artifact.to_string_lossy());
    }
    let compilation = builder.build();

    match cmd.common.format {
        OutputFormat::Json => print_json(&compilation)?,
        OutputFormat::Human => {
            let findings: Vec<Finding> = compilation
                .diagnostics
                .iter()
                .cloned()
                .map(Finding::compile)
                .collect();
            report(&findings);
            print_compilation_summary_to(&compilation, &mut io::stdout().lock());
        }
    }

    Ok(ExitStatus::failure_if(!compilation.success))
}
