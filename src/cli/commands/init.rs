use std::{env, fs};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::exit_status::ExitStatus;
use super::super::report::{SUCCESS_MARK, print_warning};
use crate::config::{CONFIG_FILE_NAME, default_config_json, find_config_file};

/// Write `.diagnostrc.json` with the default settings into the working
/// directory. An existing file is left untouched.
pub fn init() -> Result<ExitStatus> {
    let cwd = env::current_dir().context("Failed to resolve current directory")?;
    let config_path = cwd.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        print_warning(&format!("{} already exists", CONFIG_FILE_NAME));
        return Ok(ExitStatus::Failure);
    }

    if let Some(parent) = find_config_file(&cwd) {
        print_warning(&format!(
            "{} shadows {}",
            CONFIG_FILE_NAME,
            parent.display()
        ));
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );

    Ok(ExitStatus::Success)
}
