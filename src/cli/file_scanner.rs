use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use glob::Pattern;
use tracing::debug;
use walkdir::WalkDir;

/// Result of scanning files.
pub struct ScanResult {
    /// Python files in discovery order, without duplicates.
    pub files: Vec<String>,
    pub skipped_count: usize,
}

/// Expand `paths` into Python files.
///
/// Directories are walked in file-name order and filtered by `ignores`.
/// Files named explicitly are always kept.
pub fn scan_python_files(paths: &[PathBuf], ignores: &[Pattern]) -> Result<ScanResult> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();
    let mut skipped_count = 0;

    for path in paths {
        if path.is_file() {
            let path_str = path.to_string_lossy().into_owned();
            if seen.insert(path_str.clone()) {
                files.push(path_str);
            }
            continue;
        }
        if !path.is_dir() {
            bail!("Path does not exist: {}", path.display());
        }

        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    debug!(error = %e, "cannot access path");
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if ignores.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry.file_type().is_file() && is_python_file(path) && seen.insert(path_str.to_string()) {
                files.push(path_str.into_owned());
            }
        }
    }

    Ok(ScanResult {
        files,
        skipped_count,
    })
}

fn is_python_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("py" | "pyi")
    )
}
