use std::{
    env, fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::{Config, load_config};

/// Read a text input, `-` meaning stdin. Invalid UTF-8 is replaced, since
/// TeX logs are often written in the document's legacy encoding.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut bytes = Vec::new();
        io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read stdin")?;
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }
    read_text_file(path)
}

/// Read a file as text, replacing invalid UTF-8.
pub fn read_text_file(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Load the config file found from the working directory, or defaults.
pub fn current_config() -> Result<Config> {
    let cwd = env::current_dir().context("Failed to resolve current directory")?;
    let loaded = load_config(&cwd)?;
    if let Some(path) = &loaded.path {
        debug!(path = %path.display(), "loaded config");
    }
    Ok(loaded.config)
}
