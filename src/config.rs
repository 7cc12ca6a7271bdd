use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use glob::Pattern;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Severity, SeverityMap};

pub const CONFIG_FILE_NAME: &str = ".diagnostrc.json";

pub const DEFAULT_IGNORES: &[&str] = &[
    "**/.git/**",
    "**/.venv/**",
    "**/venv/**",
    "**/__pycache__/**",
    "**/node_modules/**",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid glob pattern in 'ignores': \"{pattern}\"")]
    InvalidIgnore {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("empty rule prefix in 'severity'")]
    EmptyPrefix,
    #[error("failed to generate default config")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    /// Rule prefix overrides merged over the built-in families.
    #[serde(default)]
    pub severity: BTreeMap<String, Severity>,
    #[serde(default = "default_severity")]
    pub default_severity: Severity,
}

fn default_ignores() -> Vec<String> {
    DEFAULT_IGNORES.iter().map(|s| s.to_string()).collect()
}

fn default_severity() -> Severity {
    Severity::Warning
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: default_ignores(),
            severity: BTreeMap::new(),
            default_severity: default_severity(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Rejects invalid glob patterns in `ignores` and empty `severity` keys.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ignore_patterns()?;
        if self.severity.keys().any(|prefix| prefix.trim().is_empty()) {
            return Err(ConfigError::EmptyPrefix);
        }
        Ok(())
    }

    pub fn ignore_patterns(&self) -> Result<Vec<Pattern>, ConfigError> {
        self.ignores
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|source| ConfigError::InvalidIgnore {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }

    /// Built-in severities with this config's overrides applied.
    pub fn severity_map(&self) -> SeverityMap {
        self.severity.iter().fold(
            SeverityMap::default().with_fallback(self.default_severity),
            |map, (prefix, severity)| map.with_rule(prefix.trim(), *severity),
        )
    }
}

pub fn default_config_json() -> Result<String, ConfigError> {
    serde_json::to_string_pretty(&Config::default()).map_err(ConfigError::Serialize)
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Where the config came from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult, ConfigError> {
    let Some(path) = find_config_file(start_dir) else {
        return Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        });
    };

    let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config: Config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    config.validate()?;
    Ok(ConfigLoadResult {
        config,
        path: Some(path),
    })
}
