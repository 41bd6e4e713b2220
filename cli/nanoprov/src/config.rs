//! CLI configuration.
//!
//! Settings come from `config.json` in the platform config directory and
//! are then overridden by `NANOPROV_*` environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::logging::LogFormat;
use crate::output::OutputFormat;

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Get the config directory path.
fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("dev", "nanoprov", "nanoprov")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Log filter when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log line format.
    #[serde(default)]
    pub log_format: LogFormat,

    /// Default output format.
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            output: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Load config from disk and the environment.
    pub fn load() -> Result<Self> {
        let path = config_dir()?.join(CONFIG_FILE);
        Self::from_sources(&path, |key| std::env::var(key).ok())
    }

    /// Load from `path` (if it exists), then apply overrides from `env`.
    pub fn from_sources<F>(path: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {:?}", path))?
        } else {
            Self::default()
        };

        if let Some(level) = env("NANOPROV_LOG_LEVEL") {
            config.log_level = level;
        }

        if let Some(format) = env("NANOPROV_LOG_FORMAT") {
            config.log_format = format
                .parse()
                .context("NANOPROV_LOG_FORMAT must be 'text' or 'json'.")?;
        }

        if let Some(output) = env("NANOPROV_OUTPUT") {
            config.output = output
                .parse()
                .context("NANOPROV_OUTPUT must be 'table' or 'json'.")?;
        }

        Ok(config)
    }
}
