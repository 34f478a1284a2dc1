//! Configuration loading and management.

use std::path::Path;

use clap::ValueEnum;
use linkstate_routing::EngineConfig;
use serde::{Deserialize, Serialize};

/// Full configuration for the `linkstate` binary.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LinkstateConfig {
    /// Shortest-path engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Report settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed-width tables.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl LinkstateConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: LinkstateConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, contents)?;
        Ok(())
    }
}
