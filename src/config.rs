use crate::logging;
use crate::report::ReportFormat;
use crate::{Result, StubError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".method-stub.toml";

/// Environment variable that points at an alternative configuration file
pub const CONFIG_ENV_VAR: &str = "METHOD_STUB_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RegistryConfig {
    /// Emit a debug event for every dispatched call
    #[serde(default)]
    pub trace_dispatch: bool,
    /// Pre-allocated capacity of each method's call history
    #[serde(default)]
    pub history_capacity: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ReportConfig {
    /// Default history report format
    #[serde(default)]
    pub format: ReportFormat,
}

impl Config {
    /// Load configuration from `METHOD_STUB_CONFIG` or the working directory
    pub fn load() -> Result<Self> {
        let config_path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            StubError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            StubError::Config(format!(
                "Failed to parse TOML config from {:?}: {}",
                path, e
            ))
        })?;

        logging::log_config_loaded(&path.display().to_string());
        Ok(config)
    }

    /// Load default config if file is missing or unreadable
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config: {}. Using defaults.", e);
                Config::default()
            }
        }
    }
}
