//! Node configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! config file (YAML, TOML or JSON, by extension), and `SCARLET_*`
//! environment variables such as `SCARLET_API_ADDR` or `SCARLET_DATA_FILE`.
//! Command-line flags are applied on top by the binary.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::observability::LogFormat;

/// Accepted log levels.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for the Scarlet node.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// HTTP listen address.
    pub api_addr: SocketAddr,
    /// Path of the guest list JSON document.
    pub data_file: PathBuf,
    /// Log level.
    pub log_level: String,
    /// Log format (`pretty` or `json`).
    pub log_format: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            api_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            data_file: PathBuf::from("./data/scarlet-drive/guests.json"),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl NodeConfig {
    /// Loads configuration from `file` (if given and present) and the environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let loaded: NodeConfig = builder
            .add_source(config::Environment::with_prefix("SCARLET"))
            .build()?
            .try_deserialize()?;
        Ok(loaded)
    }

    /// Checks values that deserialization alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "log_level must be one of {}, got {:?}",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }
        if !matches!(self.log_format.to_lowercase().as_str(), "pretty" | "json") {
            return Err(ConfigError::Invalid(format!(
                "log_format must be pretty or json, got {:?}",
                self.log_format
            )));
        }
        if self.data_file.as_os_str().is_empty() || self.data_file.file_name().is_none() {
            return Err(ConfigError::Invalid(
                "data_file must name a file".to_string(),
            ));
        }
        Ok(())
    }

    /// Parsed log format.
    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.log_format)
    }
}
