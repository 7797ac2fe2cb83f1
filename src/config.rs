//! Service configuration
//!
//! Read once at startup from a YAML file, then overridden from the
//! environment where set.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DB_PATH_ENV: &str = "VITALWATCH_DB_PATH";
pub const PORT_ENV: &str = "VITALWATCH_PORT";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StorageConfig {
    /// JSON document holding the patient collection.
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            path: PathBuf::from("data/db.json"),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
}

/// Load configuration from `path`, falling back to defaults when the file is absent.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config = if path.exists() {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        parse_config(&content)?
    } else {
        warn!(path = %path.display(), "config file not found, using defaults");
        Config::default()
    };

    apply_overrides(config, |name| std::env::var(name).ok())
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

fn apply_overrides(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config, ConfigError> {
    if let Some(path) = lookup(DB_PATH_ENV) {
        config.storage.path = PathBuf::from(path);
    }
    if let Some(port) = lookup(PORT_ENV) {
        config.api.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
            name: PORT_ENV,
            value: port,
        })?;
    }
    Ok(config)
}
