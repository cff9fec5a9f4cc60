//! Bootstrap configuration
//!
//! Loaded once at startup from a TOML file. Resolution order for the file:
//! 1. Explicit path (command-line argument)
//! 2. `VOICES_CONFIG` environment variable
//! 3. `<config dir>/voices/config.toml`
//! 4. Built-in defaults
//!
//! A missing file is never fatal: the service logs a warning and starts with
//! defaults. A file that exists but does not parse is an error.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{Error, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "VOICES_CONFIG";

/// Top-level configuration file contents
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TomlConfig {
    /// HTTP listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Interface to bind
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Which list store backs the story collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// SQLite file; defaults to `<data dir>/voices/voices.db`
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| default_data_dir().join("voices.db"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_port() -> u16 {
    5780
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// OS-dependent directory for the story database
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("voices"))
        .unwrap_or_else(|| PathBuf::from("./voices_data"))
}

/// Default config file location, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("voices").join("config.toml"))
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Read a specific config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Resolve and load configuration, falling back to defaults
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        let Some(path) = resolve_config_path(cli_path) else {
            warn!("No configuration file found, using built-in defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            warn!("Configuration file {} not found, using built-in defaults", path.display());
            return Ok(Self::default());
        }

        let config = Self::from_file(&path)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

fn resolve_config_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path().filter(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.port, 5780);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
    }

    #[test]
    fn test_full_file() {
        let config = TomlConfig::from_toml_str(
            r#"
            port = 8080
            bind_address = "0.0.0.0"

            [storage]
            backend = "memory"
            database_path = "/var/lib/voices/stories.db"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(
            config.storage.database_path(),
            PathBuf::from("/var/lib/voices/stories.db")
        );
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_default_database_path_under_data_dir() {
        let storage = StorageConfig::default();
        assert!(storage.database_path().ends_with("voices.db"));
    }

    #[test]
    fn test_unknown_backend_is_config_error() {
        let result = TomlConfig::from_toml_str("[storage]\nbackend = \"redis\"\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
