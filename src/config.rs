//! Configuration module

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage backend, selected once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// Volatile in-memory storage for development and tests
    #[default]
    Memory,
    /// JSON snapshot file
    File,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackendKind,
    /// Snapshot path for the file backend
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::Memory,
            path: default_data_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter (overridable via RUST_LOG)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Default config path: `<user config dir>/energy-insights/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("energy-insights")
        .join("config.toml")
}

/// Default snapshot path: `<user data dir>/energy-insights/data.json`
pub fn default_data_path() -> PathBuf {
    dirs_next::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("energy-insights")
        .join("data.json")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_memory_backend() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.storage.backend, StorageBackendKind::Memory);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn parses_partial_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [storage]
            backend = "file"
            path = "/tmp/insights.json"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.storage.backend, StorageBackendKind::File);
        assert_eq!(cfg.storage.path, PathBuf::from("/tmp/insights.json"));
        // Unspecified sections fall back to defaults
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn default_paths_end_in_app_dir() {
        assert!(default_config_path().ends_with("energy-insights/config.toml"));
        assert!(default_data_path().ends_with("energy-insights/data.json"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = AppConfig::load(Path::new("/nonexistent/config.toml"));
        assert!(matches!(err, Err(ConfigError::Io(_))));
    }
}
