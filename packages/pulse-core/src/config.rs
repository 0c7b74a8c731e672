//! Runtime configuration.
//!
//! Loaded from a TOML file; every field is optional:
//!
//! ```toml
//! data_dir = "/var/lib/pulse/aggregates"
//! log_level = "debug"
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "PULSE_CONFIG";
/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "PULSE_DATA_DIR";

/// Settings for the price source and the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding `<SYMBOL>.json` aggregate responses
    pub data_dir: PathBuf,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: base_dir().join("data"),
            log_level: "info".to_string(),
        }
    }
}

/// `~/.pulse`, or the working directory when no home is known.
fn base_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".pulse"))
        .unwrap_or_else(|| PathBuf::from(".pulse"))
}

impl Config {
    /// Get the default config file path.
    ///
    /// Default path: `~/.pulse/config.toml`
    /// Can be overridden with the `PULSE_CONFIG` environment variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        base_dir().join("config.toml")
    }

    /// Load from the default path, then apply environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from `path`, then apply environment overrides.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Self::default()
        };

        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_toml_partial() {
        let config = Config::from_toml("log_level = \"debug\"").unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.data_dir, Config::default().data_dir);
    }

    #[test]
    fn test_from_toml_full() {
        let config =
            Config::from_toml("data_dir = \"/srv/prices\"\nlog_level = \"warn\"\n").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/prices"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = Config::from_toml("data_dir = [1, 2").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = \"trace\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.log_level, "info");
    }
}
