//! Configuration management for ican-checklist.
//!
//! This module handles the optional `config.yaml` file in the data directory.

use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Database file to use instead of `<data_dir>/checklist.sqlite3`.
    /// Relative paths are resolved against the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Default log filter (e.g. "info", "`ican_checklist=debug`").
    /// `RUST_LOG` takes precedence when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Load config from a data directory, returning None if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_from(data_dir: &Path) -> Result<Option<Self>> {
        let config_path = paths::config_path(data_dir);
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Load config from a data directory, falling back to defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load_or_default(data_dir: &Path) -> Result<Self> {
        Ok(Self::load_from(data_dir)?.unwrap_or_default())
    }

    /// Save config to a data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, data_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(data_dir)?;
        let content = serde_yaml::to_string(self)?;
        std::fs::write(paths::config_path(data_dir), content)?;
        Ok(())
    }

    /// The database path this config selects within a data directory.
    #[must_use]
    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        self.database_path
            .as_ref()
            .map_or_else(|| paths::db_path(data_dir), |path| data_dir.join(path))
    }
}
