//! Configuration file handling
//!
//! The config lives at `<config dir>/shopdesk/config.toml` and is created with
//! defaults on first run. Storage paths can be overridden from the
//! environment.

pub mod search;
pub mod settings;

pub use search::SearchConfig;
pub use settings::{Currency, Language, SettingToggle, Settings};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the database location
pub const DATABASE_ENV: &str = "SHOPDESK_DATABASE";

const APP_DIR: &str = "shopdesk";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    pub email: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file; defaults to the data directory
    pub database: Option<PathBuf>,
    /// Root for uploaded product images; defaults to the data directory
    pub images_dir: Option<PathBuf>,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub operator: OperatorConfig,
    pub storage: StorageConfig,
    pub search: SearchConfig,
    pub settings: Settings,
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Could not determine the user config directory")?;
        Ok(base.join(APP_DIR).join("config.toml"))
    }

    fn data_dir() -> Result<PathBuf> {
        let base = dirs::data_dir().context("Could not determine the user data directory")?;
        Ok(base.join(APP_DIR))
    }

    /// Load the config, writing defaults if the file does not exist yet
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config at {}, creating defaults", path.display());
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .search
            .validate()
            .with_context(|| format!("Invalid search settings in {}", path.display()))?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Database file: `SHOPDESK_DATABASE`, then `storage.database`, then the data dir
    pub fn database_path(&self, env_value: Option<&str>) -> Result<PathBuf> {
        if let Some(path) = env_value.filter(|p| !p.trim().is_empty()) {
            return Ok(PathBuf::from(path));
        }
        match &self.storage.database {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("shopdesk.db")),
        }
    }

    pub fn images_dir(&self) -> Result<PathBuf> {
        match &self.storage.images_dir {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("images")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.operator.email = Some("ops@shop.rw".to_string());
        config.search.similarity_threshold = 0.35;
        config.settings.currency = Currency::Usd;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[operator]\nemail = \"ops@shop.rw\"\n").unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.operator.email.as_deref(), Some("ops@shop.rw"));
        assert_eq!(loaded.search, SearchConfig::default());
        assert_eq!(loaded.settings, Settings::default());
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[search]\nsimilarity_threshold = 3.0\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_database_path_precedence() {
        let mut config = Config::default();
        config.storage.database = Some(PathBuf::from("/var/lib/shop.db"));

        assert_eq!(
            config.database_path(Some("/tmp/env.db")).unwrap(),
            PathBuf::from("/tmp/env.db")
        );
        assert_eq!(
            config.database_path(None).unwrap(),
            PathBuf::from("/var/lib/shop.db")
        );
    }
}
