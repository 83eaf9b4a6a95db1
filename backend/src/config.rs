//! Deployment configuration.
//!
//! Read from `config.yaml` in the user's config directory (or the file named
//! by `SPA_TRACKER_CONFIG`). A missing file means defaults.
//! `SPA_TRACKER_DATABASE_URL` overrides the database URL; the special value
//! `memory` runs against a throwaway in-memory store.

use anyhow::{bail, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::{ActiveStaffMetric, FormPolicy};

pub const CONFIG_ENV: &str = "SPA_TRACKER_CONFIG";
pub const DATABASE_URL_ENV: &str = "SPA_TRACKER_DATABASE_URL";
pub const MEMORY_DATABASE_URL: &str = "memory";

const APP_DIR: &str = "spa-service-tracker";
const MAX_CURRENCY_DECIMALS: usize = 4;

/// Colour scheme for the desktop UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeVariant {
    #[default]
    Classic,
    Midnight,
    Sand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// SQLx connection URL, or `memory`
    pub database_url: String,
    /// Whether the phone number is mandatory on the entry form
    pub phone_required: bool,
    /// Decimal places used when showing money
    pub currency_decimals: usize,
    pub active_staff_metric: ActiveStaffMetric,
    pub theme: ThemeVariant,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            phone_required: true,
            currency_decimals: 2,
            active_staff_metric: ActiveStaffMetric::default(),
            theme: ThemeVariant::default(),
        }
    }
}

impl TrackerConfig {
    /// Load from the default location, applying environment overrides
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => {
                info!("No config file found, using defaults");
                Self::default()
            }
        };

        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            info!("Database URL overridden by {}", DATABASE_URL_ENV);
            config.database_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.database_url.trim().is_empty() {
            bail!("database_url must not be empty");
        }
        if self.currency_decimals > MAX_CURRENCY_DECIMALS {
            bail!(
                "currency_decimals must be at most {}, got {}",
                MAX_CURRENCY_DECIMALS,
                self.currency_decimals
            );
        }
        Ok(())
    }

    pub fn form_policy(&self) -> FormPolicy {
        FormPolicy {
            phone_required: self.phone_required,
        }
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}

/// `<config dir>/spa-service-tracker/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.yaml"))
}

fn default_database_url() -> String {
    match dirs::data_dir() {
        Some(dir) => format!("sqlite://{}", dir.join(APP_DIR).join("tracker.db").display()),
        None => "sqlite:spa-service-tracker.db".to_string(),
    }
}

/// Directory a `sqlite://` URL points into, if it is a file path
pub fn sqlite_parent_dir(url: &str) -> Option<PathBuf> {
    let path = url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    Path::new(path).parent().map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert!(config.phone_required);
        assert_eq!(config.currency_decimals, 2);
        assert_eq!(config.active_staff_metric, ActiveStaffMetric::RosterSize);
        assert_eq!(config.theme, ThemeVariant::Classic);
        assert!(config.database_url.starts_with("sqlite:"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = TrackerConfig::from_yaml(
            "phone_required: false\nactive_staff_metric: staff_with_entries\ntheme: sand\n",
        )
        .unwrap();
        assert!(!config.phone_required);
        assert_eq!(config.active_staff_metric, ActiveStaffMetric::StaffWithEntries);
        assert_eq!(config.theme, ThemeVariant::Sand);
        assert_eq!(config.currency_decimals, 2);
        assert!(!config.form_policy().phone_required);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(TrackerConfig::from_yaml("currency_decimals: 9\n").is_err());
        assert!(TrackerConfig::from_yaml("database_url: \"  \"\n").is_err());
        assert!(TrackerConfig::from_yaml("theme: neon\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "database_url: memory\ncurrency_decimals: 0\n").unwrap();

        let config = TrackerConfig::from_file(&path).unwrap();
        assert!(config.uses_memory_store());
        assert_eq!(config.currency_decimals, 0);
    }

    #[test]
    fn test_sqlite_parent_dir() {
        assert_eq!(
            sqlite_parent_dir("sqlite:///var/lib/spa/tracker.db?mode=rwc"),
            Some(PathBuf::from("/var/lib/spa"))
        );
        assert_eq!(sqlite_parent_dir("sqlite:tracker.db"), None);
    }
}
