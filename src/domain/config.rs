//! Config - Application Configuration
//!
//! Loaded from `fleetdesk.toml`; every section and field has a default so a missing
//! or partial file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::auth::Role;
use crate::constants::{ACTIVITY_LOG_CAPACITY, DUE_SOON_DAYS, DUE_SOON_KM};
use crate::error::{Error, Result};
use crate::helpers::get_or_create_config_dir;

/// Config file name inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "fleetdesk.toml";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub session: SessionConfig,
    pub log: LogConfig,
}

/// Store behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Load the demo fleet at startup
    pub seed_demo_data: bool,
    /// Activity entries kept in memory
    pub activity_capacity: usize,
    /// Days ahead that count as "due soon"
    pub due_soon_days: i64,
    /// Kilometres ahead that count as "due soon"
    pub due_soon_km: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            activity_capacity: ACTIVITY_LOG_CAPACITY,
            due_soon_days: DUE_SOON_DAYS,
            due_soon_km: DUE_SOON_KM,
        }
    }
}

/// Demo session identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub user_name: String,
    pub role: Role,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_name: "Demo Admin".to_string(),
            role: Role::Admin,
        }
    }
}

/// Logging output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Directory for daily rolling log files, console only when unset
    ///
    /// An empty path selects the platform data directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "fleetdesk.log".to_string(),
        }
    }
}

impl AppConfig {
    /// Default config path in the platform config directory
    pub fn default_path() -> Result<PathBuf> {
        Ok(get_or_create_config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load from a file; a missing or blank file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = ?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let value = std::fs::read_to_string(path)?;
        if value.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = toml::from_str(&value).map_err(|e| {
            error!(error = %e, path = ?path, "Failed to parse config file");
            e
        })?;
        config.validate()?;

        info!(path = ?path, "Loaded config file");
        Ok(config)
    }

    /// Load from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Write as TOML
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let value = toml::to_string(self)?;
        std::fs::write(path, value)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.store.activity_capacity == 0 {
            return Err(Error::Invalid {
                message: "store.activity_capacity must be greater than zero".to_string(),
            });
        }
        if self.store.due_soon_days < 0 || self.store.due_soon_km < 0 {
            return Err(Error::Invalid {
                message: "store.due_soon_days and store.due_soon_km must not be negative"
                    .to_string(),
            });
        }
        Ok(())
    }
}
