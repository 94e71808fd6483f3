//! Configuration manager for loading and saving application configuration
//!
//! Configuration lives in `<config dir>/config.json` and is written atomically
//! (temporary file + rename) to prevent corruption. The config dir is
//! `$PULLCORD_CONFIG_DIR` when set, otherwise the platform config directory.

use crate::config::models::AppConfig;
use crate::error::{PullcordError, Result};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "PULLCORD_CONFIG_DIR";

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Directory holding config, preferences and logs
    pub fn get_config_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .map_or_else(|| PathBuf::from("."), |dir| dir.join("pullcord"))
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.json")
    }

    /// Get the path to the preference store file
    pub fn get_preferences_path() -> PathBuf {
        Self::get_config_dir().join("preferences.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let config_dir = Self::get_config_dir();
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, is corrupt, or holds toggle
    /// settings the simulation cannot run with, returns default configuration.
    pub fn load() -> Result<AppConfig> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(AppConfig::default());
        }

        let json = std::fs::read_to_string(&config_path)?;

        match serde_json::from_str::<AppConfig>(&json) {
            Ok(config) => {
                if let Err(e) = config.toggle.validate() {
                    warn!("Invalid configuration, using defaults: {}", e);
                    return Ok(AppConfig::default());
                }
                info!("Configuration loaded successfully");
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                Ok(AppConfig::default())
            }
        }
    }

    /// Save configuration to disk with atomic write
    pub fn save(config: &AppConfig) -> Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = Self::get_config_path();

        let json = serde_json::to_string_pretty(config)?;
        let mut temp = tempfile::NamedTempFile::new_in(&config_dir)?;
        temp.write_all(json.as_bytes())?;
        temp.persist(&config_path)
            .map_err(|e| PullcordError::ConfigError(Box::new(e.error)))?;

        info!("Configuration saved successfully");
        Ok(())
    }
}
