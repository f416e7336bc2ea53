//! Configuration types for recordkeep.
//!
//! Configuration is a plain serde struct persisted as YAML. Command-line
//! flags are layered on top by the binary after loading.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default simulated per-item processing time
pub const DEFAULT_PROCESSING_DELAY_MS: u64 = 100;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration profile name
    pub profile: String,
    /// Log filter directive (e.g. "INFO", "debug,recordkeep_batch=trace")
    pub log_level: String,

    // Batch settings
    /// Simulated work per item, in milliseconds
    pub processing_delay_ms: u64,
    /// Worker threads for the runtime (None = tokio default)
    pub worker_threads: Option<usize>,

    // Storage
    /// JSON file backing the entity store
    pub data_path: PathBuf,

    // Admin
    pub metrics_enabled: bool,
    pub debug_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: "default".to_string(),
            log_level: "INFO".to_string(),
            processing_delay_ms: DEFAULT_PROCESSING_DELAY_MS,
            worker_threads: None,
            data_path: PathBuf::from("recordkeep.json"),
            metrics_enabled: false,
            debug_mode: false,
        }
    }
}

impl AppConfig {
    /// Create new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-item processing delay as a `Duration`
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.profile.is_empty() {
            return Err(Error::config_error("Profile name cannot be empty"));
        }

        if self.log_level.trim().is_empty() {
            return Err(Error::config_error("Log level cannot be empty"));
        }

        if let Some(0) = self.worker_threads {
            return Err(Error::config_error("worker_threads must be at least 1"));
        }

        if self.data_path.as_os_str().is_empty() {
            return Err(Error::config_error("data_path cannot be empty"));
        }

        Ok(())
    }

    /// Save configuration to a YAML file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize config: {}", e)))?;

        tokio::fs::write(path, yaml).await.map_err(|e| {
            Error::config_error(format!(
                "Failed to save config to {}: {}",
                path.display(),
                e
            ))
        })?;

        log::info!("Saved '{}' configuration to {}", self.profile, path.display());
        Ok(())
    }

    /// Load configuration from a YAML file.
    ///
    /// Missing keys fall back to [`AppConfig::default`]. The loaded config is
    /// validated before it is returned.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::config_error(format!(
                "Failed to load config from {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: AppConfig = serde_yaml::from_str(&content)
            .map_err(|e| Error::config_error(format!("Invalid configuration: {}", e)))?;

        config.validate()?;
        log::debug!(
            "Loaded '{}' configuration from {}",
            config.profile,
            path.display()
        );
        Ok(config)
    }
}
