//! Pre-configured profiles for different deployment scenarios
//!
//! - Development: Verbose logging, metrics, realistic processing delay
//! - Production: Info logging, metrics enabled
//! - HighThroughput: No simulated delay, quiet logging
//! - Minimal: Errors only, no metrics

use crate::config::AppConfig;
use crate::error::{Error, Result};
use std::str::FromStr;

/// Profile selector for pre-configured deployments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigProfile {
    /// Development: Verbose logging, metrics enabled
    Development,
    /// Production: Reliable defaults with observability
    Production,
    /// HighThroughput: Tuned for very large batches
    HighThroughput,
    /// Minimal: Bare essentials only
    Minimal,
}

impl ConfigProfile {
    /// All known profiles, in display order
    pub const ALL: [ConfigProfile; 4] = [
        Self::Development,
        Self::Production,
        Self::HighThroughput,
        Self::Minimal,
    ];

    /// Create an AppConfig from this profile
    pub fn create_config(self) -> AppConfig {
        let mut config = AppConfig::new();
        config.profile = self.name().to_string();

        match self {
            Self::Development => {
                config.log_level = "DEBUG".to_string();
                config.metrics_enabled = true;
                config.debug_mode = true;
            }

            Self::Production => {
                config.log_level = "INFO".to_string();
                config.metrics_enabled = true;
                config.debug_mode = false;
            }

            Self::HighThroughput => {
                config.log_level = "WARN".to_string();
                config.metrics_enabled = false; // Disable for performance
                config.processing_delay_ms = 0;
            }

            Self::Minimal => {
                config.log_level = "ERROR".to_string();
                config.metrics_enabled = false;
                config.debug_mode = false;
            }
        }

        config
    }

    /// Recommend a profile based on the number of stored items
    pub fn recommend(item_count: usize) -> Self {
        match item_count {
            0..=100 => Self::Development,
            101..=10_000 => Self::Production,
            _ => Self::HighThroughput,
        }
    }

    /// Get profile name
    pub fn name(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::HighThroughput => "high-throughput",
            Self::Minimal => "minimal",
        }
    }

    /// Get profile description
    pub fn description(self) -> &'static str {
        match self {
            Self::Development => "Verbose logging, metrics, 100ms simulated work per item",
            Self::Production => "Info logging with metrics enabled",
            Self::HighThroughput => "No simulated delay, warnings only",
            Self::Minimal => "Errors only, no metrics",
        }
    }
}

impl FromStr for ConfigProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::config_error(format!(
                    "Unknown profile '{}'. Valid options: development, production, high-throughput, minimal",
                    s
                ))
            })
    }
}

impl std::fmt::Display for ConfigProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_profile() {
        let config = ConfigProfile::Development.create_config();
        assert_eq!(config.log_level, "DEBUG");
        assert_eq!(config.profile, "development");
        assert!(config.metrics_enabled);
        assert!(config.processing_delay_ms > 0);
    }

    #[test]
    fn test_high_throughput_profile() {
        let config = ConfigProfile::HighThroughput.create_config();
        assert_eq!(config.processing_delay_ms, 0);
        assert!(!config.metrics_enabled);
    }

    #[test]
    fn test_minimal_profile() {
        let config = ConfigProfile::Minimal.create_config();
        assert_eq!(config.log_level, "ERROR");
        assert!(!config.metrics_enabled);
    }

    #[test]
    fn test_recommend() {
        assert_eq!(ConfigProfile::recommend(50), ConfigProfile::Development);
        assert_eq!(ConfigProfile::recommend(500), ConfigProfile::Production);
        assert_eq!(ConfigProfile::recommend(50_000), ConfigProfile::HighThroughput);
    }

    #[test]
    fn test_parse_profile() {
        assert_eq!(
            "Production".parse::<ConfigProfile>().unwrap(),
            ConfigProfile::Production
        );
        assert_eq!(
            "high-throughput".parse::<ConfigProfile>().unwrap(),
            ConfigProfile::HighThroughput
        );
        assert!("turbo".parse::<ConfigProfile>().is_err());
    }

    #[test]
    fn test_profiles_all_valid() {
        for profile in ConfigProfile::ALL {
            assert!(profile.create_config().validate().is_ok());
            assert!(!profile.description().is_empty());
        }
    }
}
