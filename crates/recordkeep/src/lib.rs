//! # Recordkeep
//!
//! Item storage with CRUD operations and a concurrent batch processor.
//!
//! This crate re-exports the workspace crates and holds the start-up logic
//! shared by the `recordkeep` binary.

use std::path::Path;

pub use recordkeep_batch;
pub use recordkeep_core;
pub use recordkeep_store;
pub use recordkeep_tools;

pub use recordkeep_core::prelude::*;
pub use recordkeep_tools::prelude::*;

/// Configuration resolved at start-up
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: AppConfig,
    /// Notes about ignored settings. Config is resolved before logging is
    /// installed, so the caller logs these once it is.
    pub warnings: Vec<String>,
}

/// Resolve the effective configuration.
///
/// An explicit config file wins; otherwise the named profile is used, and
/// with neither the defaults apply.
pub async fn load_config(path: Option<&Path>, profile: Option<&str>) -> Result<LoadedConfig> {
    let mut warnings = Vec::new();

    let config = match (path, profile) {
        (Some(path), profile) => {
            if let Some(profile) = profile {
                warnings.push(format!(
                    "Ignoring profile '{}' because config file {} was given",
                    profile,
                    path.display()
                ));
            }
            AppConfig::load(path).await?
        }
        (None, Some(name)) => name.parse::<ConfigProfile>()?.create_config(),
        (None, None) => AppConfig::default(),
    };

    Ok(LoadedConfig { config, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_without_file_or_profile() {
        let loaded = load_config(None, None).await.unwrap();
        assert_eq!(loaded.config, AppConfig::default());
        assert!(loaded.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_profile_by_name() {
        let loaded = load_config(None, Some("High-Throughput")).await.unwrap();
        assert_eq!(loaded.config.processing_delay_ms, 0);
        assert!(loaded.warnings.is_empty());
        assert!(load_config(None, Some("turbo")).await.is_err());
    }

    #[tokio::test]
    async fn test_file_wins_over_profile() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("recordkeep.yaml");
        let mut config = AppConfig::default();
        config.processing_delay_ms = 7;
        config.save(&path).await.unwrap();

        let loaded = load_config(Some(&path), Some("minimal")).await.unwrap();
        assert_eq!(loaded.config.processing_delay_ms, 7);
        assert_eq!(loaded.config.profile, "default");
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("Ignoring profile 'minimal'"));

        let without_profile = load_config(Some(&path), None).await.unwrap();
        assert!(without_profile.warnings.is_empty());
    }
}
