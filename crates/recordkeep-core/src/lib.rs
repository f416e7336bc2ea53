//! # Recordkeep Core
//!
//! Core data models, error types, and configuration shared by every
//! recordkeep crate.
//!
//! ## Core Modules
//!
//! - [`models`] - The stored [`Item`] and its [`ItemStatus`]
//! - [`error`] - The [`Error`] enum and [`Result`] alias
//! - [`config`] - [`AppConfig`] with YAML load/save
//! - [`profiles`] - [`ConfigProfile`] presets
//! - [`validation`] - Item validators (email, required fields)
//! - [`metrics`] - Counters and histograms for batch runs
//! - [`utils`] - Run tracking and JSON helpers
//!
//! ## Usage
//!
//! ```
//! use recordkeep_core::prelude::*;
//!
//! let item = Item::new("Item1", "Desc1", "item1@email.com");
//! assert_eq!(item.status, ItemStatus::New);
//!
//! let config = ConfigProfile::Development.create_config();
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod profiles;
pub mod utils;
pub mod validation;

pub use config::*;
pub use error::{Error, Result};
pub use metrics::{Counter, Histogram, HistogramStats, HistogramTimer, MetricsContext};
pub use models::*;
pub use profiles::ConfigProfile;
pub use utils::RunTracker;
pub use validation::{
    CompositeValidator, EmailValidator, FieldValidator, MAX_NAME_LEN, Severity, ValidationIssue,
    ValidationReport, Validator,
};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::error::{Error, Result};
    pub use crate::metrics::{Counter, Histogram, MetricsContext};
    pub use crate::models::{Item, ItemId, ItemStatus};
    pub use crate::profiles::ConfigProfile;
    pub use crate::utils::RunTracker;
    pub use crate::validation::{CompositeValidator, ValidationReport, Validator};
}
