//! Error types for recordkeep.
//!
//! Every fallible operation in the workspace returns [`Result`], whose error
//! side is the single [`Error`] enum defined here.

use std::io;
use thiserror::Error as ThisError;

/// The core error type for all record operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No item (or other keyed resource) exists under the given key
    #[error("Not found: {key}")]
    NotFound { key: String },

    /// Input rejected by validation
    #[error("Validation error: {reason}")]
    ValidationError { reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Entity store failure (lookup, persist, listing)
    #[error("Store error: {reason}")]
    StoreError { reason: String },

    /// Failure while processing a single item
    #[error("Processing error: {reason}")]
    ProcessingError { reason: String },

    /// JSON encode/decode failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create a not found error
    pub fn not_found(key: impl Into<String>) -> Self {
        Error::NotFound { key: key.into() }
    }

    /// Create a validation error
    pub fn validation_error(reason: impl Into<String>) -> Self {
        Error::ValidationError {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a store error
    pub fn store_error(reason: impl Into<String>) -> Self {
        Error::StoreError {
            reason: reason.into(),
        }
    }

    /// Create a processing error
    pub fn processing_error(reason: impl Into<String>) -> Self {
        Error::ProcessingError {
            reason: reason.into(),
        }
    }

    /// True for [`Error::NotFound`]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::not_found("item 42");
        assert!(err.to_string().contains("Not found: item 42"));
        assert!(err.is_not_found());

        let err = Error::store_error("disk full");
        assert!(err.to_string().contains("Store error"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
