//! Uniform response envelope for every operation

use recordkeep_core::prelude::*;
use serde::{Deserialize, Serialize};

/// Response envelope shared by all operations
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StandardResponse<T: Serialize> {
    /// Store this operation ran against
    pub store: String,
    /// Operation name (e.g., "create_item", "process_all")
    pub operation: String,
    /// Whether the operation succeeded
    pub success: bool,
    /// Result payload
    pub data: T,
    /// Number of items in the payload, when it is a list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// How long the operation took in milliseconds
    pub took_ms: u64,
    /// Non-fatal notes (skipped items, informational validation issues)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Suggested follow-up commands
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub next_steps: Vec<String>,
    /// Free-form extra fields (run id, timestamps)
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub meta: serde_json::Map<String, serde_json::Value>,
}

impl<T: Serialize> StandardResponse<T> {
    pub fn new(store: impl Into<String>, operation: impl Into<String>, data: T) -> Self {
        Self {
            store: store.into(),
            operation: operation.into(),
            success: true,
            data,
            count: None,
            took_ms: 0,
            warnings: vec![],
            next_steps: vec![],
            meta: serde_json::Map::new(),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_duration(mut self, ms: u64) -> Self {
        self.took_ms = ms;
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings<I, S>(mut self, warnings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.warnings.extend(warnings.into_iter().map(Into::into));
        self
    }

    pub fn with_next_steps(mut self, steps: &[&str]) -> Self {
        self.next_steps.extend(steps.iter().map(|s| s.to_string()));
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    pub fn with_success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    /// Serialize into a JSON value
    pub fn to_json(self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Envelope for a failed operation
pub fn error_response(
    store: impl Into<String>,
    operation: impl Into<String>,
    error: &Error,
) -> StandardResponse<serde_json::Value> {
    StandardResponse::new(
        store,
        operation,
        serde_json::json!({ "error": error.to_string() }),
    )
    .with_success(false)
}
