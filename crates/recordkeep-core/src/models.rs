//! Core data models for stored records.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Debuggable**: Derive Debug for easy inspection
//! - **Type-Safe**: `ItemStatus` replaces magic status strings while still
//!   accepting any free-form value

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier assigned to an item by the entity store
pub type ItemId = u64;

/// Lifecycle status of an item.
///
/// Serialized as its plain string form. Unknown values are preserved
/// verbatim in [`ItemStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemStatus {
    /// Freshly created, not yet processed
    #[default]
    New,
    /// Transitioned by a batch run
    Processed,
    /// Any other caller-defined status
    Other(String),
}

impl ItemStatus {
    /// String form used on the wire and in storage
    pub fn as_str(&self) -> &str {
        match self {
            Self::New => "NEW",
            Self::Processed => "PROCESSED",
            Self::Other(s) => s,
        }
    }

    /// Check whether this is the processed state
    pub fn is_processed(&self) -> bool {
        matches!(self, Self::Processed)
    }
}

impl From<String> for ItemStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "NEW" => Self::New,
            "PROCESSED" => Self::Processed,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for ItemStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ItemStatus> for String {
    fn from(status: ItemStatus) -> Self {
        match status {
            ItemStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl FromStr for ItemStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored record.
///
/// `id` is `None` until the store assigns one on first save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: Option<ItemId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ItemStatus,
    pub email: String,
}

impl Item {
    /// Create a new, unsaved item in the `NEW` state
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            status: ItemStatus::New,
            email: email.into(),
        }
    }

    /// Set the identifier
    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: impl Into<ItemStatus>) -> Self {
        self.status = status.into();
        self
    }

    /// Human-readable key used in logs and errors
    pub fn key(&self) -> String {
        match self.id {
            Some(id) => format!("item {}", id),
            None => format!("unsaved item '{}'", self.name),
        }
    }
}
