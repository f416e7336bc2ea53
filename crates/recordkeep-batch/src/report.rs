//! Per-run result types.

use chrono::{DateTime, Utc};
use recordkeep_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an item is absent from a run's results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// No item under this id at processing time
    NotFound,
    /// Lookup, transition or persist failed
    Failed(String),
    /// Shutdown was requested while the item was being worked on
    Interrupted,
    /// The task itself panicked or was aborted
    Faulted(String),
}

impl SkipReason {
    /// Not-found is a normal skip; everything else is a failure
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::Failed(msg) => write!(f, "failed: {}", msg),
            Self::Interrupted => write!(f, "interrupted"),
            Self::Faulted(msg) => write!(f, "task faulted: {}", msg),
        }
    }
}

/// An item id that produced no result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedItem {
    pub id: ItemId,
    pub reason: SkipReason,
}

/// Outcome of a whole batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Unique run ID
    pub run_id: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Size of the id snapshot taken at launch
    pub total: usize,
    /// Successfully processed items, in dispatch order
    pub processed: Vec<Item>,
    /// Ids without a result, in dispatch order
    pub skipped: Vec<SkippedItem>,
    /// Execution duration in milliseconds
    pub duration_ms: u64,
}

impl BatchReport {
    /// Report for a run that dispatched nothing
    pub fn empty(tracker: &RunTracker) -> Self {
        Self {
            run_id: tracker.run_id().to_string(),
            started_at: tracker.started_at(),
            total: 0,
            processed: Vec::new(),
            skipped: Vec::new(),
            duration_ms: tracker.elapsed_ms(),
        }
    }

    /// Number of processed items
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    /// Number of skipped items (not found or failed)
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Skipped entries that were real failures rather than missing items
    pub fn failures(&self) -> impl Iterator<Item = &SkippedItem> {
        self.skipped.iter().filter(|s| s.reason.is_failure())
    }

    /// True when every id in the snapshot was processed
    pub fn all_processed(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Drop the per-item detail, keeping only the processed items
    pub fn into_items(self) -> Vec<Item> {
        self.processed
    }

    /// One-line summary for logs
    pub fn summary(&self) -> String {
        format!(
            "run {}: {}/{} processed, {} skipped ({} failed) in {}ms",
            self.run_id,
            self.processed_count(),
            self.total,
            self.skipped_count(),
            self.failures().count(),
            self.duration_ms
        )
    }
}
