//! Single-item unit of work.

use crate::report::SkipReason;
use recordkeep_core::prelude::*;
use recordkeep_store::{EntityStore, SharedStore};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Result of processing one identifier
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    /// Item was found, marked processed and persisted
    Processed(Item),
    /// Item produced no result
    Skipped { id: ItemId, reason: SkipReason },
}

impl ItemOutcome {
    fn skipped(id: ItemId, reason: SkipReason) -> Self {
        Self::Skipped { id, reason }
    }

    /// The persisted item, if processing succeeded
    pub fn item(&self) -> Option<&Item> {
        match self {
            Self::Processed(item) => Some(item),
            Self::Skipped { .. } => None,
        }
    }
}

/// Loads one item, marks it processed and saves it back.
///
/// Never returns an error: every failure becomes an
/// [`ItemOutcome::Skipped`].
#[derive(Clone)]
pub struct ItemProcessor {
    store: SharedStore,
    delay: Duration,
    shutdown: CancellationToken,
}

impl ItemProcessor {
    /// Create a processor with the given simulated work delay
    pub fn new(store: SharedStore, delay: Duration) -> Self {
        Self {
            store,
            delay,
            shutdown: CancellationToken::new(),
        }
    }

    /// Attach a shutdown token that interrupts the work delay
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Configured work delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Process one identifier
    #[instrument(skip(self), name = "process_item")]
    pub async fn process(&self, id: ItemId) -> ItemOutcome {
        if !self.simulate_work().await {
            log::warn!("Processing of item id {} interrupted by shutdown", id);
            return ItemOutcome::skipped(id, SkipReason::Interrupted);
        }

        match self.transition(id).await {
            Ok(Some(item)) => {
                log::debug!("Processed {}", item.key());
                ItemOutcome::Processed(item)
            }
            Ok(None) => {
                log::debug!("Item id {} not found, skipping", id);
                ItemOutcome::skipped(id, SkipReason::NotFound)
            }
            Err(e) => {
                log::warn!("Failed to process item with id {}: {}", id, e);
                ItemOutcome::skipped(id, SkipReason::Failed(e.to_string()))
            }
        }
    }

    /// Wait out the work delay. Returns false if shutdown fired first.
    async fn simulate_work(&self) -> bool {
        if self.shutdown.is_cancelled() {
            return false;
        }
        if self.delay.is_zero() {
            return true;
        }

        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => false,
            _ = tokio::time::sleep(self.delay) => true,
        }
    }

    async fn transition(&self, id: ItemId) -> Result<Option<Item>> {
        let Some(item) = self.store.find_by_id(id).await? else {
            return Ok(None);
        };

        let saved = self
            .store
            .save(item.with_status(ItemStatus::Processed))
            .await?;
        Ok(Some(saved))
    }
}

impl std::fmt::Debug for ItemProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemProcessor")
            .field("delay", &self.delay)
            .field("shutdown", &self.shutdown.is_cancelled())
            .finish()
    }
}
