//! Batch processing entry point

use recordkeep_batch::{BatchCoordinator, BatchReport};
use recordkeep_core::prelude::*;
use recordkeep_store::SharedStore;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Batch processing tools
#[derive(Debug, Clone)]
pub struct BatchTools {
    pub coordinator: BatchCoordinator,
}

impl BatchTools {
    /// Create batch tools configured from the application config
    pub fn new(store: SharedStore, config: &AppConfig) -> Self {
        Self {
            coordinator: BatchCoordinator::new(store, config),
        }
    }

    /// Create batch tools with an explicit per-item delay
    pub fn with_delay(store: SharedStore, delay: Duration) -> Self {
        Self {
            coordinator: BatchCoordinator::with_delay(store, delay),
        }
    }

    /// Interrupt in-flight processing when the token fires
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.coordinator = self.coordinator.with_shutdown(shutdown);
        self
    }

    /// Process every stored item and return the ones that succeeded
    pub async fn process_all(&self) -> Vec<Item> {
        self.coordinator.run_batch().await
    }

    /// Process every stored item, keeping per-item outcomes
    pub async fn process_all_with_report(&self) -> BatchReport {
        self.coordinator.run_batch_with_report().await
    }

    /// Metrics recorded across runs
    pub fn metrics(&self) -> &MetricsContext {
        self.coordinator.metrics()
    }
}
