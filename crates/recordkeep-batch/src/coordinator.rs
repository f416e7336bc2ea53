//! Fan-out/fan-in over every stored item.

use crate::accumulator::ResultAccumulator;
use crate::processor::{ItemOutcome, ItemProcessor};
use crate::report::{BatchReport, SkipReason, SkippedItem};
use futures::future::join_all;
use recordkeep_core::prelude::*;
use recordkeep_store::{EntityStore, SharedStore};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Runs the item processor over every stored item concurrently.
///
/// Each run snapshots the id set once, spawns one task per id, waits for
/// every task to finish and returns the successes in dispatch order.
/// Per-item failures never fail the run. Runs share nothing but the store,
/// so overlapping runs are independent.
#[derive(Clone)]
pub struct BatchCoordinator {
    store: SharedStore,
    processor: ItemProcessor,
    metrics: MetricsContext,
}

impl BatchCoordinator {
    /// Create a coordinator using the config's processing delay and metrics flag
    pub fn new(store: SharedStore, config: &AppConfig) -> Self {
        Self::with_delay(store, config.processing_delay())
            .with_metrics(MetricsContext::new(config.metrics_enabled))
    }

    /// Create a coordinator with an explicit per-item delay
    pub fn with_delay(store: SharedStore, delay: Duration) -> Self {
        Self {
            processor: ItemProcessor::new(store.clone(), delay),
            store,
            metrics: MetricsContext::default(),
        }
    }

    /// Interrupt in-flight work when this token fires
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.processor = self.processor.with_shutdown(shutdown);
        self
    }

    /// Record run metrics into the given context
    pub fn with_metrics(mut self, metrics: MetricsContext) -> Self {
        self.metrics = metrics;
        self
    }

    /// Metrics recorded by this coordinator
    pub fn metrics(&self) -> &MetricsContext {
        &self.metrics
    }

    /// Process every stored item, returning the ones that succeeded
    pub async fn run_batch(&self) -> Vec<Item> {
        self.run_batch_with_report().await.into_items()
    }

    /// Start a run in the background. Must be called within a tokio runtime.
    ///
    /// Dropping the handle detaches the run; it still completes.
    pub fn spawn(&self) -> BatchHandle {
        let coordinator = self.clone();
        BatchHandle {
            inner: tokio::spawn(async move { coordinator.run_batch_with_report().await }),
        }
    }

    /// Process every stored item, reporting the outcome of each id
    #[instrument(skip(self), name = "batch_run")]
    pub async fn run_batch_with_report(&self) -> BatchReport {
        let tracker = RunTracker::new();
        let _timer = self.metrics.histogram("batch.run.duration_ms").timer();
        self.metrics.counter("batch.runs").increment();

        // Owned by this run only
        let accumulator = Arc::new(ResultAccumulator::new());

        let ids = match self.store.find_all_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                log::error!("Batch run {} could not list items: {}", tracker.run_id(), e);
                return BatchReport::empty(&tracker);
            }
        };

        if ids.is_empty() {
            log::info!("Batch run {}: no items to process", tracker.run_id());
            return BatchReport::empty(&tracker);
        }

        log::info!(
            "Batch run {} dispatching {} items",
            tracker.run_id(),
            ids.len()
        );

        let handles: Vec<(ItemId, JoinHandle<ItemOutcome>)> = ids
            .iter()
            .enumerate()
            .map(|(index, &id)| {
                let processor = self.processor.clone();
                let accumulator = accumulator.clone();
                let handle = tokio::spawn(async move {
                    let outcome = processor.process(id).await;
                    if let ItemOutcome::Processed(item) = &outcome {
                        accumulator.append(index, item.clone());
                    }
                    outcome
                });
                (id, handle)
            })
            .collect();

        // Completion barrier: every task is terminal once this resolves
        let joined = join_all(
            handles
                .into_iter()
                .map(|(id, handle)| async move { (id, handle.await) }),
        )
        .await;

        let mut skipped = Vec::new();
        for (id, result) in joined {
            match result {
                Ok(ItemOutcome::Processed(_)) => {}
                Ok(ItemOutcome::Skipped { id, reason }) => {
                    skipped.push(SkippedItem { id, reason });
                }
                Err(e) => {
                    log::error!("Error retrieving outcome for item id {}: {}", id, e);
                    self.metrics.counter("batch.items.faulted").increment();
                    skipped.push(SkippedItem {
                        id,
                        reason: SkipReason::Faulted(e.to_string()),
                    });
                }
            }
        }

        let processed = match Arc::try_unwrap(accumulator) {
            Ok(accumulator) => accumulator.into_ordered(),
            Err(shared) => shared.take_ordered(),
        };

        self.metrics
            .counter("batch.items.processed")
            .add(processed.len() as u64);
        self.metrics
            .counter("batch.items.skipped")
            .add(skipped.len() as u64);

        let report = BatchReport {
            run_id: tracker.run_id().to_string(),
            started_at: tracker.started_at(),
            total: ids.len(),
            processed,
            skipped,
            duration_ms: tracker.elapsed_ms(),
        };
        log::info!("Batch {}", report.summary());
        report
    }
}

impl std::fmt::Debug for BatchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchCoordinator")
            .field("processor", &self.processor)
            .field("metrics_enabled", &self.metrics.is_enabled())
            .finish()
    }
}

/// Handle to a run started with [`BatchCoordinator::spawn`]
#[derive(Debug)]
pub struct BatchHandle {
    inner: JoinHandle<BatchReport>,
}

impl BatchHandle {
    /// Whether the run has finished
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

impl Future for BatchHandle {
    type Output = Result<BatchReport>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.inner)
            .poll(cx)
            .map_err(|e| Error::processing_error(format!("Batch run task failed: {}", e)))
    }
}
