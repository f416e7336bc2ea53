//! # Recordkeep Batch
//!
//! Concurrent processing of every stored item.
//!
//! A run takes one snapshot of the stored ids, spawns one tokio task per id
//! and waits for all of them before assembling the result:
//!
//! - [`ItemProcessor`]: waits the configured delay, loads the item, marks it
//!   `PROCESSED` and saves it. Failures become [`ItemOutcome::Skipped`].
//! - [`ResultAccumulator`]: per-run, mutex-guarded collection of successes.
//! - [`BatchCoordinator`]: the fan-out, the completion barrier and the
//!   ordered fan-in.
//!
//! ```no_run
//! use recordkeep_batch::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() {
//! let store: SharedStore = Arc::new(MemoryStore::new());
//! let coordinator = BatchCoordinator::with_delay(store, Duration::from_millis(100));
//!
//! let report = coordinator.run_batch_with_report().await;
//! for skipped in &report.skipped {
//!     println!("{} skipped: {}", skipped.id, skipped.reason);
//! }
//! # }
//! ```

pub mod accumulator;
pub mod coordinator;
pub mod processor;
pub mod report;

pub use accumulator::ResultAccumulator;
pub use coordinator::{BatchCoordinator, BatchHandle};
pub use processor::{ItemOutcome, ItemProcessor};
pub use report::{BatchReport, SkipReason, SkippedItem};

pub mod prelude {
    pub use crate::accumulator::ResultAccumulator;
    pub use crate::coordinator::{BatchCoordinator, BatchHandle};
    pub use crate::processor::{ItemOutcome, ItemProcessor};
    pub use crate::report::{BatchReport, SkipReason, SkippedItem};
    pub use recordkeep_store::prelude::*;
}
