//! Run tracking shared by batch runs and front ends.

use chrono::{DateTime, Utc};
use std::time::Instant;

/// Identity and timing of one batch run
#[derive(Debug, Clone)]
pub struct RunTracker {
    run_id: String,
    started_at: DateTime<Utc>,
    start_time: Instant,
}

impl RunTracker {
    /// Start tracking a new run
    pub fn new() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            start_time: Instant::now(),
        }
    }

    /// Unique run ID
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Wall-clock start time
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }
}

impl Default for RunTracker {
    fn default() -> Self {
        Self::new()
    }
}
