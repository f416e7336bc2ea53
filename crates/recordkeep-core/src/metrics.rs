//! Lightweight in-process metrics.
//!
//! - Counter: monotonically increasing atomic u64
//! - Histogram: recorded samples behind a parking_lot lock
//! - HistogramTimer: RAII timer recording elapsed milliseconds on drop
//! - MetricsContext: named registry shared by the batch coordinator

use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// A lock-free counter metric
#[derive(Debug, Clone)]
pub struct Counter {
    value: Arc<AtomicU64>,
    name: String,
}

impl Counter {
    /// Create a new counter with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            value: Arc::new(AtomicU64::new(0)),
            name: name.into(),
        }
    }

    /// Increment counter by 1
    pub fn increment(&self) {
        self.add(1);
    }

    /// Add to the counter, saturating at `u64::MAX`
    pub fn add(&self, value: u64) {
        // fetch_update only fails when the closure returns None
        let _ = self
            .value
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(current.saturating_add(value))
            });
    }

    /// Current value
    pub fn value(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }

    /// Metric name
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A histogram of recorded samples
#[derive(Debug, Clone)]
pub struct Histogram {
    values: Arc<RwLock<Vec<f64>>>,
    name: String,
}

impl Histogram {
    /// Create a new histogram
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            values: Arc::new(RwLock::new(Vec::new())),
            name: name.into(),
        }
    }

    /// Record a sample
    pub fn record(&self, value: f64) {
        self.values.write().push(value);
    }

    /// Start a timer that records elapsed milliseconds when dropped
    pub fn timer(&self) -> HistogramTimer {
        HistogramTimer {
            histogram: self.clone(),
            start: Instant::now(),
        }
    }

    /// Summary statistics over all samples
    pub fn stats(&self) -> HistogramStats {
        let values = self.values.read();
        if values.is_empty() {
            return HistogramStats::default();
        }

        let count = values.len();
        let sum: f64 = values.iter().sum();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        HistogramStats {
            count,
            sum,
            min,
            max,
            mean: sum / count as f64,
        }
    }

    /// Metric name
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Statistics computed from histogram samples
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistogramStats {
    pub count: usize,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// RAII timer that records its lifetime into a histogram
#[derive(Debug)]
pub struct HistogramTimer {
    histogram: Histogram,
    start: Instant,
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram
            .record(self.start.elapsed().as_secs_f64() * 1000.0);
    }
}

/// Named metrics registry.
///
/// A disabled context still hands out working metrics, but does not
/// register them, so snapshots stay empty.
#[derive(Debug, Clone)]
pub struct MetricsContext {
    enabled: bool,
    counters: Arc<RwLock<HashMap<String, Counter>>>,
    histograms: Arc<RwLock<HashMap<String, Histogram>>>,
}

impl MetricsContext {
    /// Create new metrics context
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            counters: Arc::new(RwLock::new(HashMap::new())),
            histograms: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Whether metrics are being registered
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get or create a named counter
    pub fn counter(&self, name: &str) -> Counter {
        if !self.enabled {
            return Counter::new(name);
        }

        self.counters
            .write()
            .entry(name.to_string())
            .or_insert_with(|| Counter::new(name))
            .clone()
    }

    /// Get or create a named histogram
    pub fn histogram(&self, name: &str) -> Histogram {
        if !self.enabled {
            return Histogram::new(name);
        }

        self.histograms
            .write()
            .entry(name.to_string())
            .or_insert_with(|| Histogram::new(name))
            .clone()
    }

    /// Snapshot of all counter values
    pub fn get_counters(&self) -> HashMap<String, u64> {
        self.counters
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.value()))
            .collect()
    }

    /// Snapshot of all histogram statistics
    pub fn get_histograms(&self) -> HashMap<String, HistogramStats> {
        self.histograms
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.stats()))
            .collect()
    }
}

impl Default for MetricsContext {
    fn default() -> Self {
        Self::new(false)
    }
}
