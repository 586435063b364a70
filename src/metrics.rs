//! Metrics collection and reporting for pipeline runs.
//!
//! A [`MetricsCollector`] is a shared handle to a set of named counters plus
//! the start/end time of the most recent run. Attach one with
//! [`Pipeline::set_metrics`](crate::Pipeline::set_metrics) and the runner
//! fills in `<stage>.in` / `<stage>.out` counters for every stage it executes.
//! Comparing neighbouring counters shows how many lines were malformed and how
//! many keys were filtered out, without either ever surfacing as an error.
//!
//! # Example
//!
//! ```
//! use linebeam::*;
//! use linebeam::metrics::MetricsCollector;
//!
//! # fn main() -> anyhow::Result<()> {
//! let p = Pipeline::default();
//! let metrics = MetricsCollector::new();
//! p.set_metrics(metrics.clone());
//!
//! from_vec(&p, vec![1u32, 2, 3, 4, 5])
//!     .named("numbers")
//!     .filter(|x: &u32| x % 2 == 1)
//!     .named("odd")
//!     .collect_seq()?;
//!
//! assert_eq!(metrics.counter("odd.in"), Some(5));
//! assert_eq!(metrics.counter("odd.out"), Some(3));
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::info;

/// Thread-safe container for pipeline run metrics.
#[derive(Clone, Default)]
pub struct MetricsCollector {
    inner: Arc<Mutex<MetricsCollectorInner>>,
}

#[derive(Default)]
struct MetricsCollectorInner {
    counters: BTreeMap<String, u64>,
    start_time: Option<Instant>,
    end_time: Option<Instant>,
}

impl MetricsCollector {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Counters stay consistent under poisoning: every update is a single insert.
    fn lock(&self) -> MutexGuard<'_, MetricsCollectorInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new run: counters from earlier runs are dropped and the clock
    /// restarts.
    pub fn begin_run(&self) {
        let mut inner = self.lock();
        inner.counters.clear();
        inner.start_time = Some(Instant::now());
        inner.end_time = None;
    }

    /// Record the end time of a run.
    pub fn record_end(&self) {
        self.lock().end_time = Some(Instant::now());
    }

    /// Elapsed time of the last completed run.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        let inner = self.lock();
        match (inner.start_time, inner.end_time) {
            (Some(start), Some(end)) => Some(end.duration_since(start)),
            _ => None,
        }
    }

    /// Add `value` to a counter, creating it at zero first if needed.
    pub fn increment_counter(&self, name: &str, value: u64) {
        let mut inner = self.lock();
        let slot = inner.counters.entry(name.to_string()).or_insert(0);
        *slot = slot.saturating_add(value);
    }

    /// Overwrite a counter.
    pub fn set_counter(&self, name: &str, value: u64) {
        self.lock().counters.insert(name.to_string(), value);
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> Option<u64> {
        self.lock().counters.get(name).copied()
    }

    /// All counters, sorted by name.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.lock().counters.clone()
    }

    /// Counters plus `execution_time_us` (when a run has completed) as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut out = serde_json::Map::new();
        for (name, value) in self.snapshot() {
            out.insert(name, json!(value));
        }
        if let Some(elapsed) = self.elapsed() {
            out.insert(
                "execution_time_us".to_string(),
                json!(u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)),
            );
        }
        Value::Object(out)
    }

    /// Emit every counter as an `info` event.
    pub fn log(&self) {
        if let Some(elapsed) = self.elapsed() {
            info!(elapsed_us = elapsed.as_micros(), "pipeline run timing");
        }
        for (name, value) in self.snapshot() {
            info!(metric = %name, value, "pipeline metric");
        }
    }

    /// Save [`to_json`](Self::to_json) to a file, pretty-printed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let formatted = serde_json::to_string_pretty(&self.to_json())?;
        fs::write(path, formatted).with_context(|| format!("write metrics to {}", path.display()))
    }

    /// Drop all counters and timings.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.counters.clear();
        inner.start_time = None;
        inner.end_time = None;
    }
}
