//! End-to-end wiring of the stages on the pipeline engine.
//!
//! ```text
//! read_lines -> tokenize -> select_keys -> sort_by_key -> checked_sum -> format_status
//!                                                      \-> lossy_sum   -> format_lossy
//! ```
//!
//! Malformed lines and non-target keys are dropped along the way; only a bad
//! value changes the outcome, and how it does so depends on
//! [`Propagation`].

use crate::collection::PCollection;
use crate::config::{ConfigError, PipelineConfig, Propagation};
use crate::metrics::MetricsCollector;
use crate::pipeline::Pipeline;
use crate::sources::from_lines;
use crate::stages::aggregate::{Aggregate, CheckedSum, LossySum};
use crate::stages::keys::Entry;
use crate::stages::status::{StatusMessage, format_lossy, format_status};
use crate::stages::tokenize::{Token, tokenize};
use anyhow::Result;
use tracing::{info, warn};

/// A configured record-to-status pipeline. Each call builds and runs a fresh
/// graph over the given text, so calls are independent of each other.
#[derive(Clone, Default)]
pub struct StatusPipeline {
    config: PipelineConfig,
    metrics: Option<MetricsCollector>,
}

impl StatusPipeline {
    /// # Errors
    /// Returns the config's validation error.
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            metrics: None,
        })
    }

    /// Record per-stage counters for every run into `metrics`.
    #[must_use]
    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = Some(metrics);
        self
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn graph(&self) -> Pipeline {
        let p = Pipeline::default();
        if let Some(m) = &self.metrics {
            p.set_metrics(m.clone());
        }
        p
    }

    /// Lines through selection and sorting: the entries that will be summed.
    fn entries(&self, p: &Pipeline, text: &str) -> PCollection<Entry> {
        let delimiter = self.config.delimiter;
        let target = self.config.target.clone();
        let order = self.config.key_order;

        from_lines(p, text)
            .filter_map(move |line: &String| tokenize(line, delimiter))
            .named("tokenize")
            .filter_map(move |token: &Token| order.admit(token.clone(), &target))
            .named("select_keys")
            .sort_by_key(|entry: &Entry| entry.key().to_owned())
            .named("sort_by_key")
    }

    /// The selected, sorted entries of `text`.
    ///
    /// # Errors
    /// Engine failures only; bad records never error.
    pub fn selected_entries(&self, text: &str) -> Result<Vec<Entry>> {
        let p = self.graph();
        self.entries(&p, text).collect_seq()
    }

    /// Short-circuit aggregate of `text`, regardless of the configured propagation.
    ///
    /// # Errors
    /// Engine failures only; a bad value is reported inside the `Aggregate`.
    pub fn aggregate(&self, text: &str) -> Result<Aggregate> {
        let p = self.graph();
        self.entries(&p, text)
            .combine_globally(CheckedSum)
            .named("checked_sum")
            .collect_single()
    }

    /// Lossy total of `text`, regardless of the configured propagation.
    ///
    /// # Errors
    /// Engine failures only.
    pub fn lossy_total(&self, text: &str) -> Result<f64> {
        let p = self.graph();
        self.entries(&p, text)
            .combine_globally(LossySum)
            .named("lossy_sum")
            .collect_single()
    }

    /// Run every stage, including formatting, under the configured propagation.
    ///
    /// # Errors
    /// Engine failures only.
    pub fn evaluate(&self, text: &str) -> Result<StatusMessage> {
        let p = self.graph();
        let entries = self.entries(&p, text);
        let status = match self.config.propagation {
            Propagation::ShortCircuit => entries
                .combine_globally(CheckedSum)
                .named("checked_sum")
                .map(|aggregate: &Aggregate| {
                    if let Err(failure) = aggregate {
                        warn!(%failure, "aggregate unavailable");
                    }
                    format_status(aggregate)
                })
                .named("format_status")
                .collect_single()?,
            Propagation::SilentCorruption => entries
                .combine_globally(LossySum)
                .named("lossy_sum")
                .map(|total: &f64| format_lossy(*total))
                .named("format_lossy")
                .collect_single()?,
        };
        info!(%status, propagation = ?self.config.propagation, "status evaluated");
        Ok(status)
    }
}

/// Status line for `text` under the default configuration.
///
/// ```
/// let text = "ELEMENT01=3\nfoo=4\nelement02=30\n";
/// assert_eq!(linebeam::status_of(text).unwrap(), "[33%] Running...");
/// ```
///
/// # Errors
/// Engine failures only.
pub fn status_of(text: &str) -> Result<String> {
    Ok(StatusPipeline::default().evaluate(text)?.to_string())
}
