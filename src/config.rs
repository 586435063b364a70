//! Pipeline configuration.
//!
//! The defaults match the record format the pipeline was built for: `KEY=VALUE`
//! lines, keys selected when they contain `ELEMENT` in any casing, and a
//! short-circuiting sum. A config can also be loaded from JSON; missing
//! fields fall back to their defaults.
//!
//! ```
//! use linebeam::config::{PipelineConfig, Propagation};
//!
//! let cfg = PipelineConfig::from_json_str(r#"{ "propagation": "silent_corruption" }"#)?;
//! assert_eq!(cfg.delimiter, '=');
//! assert_eq!(cfg.propagation, Propagation::SilentCorruption);
//! # anyhow::Result::<()>::Ok(())
//! ```

use crate::stages::keys::KeyOrder;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_DELIMITER: char = '=';
pub const DEFAULT_TARGET: &str = "ELEMENT";

/// How a value that fails to parse affects the aggregate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Propagation {
    /// The first bad value makes the aggregate unavailable.
    #[default]
    ShortCircuit,
    /// Bad values become `NaN` and corrupt the sum. Regression fixture only.
    SilentCorruption,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("delimiter must not be a line break, got {0:?}")]
    LineBreakDelimiter(char),
    #[error("target must not be empty")]
    EmptyTarget,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub delimiter: char,
    pub target: String,
    pub key_order: KeyOrder,
    pub propagation: Propagation,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            target: DEFAULT_TARGET.to_string(),
            key_order: KeyOrder::default(),
            propagation: Propagation::default(),
        }
    }
}

impl PipelineConfig {
    /// # Errors
    /// [`ConfigError::LineBreakDelimiter`] for `'\n'` or `'\r'` (lines can
    /// never contain them), [`ConfigError::EmptyTarget`] for an empty target.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.delimiter, '\n' | '\r') {
            return Err(ConfigError::LineBreakDelimiter(self.delimiter));
        }
        if self.target.is_empty() {
            return Err(ConfigError::EmptyTarget);
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    ///
    /// # Errors
    /// Malformed JSON, unknown fields, or a config that fails [`validate`](Self::validate).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("parse pipeline config")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    ///
    /// # Errors
    /// As [`from_json_str`](Self::from_json_str), plus I/O errors.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("load config {}", path.display()))
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    #[must_use]
    pub fn with_key_order(mut self, key_order: KeyOrder) -> Self {
        self.key_order = key_order;
        self
    }

    #[must_use]
    pub fn with_propagation(mut self, propagation: Propagation) -> Self {
        self.propagation = propagation;
        self
    }
}
