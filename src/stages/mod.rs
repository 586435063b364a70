//! The five record-processing stages, as plain functions and combiners.
//!
//! Each stage is usable on its own; [`StatusPipeline`](crate::StatusPipeline)
//! wires them together on top of the pipeline engine.
//!
//! 1. [`lines`] -- raw text to ordered lines
//! 2. [`tokenize`] -- line to optional `(key, value)` token
//! 3. [`keys`] -- key normalization and target selection
//! 4. [`aggregate`] -- sort, parse and fold values
//! 5. [`status`] -- aggregate to status message

pub mod aggregate;
pub mod keys;
pub mod lines;
pub mod status;
pub mod tokenize;
