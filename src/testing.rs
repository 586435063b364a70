//! Testing utilities for linebeam pipelines.
//!
//! - [`TestPipeline`]: a [`Pipeline`] with graph inspection helpers
//! - Assertions: [`assert_collections_equal`], [`assert_all`], [`assert_none`]
//! - Fixtures: the sample record file and the corrupted-entry set used by the
//!   regression tests
//!
//! ```
//! use linebeam::*;
//! use linebeam::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let p = TestPipeline::new();
//! let lines = from_lines(&p, SAMPLE_RECORDS).collect_seq()?;
//! assert_eq!(lines.len(), 11);
//! assert_eq!(p.node_count(), 1);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;

use crate::Pipeline;

/// A [`Pipeline`] with helpers for checking how a graph was built.
#[derive(Clone, Default)]
pub struct TestPipeline {
    pipeline: Pipeline,
}

impl TestPipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        let (nodes, _) = self.pipeline.snapshot();
        nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        let (_, edges) = self.pipeline.snapshot();
        edges.len()
    }
}

// Allow TestPipeline to be used wherever Pipeline is expected
impl std::ops::Deref for TestPipeline {
    type Target = Pipeline;

    fn deref(&self) -> &Self::Target {
        &self.pipeline
    }
}

impl AsRef<Pipeline> for TestPipeline {
    fn as_ref(&self) -> &Pipeline {
        &self.pipeline
    }
}
