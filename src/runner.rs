//! Sequential executor.
//!
//! The runner walks the chain behind a terminal collection from its source
//! forward, applying one node at a time on the calling thread. Each stage's
//! input and output element counts are traced, and recorded as
//! `<label>.in` / `<label>.out` counters when the pipeline carries a
//! [`MetricsCollector`](crate::metrics::MetricsCollector). The collector holds
//! one run at a time; each run starts from empty counters.

use crate::node::{NodeId, NodeKind};
use crate::pipeline::Pipeline;
use crate::type_token::{Partition, downcast_vec};
use anyhow::{Context, Result, anyhow};
use tracing::{debug, debug_span};

#[derive(Clone, Copy, Debug, Default)]
pub struct Runner;

impl Runner {
    /// Execute the chain ending at `terminal` and return its elements.
    ///
    /// # Errors
    /// Fails when a node is missing from the graph or a stage receives a
    /// partition of the wrong element type.
    pub fn run_collect<T: 'static + Send + Sync + Clone>(
        &self,
        p: &Pipeline,
        terminal: NodeId,
    ) -> Result<Vec<T>> {
        let chain = p.linear_chain(terminal)?;
        let metrics = p.metrics();
        let _span = debug_span!("run", stages = chain.len()).entered();

        if let Some(m) = &metrics {
            m.begin_run();
        }

        let mut buf: Option<(Partition, usize)> = None;
        for (id, node) in chain {
            let (out, elements_in) = match &node.kind {
                NodeKind::Source(payload) => {
                    let part = node.out_ops.clone_any(payload.as_ref()).ok_or_else(|| {
                        anyhow!(
                            "source `{}` does not hold Vec<{}>",
                            node.label,
                            node.out_tag.name
                        )
                    })?;
                    (part, None)
                }
                NodeKind::Stateless(op) => {
                    let (input, n) = buf
                        .take()
                        .ok_or_else(|| anyhow!("stage `{}` has no input", node.label))?;
                    let out = op
                        .apply(input)
                        .with_context(|| format!("stage `{}` (node {})", node.label, id.raw()))?;
                    (out, Some(n))
                }
                NodeKind::Barrier(barrier) => {
                    let (input, n) = buf
                        .take()
                        .ok_or_else(|| anyhow!("stage `{}` has no input", node.label))?;
                    let out = barrier(input)
                        .with_context(|| format!("stage `{}` (node {})", node.label, id.raw()))?;
                    (out, Some(n))
                }
            };

            let elements_out = node.out_ops.len(out.as_ref()).ok_or_else(|| {
                anyhow!(
                    "stage `{}` produced something other than Vec<{}>",
                    node.label,
                    node.out_tag.name
                )
            })?;
            debug!(
                stage = %node.label,
                node = id.raw(),
                elements_in = ?elements_in,
                elements_out,
                "stage complete"
            );
            if let Some(m) = &metrics {
                if let Some(n) = elements_in {
                    m.increment_counter(&format!("{}.in", node.label), n as u64);
                }
                m.increment_counter(&format!("{}.out", node.label), elements_out as u64);
            }
            buf = Some((out, elements_out));
        }

        if let Some(m) = &metrics {
            m.record_end();
        }

        let (out, _) = buf.ok_or_else(|| anyhow!("empty plan for node {terminal:?}"))?;
        downcast_vec::<T>(out, "collect")
    }
}
