use crate::metrics::MetricsCollector;
use crate::node::{Node, NodeId};
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// -------- Pipeline + nodes --------
/// A small graph of stages; collections are handles into it and nothing runs
/// until one of them is collected.
pub struct Pipeline {
    pub(crate) inner: Arc<Mutex<PipelineInner>>,
}

pub struct PipelineInner {
    pub next_id: u64,
    pub nodes: HashMap<NodeId, Node>,
    pub edges: Vec<(NodeId, NodeId)>,
    pub metrics: Option<MetricsCollector>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(PipelineInner {
                next_id: 0,
                nodes: HashMap::new(),
                edges: Vec::new(),
                metrics: None,
            })),
        }
    }
}

/// Clones share the same graph.
impl Clone for Pipeline {
    fn clone(&self) -> Self {
        Pipeline {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Pipeline {
    // The graph is only ever appended to, so a poisoned lock still holds a usable graph.
    fn lock(&self) -> MutexGuard<'_, PipelineInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn insert_node(&self, node: Node) -> NodeId {
        let mut g = self.lock();
        let id = NodeId::new(g.next_id);
        g.next_id += 1;
        g.nodes.insert(id, node);
        id
    }

    pub(crate) fn connect(&self, from: NodeId, to: NodeId) {
        self.lock().edges.push((from, to));
    }

    pub(crate) fn relabel(&self, id: NodeId, label: &str) {
        if let Some(node) = self.lock().nodes.get_mut(&id) {
            node.label = label.to_string();
        }
    }

    /// Copy of the current graph: nodes by id, plus edges in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> (HashMap<NodeId, Node>, Vec<(NodeId, NodeId)>) {
        let g = self.lock();
        (g.nodes.clone(), g.edges.clone())
    }

    /// Walk back from `terminal` to its source and return the chain source-first.
    ///
    /// # Errors
    /// Fails if an id on the walk is not part of this pipeline.
    pub fn linear_chain(&self, terminal: NodeId) -> Result<Vec<(NodeId, Node)>> {
        let (mut nodes, edges) = self.snapshot();
        let mut chain = Vec::new();
        let mut cur = terminal;
        loop {
            let node = nodes
                .remove(&cur)
                .ok_or_else(|| anyhow!("missing node {cur:?}"))?;
            chain.push((cur, node));
            match edges.iter().find(|(_, to)| *to == cur) {
                Some((from, _)) => cur = *from,
                None => break,
            }
        }
        chain.reverse();
        Ok(chain)
    }

    /// Attach a collector; every later run records per-stage counters into it.
    pub fn set_metrics(&self, metrics: MetricsCollector) {
        self.lock().metrics = Some(metrics);
    }

    /// The attached collector, if any. Collectors are shared handles.
    #[must_use]
    pub fn metrics(&self) -> Option<MetricsCollector> {
        self.lock().metrics.clone()
    }

    /// Detach and return the collector.
    pub fn take_metrics(&self) -> Option<MetricsCollector> {
        self.lock().metrics.take()
    }
}
