//! Graph nodes and the element-wise operator trait.
//!
//! A [`Node`] is one stage of a pipeline: a source, an element-wise
//! ([`NodeKind::Stateless`]) operator, or a whole-collection barrier such as a
//! sort or a global fold. Every node carries a stage label plus the
//! [`VecOps`]/[`TypeTag`] for its *output* element type, which is what the
//! runner uses to count elements and to explain type mismatches.

use crate::type_token::{Partition, TypeTag, VecOps};
use anyhow::Result;
use std::any::Any;
use std::sync::Arc;

/// Unique numeric identifier for a node in a pipeline graph.
///
/// Assigned sequentially by [`Pipeline`](crate::pipeline::Pipeline); small,
/// `Copy` and hashable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn new(v: u64) -> Self {
        Self(v)
    }

    /// Return the underlying numeric value.
    #[must_use]
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// An element-wise operator over one partition.
pub trait DynOp: Send + Sync {
    fn apply(&self, input: Partition) -> Result<Partition>;
}

/// A whole-collection step: consumes the full input partition at once.
pub type BarrierFn = Arc<dyn Fn(Partition) -> Result<Partition> + Send + Sync>;

#[derive(Clone)]
pub enum NodeKind {
    /// Pre-built `Vec<T>` payload; cloned on every run so a collection can be collected twice.
    Source(Arc<dyn Any + Send + Sync>),
    Stateless(Arc<dyn DynOp>),
    Barrier(BarrierFn),
}

#[derive(Clone)]
pub struct Node {
    pub label: String,
    pub kind: NodeKind,
    pub out_ops: Arc<dyn VecOps>,
    pub out_tag: TypeTag,
}

impl Node {
    pub(crate) fn new<O: Clone + Send + Sync + 'static>(label: &str, kind: NodeKind) -> Self {
        Self {
            label: label.to_string(),
            kind,
            out_ops: crate::type_token::vec_ops_for::<O>(),
            out_tag: TypeTag::of::<O>(),
        }
    }
}
