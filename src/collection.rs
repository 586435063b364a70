use crate::node::{DynOp, Node, NodeId, NodeKind};
use crate::pipeline::Pipeline;
use crate::runner::Runner;
use crate::type_token::{Partition, downcast_vec};
use anyhow::{Result, bail};
use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;
use std::sync::Arc;

/// Bound shared by every element type that flows through a pipeline.
pub trait RFBound: 'static + Send + Sync + Clone + Serialize + DeserializeOwned {}
impl<T> RFBound for T where T: 'static + Send + Sync + Clone + Serialize + DeserializeOwned {}

/// A lazy, immutable handle to the output of one pipeline node.
///
/// Transforms consume the handle and return a new one; nothing executes until
/// [`collect_seq`](PCollection::collect_seq) or
/// [`collect_single`](PCollection::collect_single) is called. Cloning a handle
/// is cheap and lets the same upstream graph be collected more than once.
#[derive(Clone)]
pub struct PCollection<T> {
    pub(crate) pipeline: Pipeline,
    pub(crate) id: NodeId,
    pub(crate) _t: PhantomData<T>,
}

/// ---- Stateless DynOps ----
pub(crate) struct MapOp<I, O, F>(pub F, pub PhantomData<(I, O)>);
impl<I, O, F> DynOp for MapOp<I, O, F>
where
    I: RFBound,
    O: RFBound,
    F: Send + Sync + Fn(&I) -> O + 'static,
{
    fn apply(&self, input: Partition) -> Result<Partition> {
        let v = downcast_vec::<I>(input, "map")?;
        Ok(Box::new(v.iter().map(|i| self.0(i)).collect::<Vec<O>>()))
    }
}

pub(crate) struct FilterOp<T, P>(pub P, pub PhantomData<T>);
impl<T, P> DynOp for FilterOp<T, P>
where
    T: RFBound,
    P: Send + Sync + Fn(&T) -> bool + 'static,
{
    fn apply(&self, input: Partition) -> Result<Partition> {
        let v = downcast_vec::<T>(input, "filter")?;
        Ok(Box::new(v.into_iter().filter(|t| self.0(t)).collect::<Vec<T>>()))
    }
}

pub(crate) struct FlatMapOp<I, O, F>(pub F, pub PhantomData<(I, O)>);
impl<I, O, F> DynOp for FlatMapOp<I, O, F>
where
    I: RFBound,
    O: RFBound,
    F: Send + Sync + Fn(&I) -> Vec<O> + 'static,
{
    fn apply(&self, input: Partition) -> Result<Partition> {
        let v = downcast_vec::<I>(input, "flat_map")?;
        let mut out: Vec<O> = Vec::new();
        for i in &v {
            out.extend(self.0(i));
        }
        Ok(Box::new(out))
    }
}

pub(crate) struct FilterMapOp<I, O, F>(pub F, pub PhantomData<(I, O)>);
impl<I, O, F> DynOp for FilterMapOp<I, O, F>
where
    I: RFBound,
    O: RFBound,
    F: Send + Sync + Fn(&I) -> Option<O> + 'static,
{
    fn apply(&self, input: Partition) -> Result<Partition> {
        let v = downcast_vec::<I>(input, "filter_map")?;
        Ok(Box::new(v.iter().filter_map(|i| self.0(i)).collect::<Vec<O>>()))
    }
}

impl<T: RFBound> PCollection<T> {
    pub(crate) fn attach<O: RFBound>(self, node: Node) -> PCollection<O> {
        let id = self.pipeline.insert_node(node);
        self.pipeline.connect(self.id, id);
        PCollection {
            pipeline: self.pipeline,
            id,
            _t: PhantomData,
        }
    }

    fn stateless<O: RFBound>(self, label: &str, op: Arc<dyn DynOp>) -> PCollection<O> {
        self.attach(Node::new::<O>(label, NodeKind::Stateless(op)))
    }

    /// Transform each element.
    pub fn map<O, F>(self, f: F) -> PCollection<O>
    where
        O: RFBound,
        F: 'static + Send + Sync + Fn(&T) -> O,
    {
        self.stateless("map", Arc::new(MapOp::<T, O, F>(f, PhantomData)))
    }

    /// Keep the elements matching `pred`, in order.
    pub fn filter<F>(self, pred: F) -> PCollection<T>
    where
        F: 'static + Send + Sync + Fn(&T) -> bool,
    {
        self.stateless("filter", Arc::new(FilterOp::<T, F>(pred, PhantomData)))
    }

    /// Expand each element into zero or more outputs.
    pub fn flat_map<O, F>(self, f: F) -> PCollection<O>
    where
        O: RFBound,
        F: 'static + Send + Sync + Fn(&T) -> Vec<O>,
    {
        self.stateless("flat_map", Arc::new(FlatMapOp::<T, O, F>(f, PhantomData)))
    }

    /// Map each element to an optional output and drop the absent ones in the same step.
    ///
    /// ```
    /// use linebeam::*;
    ///
    /// let p = Pipeline::default();
    /// let out = from_vec(&p, vec!["1".to_string(), "x".to_string(), "3".to_string()])
    ///     .filter_map(|s: &String| s.parse::<u32>().ok())
    ///     .collect_seq()?;
    /// assert_eq!(out, vec![1, 3]);
    /// # anyhow::Result::<()>::Ok(())
    /// ```
    pub fn filter_map<O, F>(self, f: F) -> PCollection<O>
    where
        O: RFBound,
        F: 'static + Send + Sync + Fn(&T) -> Option<O>,
    {
        self.stateless("filter_map", Arc::new(FilterMapOp::<T, O, F>(f, PhantomData)))
    }

    /// Stable sort of the whole collection by an extracted key.
    ///
    /// Elements with equal keys keep their upstream order.
    pub fn sort_by_key<K, F>(self, key_fn: F) -> PCollection<T>
    where
        K: Ord + 'static,
        F: 'static + Send + Sync + Fn(&T) -> K,
    {
        let barrier = Arc::new(move |input: Partition| -> Result<Partition> {
            let mut rows = downcast_vec::<T>(input, "sort_by_key")?;
            rows.sort_by_key(&key_fn);
            Ok(Box::new(rows) as Partition)
        });
        self.attach(Node::new::<T>("sort_by_key", NodeKind::Barrier(barrier)))
    }

    /// Rename the stage that produces this collection. Labels show up in
    /// metrics counters and trace events.
    #[must_use]
    pub fn named(self, label: &str) -> Self {
        self.pipeline.relabel(self.id, label);
        self
    }

    /// Stage labels from source to this collection.
    ///
    /// # Errors
    /// Fails if the graph no longer contains this collection's chain.
    pub fn stage_labels(&self) -> Result<Vec<String>> {
        Ok(self
            .pipeline
            .linear_chain(self.id)?
            .into_iter()
            .map(|(_, node)| node.label)
            .collect())
    }

    /// Run the chain on the current thread and materialize every element.
    ///
    /// # Errors
    /// Propagates engine failures such as a mismatched element type between stages.
    pub fn collect_seq(self) -> Result<Vec<T>> {
        Runner::default().run_collect::<T>(&self.pipeline, self.id)
    }

    /// Run the chain and return its only element.
    ///
    /// Global combines always produce exactly one element, so this is the
    /// natural terminal after [`combine_globally`](PCollection::combine_globally).
    ///
    /// # Errors
    /// Fails when the collection does not hold exactly one element.
    pub fn collect_single(self) -> Result<T> {
        let mut out = self.collect_seq()?;
        if out.len() != 1 {
            bail!("expected exactly one element, found {}", out.len());
        }
        match out.pop() {
            Some(only) => Ok(only),
            None => bail!("expected exactly one element, found none"),
        }
    }
}
