//! Global (non-keyed) folds.
//!
//! A [`CombineFn`] describes a fold as three steps: build an empty accumulator,
//! add one input at a time, and turn the accumulator into the output.
//! [`PCollection::combine_globally`] runs it over a whole collection as a
//! barrier stage; [`fold_with`] runs it over a plain iterator.

use crate::collection::{PCollection, RFBound};
use crate::node::{Node, NodeKind};
use crate::type_token::{Partition, downcast_vec};
use anyhow::Result;
use std::sync::Arc;

/// A fold from inputs `V` through accumulator `A` to output `O`.
pub trait CombineFn<V, A, O>: Send + Sync + 'static {
    fn create(&self) -> A;
    fn add_input(&self, acc: &mut A, v: V);
    fn finish(&self, acc: A) -> O;
}

/// Fold an iterator with a combiner, outside any pipeline.
pub fn fold_with<C, V, A, O>(comb: &C, inputs: impl IntoIterator<Item = V>) -> O
where
    C: CombineFn<V, A, O>,
{
    let mut acc = comb.create();
    for v in inputs {
        comb.add_input(&mut acc, v);
    }
    comb.finish(acc)
}

impl<T: RFBound> PCollection<T> {
    /// Combine all elements into a single output using a [`CombineFn`].
    ///
    /// # Semantics
    /// Produces exactly **one** element even for empty inputs (by calling
    /// `finish(create())`). Inputs are folded in collection order.
    ///
    /// # Example
    /// ```
    /// use linebeam::*;
    ///
    /// struct Total;
    /// impl CombineFn<u64, u64, u64> for Total {
    ///     fn create(&self) -> u64 { 0 }
    ///     fn add_input(&self, acc: &mut u64, v: u64) { *acc += v; }
    ///     fn finish(&self, acc: u64) -> u64 { acc }
    /// }
    ///
    /// let p = Pipeline::default();
    /// let total = from_vec(&p, vec![1u64, 2, 3, 4])
    ///     .combine_globally(Total)
    ///     .collect_single()?;
    /// assert_eq!(total, 10);
    /// # anyhow::Result::<()>::Ok(())
    /// ```
    pub fn combine_globally<C, A, O>(self, comb: C) -> PCollection<O>
    where
        C: CombineFn<T, A, O>,
        A: 'static,
        O: RFBound,
    {
        let comb = Arc::new(comb);
        let barrier = Arc::new(move |input: Partition| -> Result<Partition> {
            let rows = downcast_vec::<T>(input, "combine_globally")?;
            let out = vec![fold_with(comb.as_ref(), rows)];
            Ok(Box::new(out) as Partition)
        });
        self.attach(Node::new::<O>("combine_globally", NodeKind::Barrier(barrier)))
    }
}
