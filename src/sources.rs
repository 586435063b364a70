//! In-memory sources.
//!
//! - [`from_vec`] -- wraps a `Vec<T>` as the root of a pipeline.
//! - [`from_iter`] -- collects any `IntoIterator<Item = T>` and delegates to `from_vec`.
//! - [`from_lines`] -- splits raw text with [`read_lines`] and uses the lines as the source.
//!
//! Sources are cloned on every run, so a collection can be collected more than
//! once and each run sees the same input snapshot.

use crate::collection::{PCollection, RFBound};
use crate::node::{Node, NodeKind};
use crate::pipeline::Pipeline;
use crate::stages::lines::read_lines;
use std::marker::PhantomData;
use std::sync::Arc;

/// Create a [`PCollection<T>`] from a pre-existing [`Vec<T>`].
///
/// ```
/// use linebeam::*;
///
/// let p = Pipeline::default();
/// let pc = from_vec(&p, vec![10, 20, 30]);
/// assert_eq!(pc.collect_seq().unwrap(), vec![10, 20, 30]);
/// ```
pub fn from_vec<T>(p: &Pipeline, data: Vec<T>) -> PCollection<T>
where
    T: RFBound,
{
    let id = p.insert_node(Node::new::<T>("source", NodeKind::Source(Arc::new(data))));
    PCollection {
        pipeline: p.clone(),
        id,
        _t: PhantomData,
    }
}

/// Create a [`PCollection<T>`] from any iterator or collection.
pub fn from_iter<T, I>(p: &Pipeline, iter: I) -> PCollection<T>
where
    T: RFBound,
    I: IntoIterator<Item = T>,
{
    from_vec(p, iter.into_iter().collect())
}

/// Create a `PCollection<String>` holding the lines of `text`, labelled `read_lines`.
///
/// ```
/// use linebeam::*;
///
/// let p = Pipeline::default();
/// let lines = from_lines(&p, "a=1\n\nb=2").collect_seq().unwrap();
/// assert_eq!(lines, vec!["a=1", "", "b=2"]);
/// ```
pub fn from_lines(p: &Pipeline, text: &str) -> PCollection<String> {
    from_vec(p, read_lines(text)).named("read_lines")
}
