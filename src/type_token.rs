//! Type tags and type-erased vector helpers.
//!
//! Stages exchange their outputs as opaque [`Partition`] buffers so the graph can
//! hold nodes of different element types side by side. This module provides:
//! - [`TypeTag`]: a runtime type identifier recorded on every node so a failed
//!   downcast can name the type that was expected.
//! - [`VecOps`]: the handful of `Vec<T>` operations the runner needs without
//!   knowing `T` (length for stage counters, cloning a source payload).

use anyhow::{Result, anyhow};
use std::any::{Any, TypeId, type_name};
use std::marker::PhantomData;
use std::sync::Arc;

/// A buffer carried between nodes at runtime. Always a boxed `Vec<T>`.
pub type Partition = Box<dyn Any + Send + Sync>;

/// A lightweight runtime type tag for diagnostics.
///
/// ```
/// use linebeam::type_token::TypeTag;
/// let tag = TypeTag::of::<u32>();
/// assert_eq!(tag.name, "u32");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeTag {
    /// Stable Rust type identifier.
    pub id: TypeId,
    /// Human-readable type name (best-effort).
    pub name: &'static str,
}

impl TypeTag {
    /// Construct a tag for `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }
}

/// Type-erased helpers for `Vec<T>`.
///
/// Implementations return `None` when `data` is not the `Vec<T>` they were built for.
pub trait VecOps: Send + Sync {
    /// Number of elements if `data` is a `Vec<T>`.
    fn len(&self, data: &dyn Any) -> Option<usize>;

    /// Clone the whole `Vec<T>` behind `data` into a fresh [`Partition`].
    fn clone_any(&self, data: &dyn Any) -> Option<Partition>;
}

struct VecOpsImpl<T>(PhantomData<fn() -> T>);

impl<T: Clone + Send + Sync + 'static> VecOps for VecOpsImpl<T> {
    fn len(&self, data: &dyn Any) -> Option<usize> {
        data.downcast_ref::<Vec<T>>().map(Vec::len)
    }

    fn clone_any(&self, data: &dyn Any) -> Option<Partition> {
        data.downcast_ref::<Vec<T>>()
            .map(|v| Box::new(v.clone()) as Partition)
    }
}

/// Create a type-erased [`VecOps`] for `Vec<T>`.
#[must_use]
pub fn vec_ops_for<T: Clone + Send + Sync + 'static>() -> Arc<dyn VecOps> {
    Arc::new(VecOpsImpl::<T>(PhantomData))
}

/// Unbox a partition as `Vec<T>`; `stage` names the consumer in the error.
pub(crate) fn downcast_vec<T: 'static>(part: Partition, stage: &str) -> Result<Vec<T>> {
    part.downcast::<Vec<T>>()
        .map(|boxed| *boxed)
        .map_err(|_| anyhow!("stage `{stage}` expected Vec<{}>", type_name::<T>()))
}
