//! Sorting, parsing and folding of selected entries.
//!
//! Entries are sorted by key (ordinal byte order, stable) and their values are
//! summed. Two reducers exist and they disagree on what a bad value means:
//!
//! - [`CheckedSum`] tracks a running [`Aggregate`]. The first value that does
//!   not parse (or that overflows the total) turns it into an
//!   [`AggregateFailure`] and it stays that way; later entries are only
//!   counted for diagnostics. This is what the status pipeline uses.
//! - [`LossySum`] folds into an `f64` and turns a bad value into `NaN`, which
//!   then poisons every later addition. It exists to reproduce that defect in
//!   tests and is only reachable through [`Propagation::SilentCorruption`].
//!
//! [`Propagation::SilentCorruption`]: crate::config::Propagation::SilentCorruption

use crate::combiners::{CombineFn, fold_with};
use crate::stages::keys::Entry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Either the sum of every entry's value, or the failure that stopped it.
pub type Aggregate = Result<u64, AggregateFailure>;

#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FailureReason {
    #[error("value is not a non-negative integer ({0})")]
    InvalidValue(String),
    #[error("running total overflowed")]
    Overflow,
}

/// The entry that stopped a [`CheckedSum`], and how many came after it.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{reason} at {key}={value:?}; {skipped} later entries not summed")]
pub struct AggregateFailure {
    pub key: String,
    pub value: String,
    pub reason: FailureReason,
    pub skipped: usize,
}

/// Parse a value as a non-negative decimal integer. No trimming: `" 3"` fails.
///
/// # Errors
/// [`FailureReason::InvalidValue`] with the parser's message.
pub fn parse_value(value: &str) -> Result<u64, FailureReason> {
    value
        .parse::<u64>()
        .map_err(|e| FailureReason::InvalidValue(e.to_string()))
}

/// Stable ordinal sort by key; equal keys keep their input order.
#[must_use]
pub fn sort_entries(mut entries: Vec<Entry>) -> Vec<Entry> {
    entries.sort_by(|a, b| a.key().cmp(b.key()));
    entries
}

/// Short-circuiting sum.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckedSum;

impl CombineFn<Entry, Aggregate, Aggregate> for CheckedSum {
    fn create(&self) -> Aggregate {
        Ok(0)
    }

    fn add_input(&self, acc: &mut Aggregate, entry: Entry) {
        match acc {
            Ok(total) => {
                let next = parse_value(entry.value())
                    .and_then(|v| total.checked_add(v).ok_or(FailureReason::Overflow));
                match next {
                    Ok(sum) => *total = sum,
                    Err(reason) => {
                        let (key, value) = entry.into_parts();
                        *acc = Err(AggregateFailure {
                            key,
                            value,
                            reason,
                            skipped: 0,
                        });
                    }
                }
            }
            Err(failure) => failure.skipped += 1,
        }
    }

    fn finish(&self, acc: Aggregate) -> Aggregate {
        acc
    }
}

/// Sum that coerces bad values to `NaN` instead of stopping.
#[derive(Clone, Copy, Debug, Default)]
pub struct LossySum;

/// Signed parse; anything else becomes `NaN`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn lossy_value(value: &str) -> f64 {
    value.parse::<i64>().map_or(f64::NAN, |v| v as f64)
}

impl CombineFn<Entry, f64, f64> for LossySum {
    fn create(&self) -> f64 {
        0.0
    }

    fn add_input(&self, acc: &mut f64, entry: Entry) {
        *acc += lossy_value(entry.value());
    }

    fn finish(&self, acc: f64) -> f64 {
        acc
    }
}

/// Sort `entries` and fold them with [`CheckedSum`].
///
/// ```
/// use linebeam::stages::aggregate::aggregate;
/// use linebeam::stages::keys::normalize_key;
/// use linebeam::stages::tokenize::Token;
///
/// let entries = vec![
///     normalize_key(Token::new("ELEMENT02", "12")),
///     normalize_key(Token::new("ELEMENT01", "3")),
/// ];
/// assert_eq!(aggregate(entries), Ok(15));
/// ```
#[must_use]
pub fn aggregate(entries: Vec<Entry>) -> Aggregate {
    fold_with(&CheckedSum, sort_entries(entries))
}

/// Sort `entries` and fold them with [`LossySum`].
#[must_use]
pub fn aggregate_lossy(entries: Vec<Entry>) -> f64 {
    fold_with(&LossySum, sort_entries(entries))
}
