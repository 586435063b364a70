//! Turning an aggregate into a status line.
//!
//! | total          | message               |
//! |----------------|-----------------------|
//! | `< 25`         | `[{v}%] Started...`   |
//! | `25 ..< 75`    | `[{v}%] Running...`   |
//! | `75 ..< 100`   | `[{v}%] Almost done...` |
//! | `>= 100`       | `Done`                |
//! | failure        | `No value available`  |
//!
//! Each boundary value belongs to the bucket above it.

use crate::stages::aggregate::Aggregate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const UNAVAILABLE_MESSAGE: &str = "No value available";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Started,
    Running,
    AlmostDone,
}

impl Phase {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Started => "Started...",
            Self::Running => "Running...",
            Self::AlmostDone => "Almost done...",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusMessage {
    Progress { percent: i64, phase: Phase },
    Done,
    /// The aggregate failed; never rendered with a number.
    Unavailable,
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Progress { percent, phase } => write!(f, "[{percent}%] {}", phase.label()),
            Self::Done => f.write_str("Done"),
            Self::Unavailable => f.write_str(UNAVAILABLE_MESSAGE),
        }
    }
}

/// Map an aggregate to its status message.
///
/// ```
/// use linebeam::stages::status::format_status;
///
/// assert_eq!(format_status(&Ok(44)).to_string(), "[44%] Running...");
/// assert_eq!(format_status(&Ok(100)).to_string(), "Done");
/// ```
#[must_use]
pub fn format_status(aggregate: &Aggregate) -> StatusMessage {
    match aggregate {
        Ok(total) => format_total(*total),
        Err(_) => StatusMessage::Unavailable,
    }
}

/// Bucket a valid total.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn format_total(total: u64) -> StatusMessage {
    let phase = match total {
        0..25 => Phase::Started,
        25..75 => Phase::Running,
        75..100 => Phase::AlmostDone,
        _ => return StatusMessage::Done,
    };
    // total < 100 here
    StatusMessage::Progress {
        percent: total as i64,
        phase,
    }
}

/// Bucket a total produced by [`LossySum`](crate::stages::aggregate::LossySum).
///
/// Every comparison against `NaN` is false, so a poisoned total skips all three
/// progress buckets and reports `Done`. That is the defect the checked path
/// avoids; this function keeps it reproducible.
///
/// ```
/// use linebeam::stages::status::{format_lossy, StatusMessage};
///
/// assert_eq!(format_lossy(f64::NAN), StatusMessage::Done);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_lossy(total: f64) -> StatusMessage {
    let phase = if total < 25.0 {
        Phase::Started
    } else if total < 75.0 {
        Phase::Running
    } else if total < 100.0 {
        Phase::AlmostDone
    } else {
        return StatusMessage::Done;
    };
    StatusMessage::Progress {
        percent: total as i64,
        phase,
    }
}
