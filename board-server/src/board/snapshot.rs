//! Stop snapshot value type.

use chrono::{DateTime, Utc};

use super::line::LineId;
use super::record::ArrivalRecord;
use super::stop::StopId;

/// All arrival records for one stop at one poll instant.
///
/// Built fresh on every successful poll and replaced wholesale behind an
/// `Arc`; nothing mutates a snapshot after construction, so readers never
/// need field-level locking.
#[derive(Debug, Clone, PartialEq)]
pub struct StopSnapshot {
    /// The polled stop.
    pub stop: StopId,

    /// Upstream stop description, or "Stop {id}" when absent.
    pub stop_name: String,

    /// When the poll that produced this snapshot completed.
    pub fetched_at: DateTime<Utc>,

    /// One record per line identity, sorted by [`LineId`].
    pub arrivals: Vec<ArrivalRecord>,
}

impl StopSnapshot {
    /// Look up the record for a line, if the line is active this poll.
    pub fn arrival(&self, line: &LineId) -> Option<&ArrivalRecord> {
        self.arrivals.iter().find(|r| &r.line == line)
    }

    /// Number of active lines on the board.
    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    /// True when no lines are active at this stop ("no active lines" is a
    /// valid state, not an error).
    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }
}
