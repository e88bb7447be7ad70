//! Poll cadence configuration.

use std::time::Duration;

/// Inclusive lower bound for the poll interval, in seconds. Anything
/// faster hammers a rate-limited public endpoint.
pub const MIN_INTERVAL_SECS: u64 = 15;

/// Inclusive upper bound for the poll interval, in seconds. Anything
/// slower makes the board useless as an ETA display.
pub const MAX_INTERVAL_SECS: u64 = 120;

/// Default poll interval in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

const DEFAULT_MAX_BACKOFF_SECS: u64 = 600;
const DEFAULT_FAILURE_THRESHOLD: u32 = 3;

/// Error rejecting an invalid poll configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The requested interval is outside the 15-120 s range.
    #[error("poll interval {secs}s outside valid range 15-120s")]
    IntervalOutOfRange { secs: u64 },
}

/// Polling cadence and failure policy.
///
/// Out-of-range intervals are rejected here, at configuration time; the
/// coordinator never clamps at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    interval: Duration,
    max_backoff: Duration,
    failure_threshold: u32,
}

impl PollConfig {
    /// Create a config with the given poll interval in seconds.
    pub fn new(interval_secs: u64) -> Result<Self, ConfigError> {
        if !(MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS).contains(&interval_secs) {
            return Err(ConfigError::IntervalOutOfRange {
                secs: interval_secs,
            });
        }

        Ok(Self {
            interval: Duration::from_secs(interval_secs),
            max_backoff: Duration::from_secs(DEFAULT_MAX_BACKOFF_SECS),
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
        })
    }

    /// Set the cap for the widened poll delay under failure.
    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = max_backoff;
        self
    }

    /// Set how many consecutive failures mark the stop unavailable.
    pub fn with_failure_threshold(mut self, threshold: u32) -> Self {
        self.failure_threshold = threshold;
        self
    }

    /// Baseline delay between polls.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Upper bound for the widened poll delay.
    pub fn max_backoff(&self) -> Duration {
        self.max_backoff
    }

    /// Consecutive failures after which the stop is marked unavailable.
    pub fn failure_threshold(&self) -> u32 {
        self.failure_threshold
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            max_backoff: Duration::from_secs(DEFAULT_MAX_BACKOFF_SECS),
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
        }
    }
}
