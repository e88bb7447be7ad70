//! Failure backoff for the poll loop.

use std::time::Duration;

/// Exponential backoff over the poll delay.
///
/// Healthy polls run at the base interval. Every failed poll doubles the
/// delay, bounded by the cap; the first success snaps straight back to
/// the base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    base: Duration,
    cap: Duration,
    current: Duration,
}

impl Backoff {
    /// Create a backoff starting at `base`, never exceeding `cap`.
    pub fn new(base: Duration, cap: Duration) -> Self {
        Self {
            base,
            cap,
            current: base,
        }
    }

    /// Delay to wait before the next poll.
    pub fn delay(&self) -> Duration {
        self.current
    }

    /// Whether the delay is currently widened past the base interval.
    pub fn is_widened(&self) -> bool {
        self.current > self.base
    }

    /// Widen the delay after a failed poll; returns the new delay.
    pub fn widen(&mut self) -> Duration {
        self.current = (self.current * 2).min(self.cap);
        self.current
    }

    /// Snap back to the base interval after a successful poll.
    pub fn reset(&mut self) {
        self.current = self.base;
    }
}
