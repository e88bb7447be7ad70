//! Polling coordination.
//!
//! Owns everything between "a timer fired" and "subscribers saw a new
//! board": cadence, failure backoff, the cached last-good snapshot, and
//! fan-out. One coordinator per stop; nothing is shared across stops.

mod backoff;
mod config;
mod coordinator;

pub use backoff::Backoff;
pub use config::{
    ConfigError, DEFAULT_INTERVAL_SECS, MAX_INTERVAL_SECS, MIN_INTERVAL_SECS, PollConfig,
};
pub use coordinator::{Availability, BoardEvent, BoardHandle, StopCoordinator, StopFetcher};
