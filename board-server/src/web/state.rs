//! Application state for the web layer.

use std::time::Duration;

use crate::poll::BoardHandle;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Pull-side view of the polling coordinator.
    pub board: BoardHandle,

    /// Configured poll interval, reported by the diagnostics endpoint.
    pub poll_interval: Duration,
}

impl AppState {
    /// Create the app state.
    pub fn new(board: BoardHandle, poll_interval: Duration) -> Self {
        Self {
            board,
            poll_interval,
        }
    }
}
