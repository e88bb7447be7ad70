//! Scripted fetcher for tests.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::{Mutex, Notify};

use crate::board::StopId;
use crate::poll::StopFetcher;

use super::error::FetchError;
use super::types::StopPayload;

/// Scripted stand-in for `GiroClient`.
///
/// Serves a queue of prepared outcomes, one per fetch. An exhausted
/// script answers with an upstream error, so a test that polls more
/// often than it scripted fails loudly instead of hanging.
#[derive(Clone)]
pub struct MockGiroClient {
    script: Arc<Mutex<VecDeque<Result<StopPayload, FetchError>>>>,
    gate: Option<Arc<FetchGate>>,
}

/// Coordination points for gated fetches.
///
/// `entered` fires when a fetch reaches the gate; the fetch then waits on
/// `release`. Leaving a fetch unreleased parks it mid-flight, which is
/// exactly what cancellation tests need.
pub struct FetchGate {
    pub entered: Notify,
    pub release: Notify,
}

impl FetchGate {
    pub fn new() -> Self {
        Self {
            entered: Notify::new(),
            release: Notify::new(),
        }
    }
}

impl Default for FetchGate {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGiroClient {
    /// Create a mock serving the given outcomes in order.
    pub fn scripted(outcomes: Vec<Result<StopPayload, FetchError>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(outcomes.into())),
            gate: None,
        }
    }

    /// Block every fetch on the given gate until released.
    pub fn with_gate(mut self, gate: Arc<FetchGate>) -> Self {
        self.gate = Some(gate);
        self
    }
}

impl StopFetcher for MockGiroClient {
    async fn fetch_stop(&self, _stop: &StopId) -> Result<StopPayload, FetchError> {
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        self.script.lock().await.pop_front().unwrap_or_else(|| {
            Err(FetchError::Upstream {
                status: 0,
                message: "mock script exhausted".to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_outcomes_in_order() {
        let mock = MockGiroClient::scripted(vec![
            Err(FetchError::RateLimited),
            Err(FetchError::StopNotFound),
        ]);
        let stop = StopId::parse("15371").unwrap();

        assert_eq!(mock.fetch_stop(&stop).await, Err(FetchError::RateLimited));
        assert_eq!(mock.fetch_stop(&stop).await, Err(FetchError::StopNotFound));
    }

    #[tokio::test]
    async fn exhausted_script_fails_loudly() {
        let mock = MockGiroClient::scripted(vec![]);
        let stop = StopId::parse("15371").unwrap();

        match mock.fetch_stop(&stop).await {
            Err(FetchError::Upstream { status: 0, message }) => {
                assert!(message.contains("exhausted"));
            }
            other => panic!("expected exhausted-script error, got {other:?}"),
        }
    }
}
