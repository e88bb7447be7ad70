//! Stop polling coordinator.
//!
//! Drives the fetch → build → publish cycle for one stop. The cached
//! snapshot is replaced wholesale behind an `Arc`, so readers never
//! observe a partially-updated board; subscribers are notified over a
//! broadcast channel whose sends never block the poll loop.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock, broadcast};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::board::{StopId, StopSnapshot};
use crate::giromilano::{FetchError, StopPayload, build_snapshot};

use super::backoff::Backoff;
use super::config::PollConfig;

/// Capacity of the event channel. A subscriber that falls further behind
/// than this lags (sees `RecvError::Lagged`) instead of blocking polls.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Source of raw stop payloads.
///
/// The production implementation is `GiroClient`; tests script one.
pub trait StopFetcher: Send + Sync + 'static {
    /// Fetch the raw payload for one stop.
    fn fetch_stop(
        &self,
        stop: &StopId,
    ) -> impl Future<Output = Result<StopPayload, FetchError>> + Send;
}

/// Availability of the board as seen by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    /// The last poll succeeded.
    Live,

    /// Upstream is rate limiting or failing; the last-good snapshot is
    /// still served (stale data beats no data for an ETA display).
    Degraded,

    /// Consecutive failures passed the configured threshold.
    Unavailable,
}

/// Event published to subscribers by the poll loop.
#[derive(Debug, Clone)]
pub enum BoardEvent {
    /// A fresh snapshot replaced the cached one.
    Updated(Arc<StopSnapshot>),

    /// Upstream rate limited this poll; the snapshot is unchanged and
    /// the next poll waits `retry_in`.
    Degraded { retry_in: Duration },

    /// The consecutive-failure threshold was crossed. Sent once per
    /// outage, not once per failure.
    Unavailable,
}

/// State shared between the poll loop and readers.
#[derive(Debug)]
struct BoardState {
    snapshot: Option<Arc<StopSnapshot>>,
    availability: Availability,
    consecutive_failures: u32,
}

/// Cheap clonable view of a coordinator: pull interface plus subscribe.
///
/// Handles stay valid after the coordinator stops; they simply see the
/// last published state and a silent event stream.
#[derive(Clone)]
pub struct BoardHandle {
    stop: StopId,
    state: Arc<RwLock<BoardState>>,
    events: broadcast::Sender<BoardEvent>,
}

impl BoardHandle {
    fn new(stop: StopId) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            stop,
            state: Arc::new(RwLock::new(BoardState {
                snapshot: None,
                availability: Availability::Degraded,
                consecutive_failures: 0,
            })),
            events,
        }
    }

    /// The stop this board tracks.
    pub fn stop_id(&self) -> &StopId {
        &self.stop
    }

    /// Latest successful snapshot, if any poll has succeeded yet.
    pub async fn current_snapshot(&self) -> Option<Arc<StopSnapshot>> {
        self.state.read().await.snapshot.clone()
    }

    /// Current availability as derived from recent poll outcomes.
    pub async fn availability(&self) -> Availability {
        self.state.read().await.availability
    }

    /// Failures since the last successful poll.
    pub async fn consecutive_failures(&self) -> u32 {
        self.state.read().await.consecutive_failures
    }

    /// Subscribe to poll events.
    ///
    /// Sends are fire-and-forget from the poll loop's perspective; a slow
    /// subscriber lags, it never delays the next poll.
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }
}

/// One poll cycle's state machine, separate from the task loop so the
/// sequencing logic is testable without timers.
struct PollDriver<F> {
    fetcher: F,
    config: PollConfig,
    handle: BoardHandle,
    backoff: Backoff,
}

impl<F: StopFetcher> PollDriver<F> {
    fn new(fetcher: F, config: PollConfig, handle: BoardHandle) -> Self {
        let backoff = Backoff::new(config.interval(), config.max_backoff());
        Self {
            fetcher,
            config,
            handle,
            backoff,
        }
    }

    /// Run one poll and return the delay before the next one.
    async fn poll_once(&mut self) -> Duration {
        let stop = self.handle.stop.clone();

        match self.fetcher.fetch_stop(&stop).await {
            Ok(payload) => match build_snapshot(&stop, payload, Utc::now()) {
                Ok(snapshot) => self.on_success(snapshot).await,
                Err(err) => {
                    // Shape drift gets its own log line so operators can
                    // tell "answered garbage" from "is down".
                    warn!(stop = stop.as_str(), error = %err, "payload failed validation");
                    self.on_failure().await
                }
            },
            Err(FetchError::RateLimited) => self.on_rate_limited().await,
            Err(err @ FetchError::Malformed { .. }) => {
                warn!(stop = stop.as_str(), error = %err, "payload failed to decode");
                self.on_failure().await
            }
            Err(err) => {
                warn!(stop = stop.as_str(), error = %err, "poll failed");
                self.on_failure().await
            }
        }
    }

    async fn on_success(&mut self, snapshot: StopSnapshot) -> Duration {
        self.backoff.reset();

        let snapshot = Arc::new(snapshot);
        {
            let mut state = self.handle.state.write().await;
            state.snapshot = Some(snapshot.clone());
            state.availability = Availability::Live;
            state.consecutive_failures = 0;
        }

        debug!(
            stop = self.handle.stop.as_str(),
            lines = snapshot.len(),
            "published snapshot"
        );

        // A send error only means nobody is listening right now.
        let _ = self.handle.events.send(BoardEvent::Updated(snapshot));

        self.backoff.delay()
    }

    async fn on_rate_limited(&mut self) -> Duration {
        let retry_in = self.backoff.widen();

        {
            let mut state = self.handle.state.write().await;
            // Rate limiting degrades a live board but never un-marks an
            // outage; only a success does that.
            if state.availability == Availability::Live {
                state.availability = Availability::Degraded;
            }
        }

        info!(
            stop = self.handle.stop.as_str(),
            retry_in_secs = retry_in.as_secs(),
            "rate limited, widening poll delay"
        );

        let _ = self.handle.events.send(BoardEvent::Degraded { retry_in });

        retry_in
    }

    async fn on_failure(&mut self) -> Duration {
        let retry_in = self.backoff.widen();

        let crossed_threshold = {
            let mut state = self.handle.state.write().await;
            state.consecutive_failures += 1;

            if state.consecutive_failures >= self.config.failure_threshold() {
                state.availability = Availability::Unavailable;
                state.consecutive_failures == self.config.failure_threshold()
            } else {
                if state.availability == Availability::Live {
                    state.availability = Availability::Degraded;
                }
                false
            }
        };

        if crossed_threshold {
            warn!(
                stop = self.handle.stop.as_str(),
                failures = self.config.failure_threshold(),
                "marking stop unavailable"
            );
            let _ = self.handle.events.send(BoardEvent::Unavailable);
        }

        retry_in
    }
}

/// Polling coordinator for one stop.
///
/// `start` spawns the polling task; `stop` cancels it with the guarantee
/// that no subscriber notification is delivered after `stop` returns,
/// even when a fetch is mid-flight. A stopped coordinator stays stopped.
pub struct StopCoordinator<F> {
    handle: BoardHandle,
    driver: Mutex<Option<PollDriver<F>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<F: StopFetcher> StopCoordinator<F> {
    /// Create a coordinator for a stop. Polling does not begin until
    /// [`start`](Self::start) is called.
    pub fn new(stop: StopId, fetcher: F, config: PollConfig) -> Self {
        let handle = BoardHandle::new(stop);
        let driver = PollDriver::new(fetcher, config, handle.clone());
        Self {
            handle,
            driver: Mutex::new(Some(driver)),
            task: Mutex::new(None),
        }
    }

    /// Pull-side view of this coordinator, independent of the fetcher
    /// type. Clone it freely.
    pub fn handle(&self) -> BoardHandle {
        self.handle.clone()
    }

    /// Start polling. The first poll runs immediately; each subsequent
    /// poll waits for the delay chosen by the previous cycle, so at most
    /// one fetch is ever in flight.
    ///
    /// Calling `start` on a running or stopped coordinator is a no-op.
    pub async fn start(&self) {
        let mut task = self.task.lock().await;
        if task.is_some() {
            return;
        }

        let Some(mut driver) = self.driver.lock().await.take() else {
            return;
        };

        info!(stop = self.handle.stop.as_str(), "poll loop starting");

        *task = Some(tokio::spawn(async move {
            loop {
                let delay = driver.poll_once().await;
                tokio::time::sleep(delay).await;
            }
        }));
    }

    /// Stop polling. Safe to call at any time, including while a fetch
    /// is in flight, and idempotent. When this returns, the polling task
    /// has terminated and no further events will be delivered.
    pub async fn stop(&self) {
        let task = self.task.lock().await.take();

        if let Some(task) = task {
            task.abort();
            // Wait for the task to actually finish so no send can race
            // past this point.
            let _ = task.await;
            info!(stop = self.handle.stop.as_str(), "poll loop stopped");
        }
    }
}
