use std::net::SocketAddr;

use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use board_server::board::StopId;
use board_server::giromilano::{GiroClient, GiroConfig};
use board_server::poll::{BoardEvent, DEFAULT_INTERVAL_SECS, PollConfig, StopCoordinator};
use board_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Configuration comes from the environment; both values are validated
    // here at the boundary, never inside the coordinator.
    let stop = match StopId::parse(&std::env::var("ATM_STOP_ID").unwrap_or_default()) {
        Ok(stop) => stop,
        Err(err) => {
            eprintln!("ATM_STOP_ID: {err}");
            eprintln!("Set ATM_STOP_ID to the numeric GiroMilano stop code (e.g. 15371).");
            std::process::exit(1);
        }
    };

    let interval_secs = match std::env::var("ATM_POLL_INTERVAL") {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(secs) => secs,
            Err(_) => {
                eprintln!("ATM_POLL_INTERVAL: not a number: {raw}");
                std::process::exit(1);
            }
        },
        Err(_) => DEFAULT_INTERVAL_SECS,
    };

    let config = match PollConfig::new(interval_secs) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("ATM_POLL_INTERVAL: {err}");
            std::process::exit(1);
        }
    };

    let client = GiroClient::new(GiroConfig::new()).expect("failed to build GiroMilano client");

    let coordinator = StopCoordinator::new(stop.clone(), client, config.clone());
    let handle = coordinator.handle();
    coordinator.start().await;

    // Log poll events; a display/entity adapter would subscribe the same
    // way and do its own bookkeeping.
    let mut events = handle.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(BoardEvent::Updated(snapshot)) => {
                    info!(
                        stop = snapshot.stop.as_str(),
                        lines = snapshot.len(),
                        "board updated"
                    );
                }
                Ok(BoardEvent::Degraded { retry_in }) => {
                    warn!(
                        retry_in_secs = retry_in.as_secs(),
                        "upstream rate limiting, backing off"
                    );
                }
                Ok(BoardEvent::Unavailable) => {
                    error!("stop marked unavailable after repeated failures");
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "event subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let state = AppState::new(handle, config.interval());
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("ATM stop board for stop {} on http://{addr}", stop.as_str());
    println!();
    println!("  GET /health       - health check");
    println!("  GET /board        - current arrival board");
    println!("  GET /diagnostics  - coordinator state");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");
    axum::serve(listener, app).await.expect("server error");
}
