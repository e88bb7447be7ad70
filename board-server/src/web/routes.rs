//! HTTP route handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::poll::Availability;

use super::dto::{DiagnosticsResponse, ErrorResponse, board_response};
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/board", get(board))
        .route("/diagnostics", get(diagnostics))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Current arrival board.
///
/// 404 before the first successful poll; 503 once the coordinator has
/// marked the stop unavailable — the stale board is still included in
/// the body so a display can keep rendering it.
async fn board(State(state): State<AppState>) -> Response {
    let availability = state.board.availability().await;

    let Some(snapshot) = state.board.current_snapshot().await else {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "no successful poll yet".to_string(),
            }),
        )
            .into_response();
    };

    let body = board_response(&snapshot, availability);

    match availability {
        Availability::Unavailable => {
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
        Availability::Live | Availability::Degraded => Json(body).into_response(),
    }
}

/// Coordinator state dump for debugging a misbehaving stop.
async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsResponse> {
    let snapshot = state.board.current_snapshot().await;

    Json(DiagnosticsResponse {
        stop_id: state.board.stop_id().as_str().to_string(),
        poll_interval_secs: state.poll_interval.as_secs(),
        availability: state.board.availability().await,
        consecutive_failures: state.board.consecutive_failures().await,
        last_fetched_at: snapshot.as_ref().map(|s| s.fetched_at),
        active_lines: snapshot.map(|s| s.len()).unwrap_or(0),
    })
}
