//! Web layer serving the current board as JSON.
//!
//! This is a consumer of the coordinator's pull interface: it reads the
//! cached snapshot and availability, and does its own presentation
//! bookkeeping (transport-kind derivation). It never reaches back into
//! the polling core.

mod dto;
mod routes;
mod state;

pub use dto::{ArrivalEntry, BoardResponse, DiagnosticsResponse, ErrorResponse};
pub use routes::create_router;
pub use state::AppState;
