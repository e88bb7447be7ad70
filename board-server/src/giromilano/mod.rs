//! GiroMilano stop-arrivals API client.
//!
//! The endpoint is unofficial and loosely typed: arrival status is
//! conveyed purely through free-text wait messages, field types drift
//! (`Direction` has been observed as both a string and a number), and the
//! bot-protection layer in front of it serves HTML error pages with
//! success statuses. The DTOs here absorb that looseness; `convert`
//! turns a decoded payload into the validated board snapshot.

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{GiroClient, GiroConfig};
pub use convert::{SnapshotError, build_snapshot};
pub use error::FetchError;
pub use mock::{FetchGate, MockGiroClient};
pub use types::{LineArrival, LineInfo, Location, StopPayload};
