//! Domain types for the arrival board.
//!
//! This module contains the validated types that the rest of the service
//! works with. All of them enforce their invariants at construction time
//! and are immutable afterwards, so code that receives these types can
//! trust their validity.

mod line;
mod record;
mod snapshot;
mod stop;
mod wait;

pub use line::LineId;
pub use record::{ArrivalRecord, GeoPoint, TransportKind};
pub use snapshot::StopSnapshot;
pub use stop::{InvalidStopId, StopId};
pub use wait::{ParsedWait, WaitStatus, parse_wait_message};
