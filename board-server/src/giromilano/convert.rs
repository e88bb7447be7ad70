//! Conversion from upstream DTOs to board snapshots.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::board::{ArrivalRecord, GeoPoint, LineId, StopId, StopSnapshot, parse_wait_message};

use super::types::{LineArrival, StopPayload};

/// Error building a snapshot from a decoded payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// The payload decoded but carries no line list at all. An empty
    /// list is valid ("no active lines"); a missing one means this is
    /// not the stop document the endpoint normally serves.
    #[error("payload has no line list")]
    MissingLines,
}

/// Build the canonical snapshot for one poll of a stop.
///
/// Entries without a line code are skipped with a warning rather than
/// failing the whole board. Duplicate line identities keep the last
/// occurrence; earlier ones are discarded silently. Records come out
/// ordered by line identity, so consumers see a stable ordering
/// regardless of upstream ordering.
pub fn build_snapshot(
    stop: &StopId,
    payload: StopPayload,
    fetched_at: DateTime<Utc>,
) -> Result<StopSnapshot, SnapshotError> {
    let lines = payload.lines.ok_or(SnapshotError::MissingLines)?;

    let stop_name = payload
        .description
        .unwrap_or_else(|| format!("Stop {}", stop.as_str()));

    let stop_location = payload.location.map(|l| GeoPoint { lon: l.x, lat: l.y });

    // Insertion order makes the last duplicate win; the BTreeMap keying
    // gives the deterministic final ordering.
    let mut by_line: BTreeMap<LineId, ArrivalRecord> = BTreeMap::new();

    for entry in lines {
        match convert_entry(entry, stop_location) {
            Some(record) => {
                by_line.insert(record.line.clone(), record);
            }
            None => {
                warn!(stop = stop.as_str(), "skipping line entry without a line code");
            }
        }
    }

    Ok(StopSnapshot {
        stop: stop.clone(),
        stop_name,
        fetched_at,
        arrivals: by_line.into_values().collect(),
    })
}

/// Convert one raw line entry; `None` when it has no usable line code.
fn convert_entry(entry: LineArrival, stop_location: Option<GeoPoint>) -> Option<ArrivalRecord> {
    let info = entry.line?;
    let code = info.line_code.filter(|c| !c.is_empty())?;

    // The upstream omits Direction on some single-direction lines.
    let direction = entry.direction.unwrap_or_else(|| "0".to_string());

    let parsed = parse_wait_message(entry.wait_message.as_deref());

    // Entry-level booklet link is direction-specific; fall back to the
    // line-level one.
    let timetable_url = entry.booklet_url.or(info.booklet_url);

    Some(ArrivalRecord {
        line: LineId::new(code, direction),
        wait_text: parsed.text,
        status: parsed.status,
        wait_minutes: parsed.minutes,
        line_description: info.line_description.unwrap_or_default(),
        transport_mode: info.transport_mode,
        stop_location,
        timetable_url,
    })
}
