//! JSON DTOs for the board endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::board::{ArrivalRecord, GeoPoint, StopSnapshot, TransportKind, WaitStatus};
use crate::poll::Availability;

/// Full board response.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    /// The polled stop id.
    pub stop_id: String,

    /// Upstream stop name.
    pub stop_name: String,

    /// When the served snapshot was fetched. Under degraded availability
    /// this is how stale the board is.
    pub fetched_at: DateTime<Utc>,

    /// Availability derived from recent poll outcomes.
    pub availability: Availability,

    /// Stop coordinates, when the upstream provides them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_location: Option<GeoPoint>,

    /// One entry per active line, in stable board order.
    pub arrivals: Vec<ArrivalEntry>,
}

/// One line on the board.
#[derive(Debug, Serialize)]
pub struct ArrivalEntry {
    /// Line code, e.g. "92" or "M3".
    pub line: String,

    /// Direction flag, "0" or "1".
    pub direction: String,

    /// Route description.
    pub description: String,

    /// Transport category derived from the line code.
    pub kind: TransportKind,

    /// Normalized wait status.
    pub status: WaitStatus,

    /// Minutes to arrival; present only for minutes/arriving statuses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_minutes: Option<u32>,

    /// Raw upstream wait message.
    pub wait_text: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timetable_url: Option<String>,
}

/// Diagnostics dump: configuration plus coordinator state.
#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    pub stop_id: String,
    pub poll_interval_secs: u64,
    pub availability: Availability,
    pub consecutive_failures: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_fetched_at: Option<DateTime<Utc>>,
    pub active_lines: usize,
}

/// Error body for non-2xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a snapshot into the board response.
pub fn board_response(snapshot: &StopSnapshot, availability: Availability) -> BoardResponse {
    BoardResponse {
        stop_id: snapshot.stop.as_str().to_string(),
        stop_name: snapshot.stop_name.clone(),
        fetched_at: snapshot.fetched_at,
        availability,
        stop_location: snapshot.arrivals.first().and_then(|r| r.stop_location),
        arrivals: snapshot.arrivals.iter().map(arrival_entry).collect(),
    }
}

fn arrival_entry(record: &ArrivalRecord) -> ArrivalEntry {
    ArrivalEntry {
        line: record.line.code.clone(),
        direction: record.line.direction.clone(),
        description: record.line_description.clone(),
        kind: TransportKind::for_line(&record.line.code),
        status: record.status,
        wait_minutes: record.wait_minutes,
        wait_text: record.wait_text.clone(),
        timetable_url: record.timetable_url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{LineId, StopId};

    fn record(code: &str, direction: &str, status: WaitStatus, minutes: Option<u32>) -> ArrivalRecord {
        ArrivalRecord {
            line: LineId::new(code, direction),
            wait_text: "2 min".to_string(),
            status,
            wait_minutes: minutes,
            line_description: format!("Route {code}"),
            transport_mode: Some(0),
            stop_location: Some(GeoPoint {
                lon: 9.16206,
                lat: 45.43419,
            }),
            timetable_url: None,
        }
    }

    fn snapshot(arrivals: Vec<ArrivalRecord>) -> StopSnapshot {
        StopSnapshot {
            stop: StopId::parse("15371").unwrap(),
            stop_name: "V.le Famagosta".to_string(),
            fetched_at: DateTime::parse_from_rfc3339("2025-11-02T08:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            arrivals,
        }
    }

    #[test]
    fn maps_snapshot_to_board() {
        let snap = snapshot(vec![
            record("92", "0", WaitStatus::Minutes, Some(2)),
            record("M3", "1", WaitStatus::Cancelled, None),
        ]);

        let board = board_response(&snap, Availability::Live);

        assert_eq!(board.stop_id, "15371");
        assert_eq!(board.stop_name, "V.le Famagosta");
        assert_eq!(board.availability, Availability::Live);
        assert_eq!(board.stop_location.unwrap().lat, 45.43419);
        assert_eq!(board.arrivals.len(), 2);

        let trolley = &board.arrivals[0];
        assert_eq!(trolley.line, "92");
        assert_eq!(trolley.kind, TransportKind::Trolleybus);
        assert_eq!(trolley.wait_minutes, Some(2));

        let metro = &board.arrivals[1];
        assert_eq!(metro.kind, TransportKind::Metro);
        assert_eq!(metro.status, WaitStatus::Cancelled);
        assert_eq!(metro.wait_minutes, None);
    }

    #[test]
    fn empty_board_has_no_location() {
        let board = board_response(&snapshot(vec![]), Availability::Live);
        assert!(board.arrivals.is_empty());
        assert!(board.stop_location.is_none());
    }

    #[test]
    fn serializes_with_lowercase_enums_and_omitted_minutes() {
        let snap = snapshot(vec![record("92", "0", WaitStatus::Updating, None)]);
        let board = board_response(&snap, Availability::Degraded);

        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["availability"], "degraded");
        assert_eq!(json["arrivals"][0]["status"], "updating");
        assert_eq!(json["arrivals"][0]["kind"], "trolleybus");
        assert!(json["arrivals"][0].get("wait_minutes").is_none());
    }
}
