//! Canonical arrival records.

use serde::Serialize;

use super::line::LineId;
use super::wait::WaitStatus;

/// Longitude/latitude pair as reported by the upstream (`X` is longitude,
/// `Y` is latitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

/// One normalized arrival entry for a line at a stop.
///
/// Built once by the snapshot builder and never mutated; snapshots hold
/// these by value.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrivalRecord {
    /// Stable identity of this arrival stream.
    pub line: LineId,

    /// Upstream wait message, preserved for diagnostics.
    pub wait_text: String,

    /// Normalized status.
    pub status: WaitStatus,

    /// Minutes to arrival; present only for `Minutes` and `Arriving`
    /// (always 0 for the latter).
    pub wait_minutes: Option<u32>,

    /// Human-readable route description, e.g. "P.za Bausan - P.le Negrelli".
    pub line_description: String,

    /// Upstream transport-mode code, carried through unchanged.
    pub transport_mode: Option<i32>,

    /// Coordinates of the stop this record was observed at.
    pub stop_location: Option<GeoPoint>,

    /// Link to the line's timetable page, when the upstream provides one.
    pub timetable_url: Option<String>,
}

/// Transport category used for presentation (icon choice and the like).
///
/// The upstream's numeric mode code is unreliable, but ATM's line
/// numbering scheme is stable: M-prefixed codes are metro lines, the
/// historic low numbers are trams, 90-92 are the trolleybus ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Bus,
    Tram,
    Metro,
    Trolleybus,
}

impl TransportKind {
    /// Derive the transport category from a line code.
    pub fn for_line(code: &str) -> TransportKind {
        match code {
            "M1" | "M2" | "M3" | "M4" | "M5" | "ML" => TransportKind::Metro,
            "1" | "2" | "3" | "4" | "5" | "7" | "9" | "10" | "12" | "14" | "15" | "16" | "19"
            | "23" | "24" | "27" | "28" | "29" | "30" | "31" | "33" => TransportKind::Tram,
            "90" | "91" | "92" => TransportKind::Trolleybus,
            _ => TransportKind::Bus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metro_lines() {
        for code in ["M1", "M2", "M3", "M4", "M5", "ML"] {
            assert_eq!(TransportKind::for_line(code), TransportKind::Metro);
        }
    }

    #[test]
    fn tram_lines() {
        assert_eq!(TransportKind::for_line("2"), TransportKind::Tram);
        assert_eq!(TransportKind::for_line("19"), TransportKind::Tram);
        assert_eq!(TransportKind::for_line("33"), TransportKind::Tram);
    }

    #[test]
    fn trolleybus_ring() {
        for code in ["90", "91", "92"] {
            assert_eq!(TransportKind::for_line(code), TransportKind::Trolleybus);
        }
    }

    #[test]
    fn everything_else_is_a_bus() {
        assert_eq!(TransportKind::for_line("58"), TransportKind::Bus);
        assert_eq!(TransportKind::for_line("NM1"), TransportKind::Bus);
        assert_eq!(TransportKind::for_line(""), TransportKind::Bus);
    }
}
