//! GiroMilano API response DTOs.
//!
//! These types map the upstream JSON as-is. They use `Option` liberally
//! because the upstream omits fields freely, and the snapshot builder —
//! not the decoder — decides what is actually required. Unknown fields
//! (traffic bulletins, link lists) are ignored.

use serde::{Deserialize, Deserializer};

/// Response body of `geodata/pois/stops/{stop_id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StopPayload {
    /// Stop code, normally echoing the requested id.
    #[serde(default, deserialize_with = "string_or_number")]
    pub code: Option<String>,

    /// Human-readable stop name.
    pub description: Option<String>,

    /// Stop coordinates.
    pub location: Option<Location>,

    /// Arrival entries, one per line and direction.
    pub lines: Option<Vec<LineArrival>>,
}

/// Stop coordinates. `X` is longitude, `Y` is latitude.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Location {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
}

/// One arrival entry on the stop document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LineArrival {
    /// Static line information, nested under "Line".
    pub line: Option<LineInfo>,

    /// Direction flag. Documented as a string ("0"/"1") but observed as a
    /// bare number too; decoding accepts both.
    #[serde(deserialize_with = "string_or_number")]
    pub direction: Option<String>,

    /// Free-text wait message, e.g. "2 min", "in arrivo", "ricalcolo".
    pub wait_message: Option<String>,

    /// Journey pattern reference, e.g. "92|0".
    pub journey_pattern_id: Option<String>,

    /// Timetable page for this line and direction.
    pub booklet_url: Option<String>,
}

/// Static line information.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LineInfo {
    /// Line code, e.g. "92" or "M3".
    #[serde(deserialize_with = "string_or_number")]
    pub line_code: Option<String>,

    /// Route description, e.g. "P.za Bausan - P.le Negrelli".
    pub line_description: Option<String>,

    /// Numeric transport-mode code.
    pub transport_mode: Option<i32>,

    /// Whether this is a suburban line.
    pub suburban: Option<bool>,

    /// Line-level timetable page.
    pub booklet_url: Option<String>,
}

/// Accept a JSON string or bare number, normalizing to a string.
///
/// The upstream switches between the two for `Direction` and line codes
/// depending on the line; anything else (null, objects) decodes to `None`
/// and is handled by the builder's required-field checks.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_stop_document() {
        let json = r#"{
            "Code": "15371",
            "Description": "V.le Famagosta V.le Faenza",
            "Location": {"X": 9.16206, "Y": 45.43419},
            "Lines": [
                {
                    "Line": {
                        "LineCode": "3",
                        "LineDescription": "Gratosoglio - Duomo M1 M3",
                        "TransportMode": 0,
                        "Suburban": false,
                        "BookletUrl": "https://giromilano.atm.it/booklet/3"
                    },
                    "Direction": "0",
                    "WaitMessage": "2 min",
                    "JourneyPatternId": "3|0"
                },
                {
                    "Line": {
                        "LineCode": "15",
                        "LineDescription": "Rozzano - Duomo",
                        "TransportMode": 0
                    },
                    "Direction": "1",
                    "WaitMessage": "in arrivo"
                }
            ]
        }"#;

        let payload: StopPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.code.as_deref(), Some("15371"));
        assert_eq!(payload.description.as_deref(), Some("V.le Famagosta V.le Faenza"));

        let location = payload.location.unwrap();
        assert_eq!(location.x, 9.16206);
        assert_eq!(location.y, 45.43419);

        let lines = payload.lines.unwrap();
        assert_eq!(lines.len(), 2);

        let first = &lines[0];
        assert_eq!(first.direction.as_deref(), Some("0"));
        assert_eq!(first.wait_message.as_deref(), Some("2 min"));
        assert_eq!(first.journey_pattern_id.as_deref(), Some("3|0"));

        let info = first.line.as_ref().unwrap();
        assert_eq!(info.line_code.as_deref(), Some("3"));
        assert_eq!(info.transport_mode, Some(0));
        assert_eq!(info.suburban, Some(false));
    }

    #[test]
    fn direction_accepts_bare_numbers() {
        let json = r#"{"Line": {"LineCode": 92}, "Direction": 1, "WaitMessage": "ricalcolo"}"#;
        let entry: LineArrival = serde_json::from_str(json).unwrap();

        assert_eq!(entry.direction.as_deref(), Some("1"));
        assert_eq!(entry.line.unwrap().line_code.as_deref(), Some("92"));
    }

    #[test]
    fn missing_fields_decode_to_none() {
        let payload: StopPayload = serde_json::from_str(r#"{"Description": "Duomo"}"#).unwrap();
        assert!(payload.code.is_none());
        assert!(payload.location.is_none());
        assert!(payload.lines.is_none());

        let entry: LineArrival = serde_json::from_str("{}").unwrap();
        assert!(entry.line.is_none());
        assert!(entry.direction.is_none());
        assert!(entry.wait_message.is_none());
    }

    #[test]
    fn null_direction_decodes_to_none() {
        let entry: LineArrival =
            serde_json::from_str(r#"{"Direction": null, "WaitMessage": "5 min"}"#).unwrap();
        assert!(entry.direction.is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{
            "Description": "Duomo",
            "Lines": [],
            "CustomerCode": "ATM",
            "TrafficBulletins": []
        }"#;
        let payload: StopPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.lines.unwrap().len(), 0);
    }
}
