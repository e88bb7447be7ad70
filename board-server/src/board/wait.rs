//! Wait-message classification.
//!
//! GiroMilano conveys arrival status purely through the free text of the
//! `WaitMessage` field: a minutes count ("2 min"), "in arrivo" for a
//! vehicle at the stop, "ricalcolo" while the ETA is being recomputed, or
//! "Soppressa" for a suppressed run. The classification below is a
//! priority chain rather than a lookup table so that phrasings we have
//! never seen degrade to [`WaitStatus::Unknown`] instead of failing.

use serde::Serialize;

/// Normalized arrival status for one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitStatus {
    /// A concrete minutes-to-arrival estimate.
    Minutes,
    /// Vehicle arriving at the stop now.
    Arriving,
    /// Upstream is recalculating the estimate.
    Updating,
    /// The run has been suppressed.
    Cancelled,
    /// Unrecognized message; the raw text is kept for diagnosis.
    Unknown,
}

/// Result of classifying one raw wait message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedWait {
    /// The trimmed upstream message, kept for diagnostics.
    pub text: String,

    /// Normalized status.
    pub status: WaitStatus,

    /// Minutes to arrival; present only for `Minutes` and `Arriving`
    /// (always 0 for the latter).
    pub minutes: Option<u32>,
}

/// Known status phrases, matched case-insensitively on the whole message.
const ARRIVING: &str = "in arrivo";
const UPDATING: &str = "ricalcolo";
const CANCELLED: &str = "soppressa";

/// Classify a raw wait message.
///
/// Pure and total: every input produces a `ParsedWait`, never an error.
/// Numeric-minutes detection runs first — "1 min" must never be caught
/// by a looser substring check further down the chain.
pub fn parse_wait_message(message: Option<&str>) -> ParsedWait {
    let Some(raw) = message else {
        return ParsedWait {
            text: String::new(),
            status: WaitStatus::Unknown,
            minutes: None,
        };
    };

    let text = raw.trim();

    if let Some(minutes) = leading_minutes(text) {
        return ParsedWait {
            text: text.to_string(),
            status: WaitStatus::Minutes,
            minutes: Some(minutes),
        };
    }

    if text.eq_ignore_ascii_case(ARRIVING) {
        return ParsedWait {
            text: text.to_string(),
            status: WaitStatus::Arriving,
            minutes: Some(0),
        };
    }

    if text.eq_ignore_ascii_case(UPDATING) {
        return ParsedWait {
            text: text.to_string(),
            status: WaitStatus::Updating,
            minutes: None,
        };
    }

    if text.eq_ignore_ascii_case(CANCELLED) {
        return ParsedWait {
            text: text.to_string(),
            status: WaitStatus::Cancelled,
            minutes: None,
        };
    }

    ParsedWait {
        text: text.to_string(),
        status: WaitStatus::Unknown,
        minutes: None,
    }
}

/// Match `<integer>` followed by optional whitespace and a token that
/// begins with "min" ("2 min", "2min", "15 minuti").
///
/// Returns `None` when the text does not start with digits, when the
/// digits overflow a `u32`, or when the unit token is missing.
fn leading_minutes(text: &str) -> Option<u32> {
    let digits = text.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    let minutes: u32 = text[..digits].parse().ok()?;
    let rest = text[digits..].trim_start();

    rest.get(..3)
        .filter(|unit| unit.eq_ignore_ascii_case("min"))
        .map(|_| minutes)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every "<n> min" message normalizes to Minutes(n).
        #[test]
        fn minutes_messages_parse(n in 0u32..=999) {
            let parsed = parse_wait_message(Some(&format!("{n} min")));
            prop_assert_eq!(parsed.status, WaitStatus::Minutes);
            prop_assert_eq!(parsed.minutes, Some(n));
        }

        /// Classification is total: arbitrary text never panics and the
        /// trimmed input is always preserved.
        #[test]
        fn total_over_arbitrary_text(s in "\\PC*") {
            let parsed = parse_wait_message(Some(&s));
            prop_assert_eq!(parsed.text, s.trim());
        }

        /// Minutes are reported exactly for Minutes, zero for Arriving,
        /// absent otherwise.
        #[test]
        fn minutes_presence_matches_status(s in "\\PC*") {
            let parsed = parse_wait_message(Some(&s));
            match parsed.status {
                WaitStatus::Minutes => prop_assert!(parsed.minutes.is_some()),
                WaitStatus::Arriving => prop_assert_eq!(parsed.minutes, Some(0)),
                _ => prop_assert_eq!(parsed.minutes, None),
            }
        }
    }
}
