//! Stop identifier type.

use std::fmt;

/// Error returned when parsing an invalid stop id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A validated GiroMilano stop identifier.
///
/// Stop ids are short numeric codes (e.g. "15371"). This type guarantees
/// that any `StopId` value is 1 to 10 ASCII digits by construction.
///
/// # Examples
///
/// ```
/// use board_server::board::StopId;
///
/// let stop = StopId::parse("15371").unwrap();
/// assert_eq!(stop.as_str(), "15371");
///
/// // Non-numeric ids are rejected
/// assert!(StopId::parse("15371a").is_err());
///
/// // So are empty ones
/// assert!(StopId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop id from a string.
    ///
    /// Surrounding whitespace is trimmed; the remainder must be 1 to 10
    /// ASCII digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let s = s.trim();

        if s.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        if s.len() > 10 {
            return Err(InvalidStopId {
                reason: "must be at most 10 digits",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStopId {
                reason: "must contain only digits 0-9",
            });
        }

        Ok(StopId(s.to_string()))
    }

    /// Returns the stop id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert!(StopId::parse("1").is_ok());
        assert!(StopId::parse("15371").is_ok());
        assert!(StopId::parse("0000000000").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        let stop = StopId::parse("  15371 ").unwrap();
        assert_eq!(stop.as_str(), "15371");
    }

    #[test]
    fn reject_empty() {
        assert!(StopId::parse("").is_err());
        assert!(StopId::parse("   ").is_err());
    }

    #[test]
    fn reject_too_long() {
        assert!(StopId::parse("12345678901").is_err());
    }

    #[test]
    fn reject_non_digits() {
        assert!(StopId::parse("15371a").is_err());
        assert!(StopId::parse("stop").is_err());
        assert!(StopId::parse("153 71").is_err());
        assert!(StopId::parse("-15371").is_err());
        assert!(StopId::parse("１５３").is_err());
    }

    #[test]
    fn display() {
        let stop = StopId::parse("15371").unwrap();
        assert_eq!(format!("{}", stop), "15371");
        assert_eq!(format!("{:?}", stop), "StopId(15371)");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any 1-10 digit string parses and round-trips.
        #[test]
        fn digit_strings_parse(s in "[0-9]{1,10}") {
            let stop = StopId::parse(&s).unwrap();
            prop_assert_eq!(stop.as_str(), s.as_str());
        }

        /// Strings containing a non-digit are always rejected.
        #[test]
        fn non_digit_rejected(s in "[0-9]{0,4}[a-zA-Z][0-9]{0,4}") {
            prop_assert!(StopId::parse(&s).is_err());
        }

        /// Over-length digit strings are always rejected.
        #[test]
        fn over_length_rejected(s in "[0-9]{11,20}") {
            prop_assert!(StopId::parse(&s).is_err());
        }
    }
}
