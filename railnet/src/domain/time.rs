//! Wall-clock time handling.
//!
//! Timetables use times of day in "HH:MM" form with no date component; an
//! overnight service is simply a later entry in the ordering. This module
//! provides the validated time type and its strict-before predicate, which
//! is what makes a pair of consecutive stops count as actual travel.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day with minute precision.
///
/// Ordered by (hour, minute). Two equal times never count as travel: a
/// train needs [`ClockTime::precedes`] to hold between consecutive stops.
///
/// # Examples
///
/// ```
/// use railnet::domain::ClockTime;
///
/// let dep = ClockTime::parse_hhmm("08:00").unwrap();
/// let arr = ClockTime::parse_hhmm("08:20").unwrap();
/// assert!(dep.precedes(arr));
/// assert!(!arr.precedes(dep));
/// assert!(!dep.precedes(dep));
/// assert_eq!(arr.to_string(), "08:20");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a time from hour and minute components.
    pub fn new(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeError::new("invalid time"))?;
        Ok(Self(time))
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use railnet::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("1430").is_err());
    /// assert!(ClockTime::parse_hhmm("24:00").is_err());
    /// assert!(ClockTime::parse_hhmm("12:60").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;

        Self::new(hour, minute)
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Strictly before `other`. Equal times do not qualify.
    pub fn precedes(&self, other: ClockTime) -> bool {
        *self < other
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        let t = ClockTime::parse_hhmm("00:00").unwrap();
        assert_eq!(t.hour(), 0);
        assert_eq!(t.minute(), 0);

        let t = ClockTime::parse_hhmm("23:59").unwrap();
        assert_eq!(t.hour(), 23);
        assert_eq!(t.minute(), 59);

        let t = ClockTime::parse_hhmm("14:30").unwrap();
        assert_eq!(t.hour(), 14);
        assert_eq!(t.minute(), 30);
    }

    #[test]
    fn parse_invalid_format() {
        // Wrong length
        assert!(ClockTime::parse_hhmm("1430").is_err());
        assert!(ClockTime::parse_hhmm("14:3").is_err());
        assert!(ClockTime::parse_hhmm("14:300").is_err());

        // Missing colon
        assert!(ClockTime::parse_hhmm("14-30").is_err());
        assert!(ClockTime::parse_hhmm("14.30").is_err());

        // Non-digit characters
        assert!(ClockTime::parse_hhmm("ab:cd").is_err());
        assert!(ClockTime::parse_hhmm("1a:30").is_err());
    }

    #[test]
    fn parse_invalid_values() {
        assert!(ClockTime::parse_hhmm("24:00").is_err());
        assert!(ClockTime::parse_hhmm("99:00").is_err());
        assert!(ClockTime::parse_hhmm("12:60").is_err());
        assert!(ClockTime::parse_hhmm("12:99").is_err());
    }

    #[test]
    fn display_format() {
        assert_eq!(ClockTime::parse_hhmm("00:00").unwrap().to_string(), "00:00");
        assert_eq!(ClockTime::parse_hhmm("09:05").unwrap().to_string(), "09:05");
        assert_eq!(ClockTime::parse_hhmm("23:59").unwrap().to_string(), "23:59");
    }

    #[test]
    fn ordering() {
        let t1 = ClockTime::parse_hhmm("10:00").unwrap();
        let t2 = ClockTime::parse_hhmm("10:30").unwrap();
        let t3 = ClockTime::parse_hhmm("11:00").unwrap();

        assert!(t1 < t2);
        assert!(t2 < t3);
        assert!(t3 > t1);
    }

    #[test]
    fn precedes_is_strict() {
        let t1 = ClockTime::parse_hhmm("10:00").unwrap();
        let t2 = ClockTime::parse_hhmm("10:01").unwrap();

        assert!(t1.precedes(t2));
        assert!(!t2.precedes(t1));
        assert!(!t1.precedes(t1));
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(ClockTime::new(24, 0).is_err());
        assert!(ClockTime::new(0, 60).is_err());
        assert!(ClockTime::new(23, 59).is_ok());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn valid_time()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}:{:02}", hour, minute)
        }
    }

    proptest! {
        /// Any valid HH:MM string parses successfully
        #[test]
        fn valid_hhmm_parses(s in valid_time()) {
            prop_assert!(ClockTime::parse_hhmm(&s).is_ok());
        }

        /// Parse then display roundtrips
        #[test]
        fn parse_display_roundtrip(s in valid_time()) {
            let parsed = ClockTime::parse_hhmm(&s).unwrap();
            prop_assert_eq!(parsed.to_string(), s);
        }

        /// Invalid hour is rejected
        #[test]
        fn invalid_hour_rejected(hour in 24u32..100, minute in 0u32..60) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(ClockTime::parse_hhmm(&s).is_err());
        }

        /// Invalid minute is rejected
        #[test]
        fn invalid_minute_rejected(hour in 0u32..24, minute in 60u32..100) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(ClockTime::parse_hhmm(&s).is_err());
        }

        /// Ordering agrees with (hour, minute) comparison
        #[test]
        fn ordering_matches_components(
            h1 in 0u32..24, m1 in 0u32..60,
            h2 in 0u32..24, m2 in 0u32..60
        ) {
            let t1 = ClockTime::new(h1, m1).unwrap();
            let t2 = ClockTime::new(h2, m2).unwrap();
            prop_assert_eq!(t1.cmp(&t2), (h1, m1).cmp(&(h2, m2)));
        }

        /// precedes is exactly strict less-than
        #[test]
        fn precedes_is_strict_less(
            h1 in 0u32..24, m1 in 0u32..60,
            h2 in 0u32..24, m2 in 0u32..60
        ) {
            let t1 = ClockTime::new(h1, m1).unwrap();
            let t2 = ClockTime::new(h2, m2).unwrap();
            prop_assert_eq!(t1.precedes(t2), t1 < t2);
        }
    }
}
