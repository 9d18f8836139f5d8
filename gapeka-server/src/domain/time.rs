//! Timetable time handling.
//!
//! The GAPEKA timetable provides times as "HH:MM" strings with no date
//! component. This module provides a minutes-of-day type plus the forward
//! normalization used to compare times on trips that cross midnight.

use std::fmt;

/// Minutes in a day.
pub const MINUTES_PER_DAY: u32 = 1440;

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

/// A time of day with minute precision, in [0, 1440) minutes from midnight.
///
/// Timetable times carry no date, so ordering two `TimeOfDay` values is only
/// meaningful after normalizing them onto one forward timeline; see
/// [`TimeOfDay::forward_of`].
///
/// # Examples
///
/// ```
/// use gapeka_server::domain::TimeOfDay;
///
/// let t = TimeOfDay::parse_hhmm("14:30").unwrap();
/// assert_eq!(t.minutes(), 14 * 60 + 30);
/// assert_eq!(t.to_string(), "14:30");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Create a time from hour and minute components.
    ///
    /// Returns an error if `hour > 23` or `minute > 59`.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use gapeka_server::domain::TimeOfDay;
    ///
    /// assert!(TimeOfDay::parse_hhmm("00:00").is_ok());
    /// assert!(TimeOfDay::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(TimeOfDay::parse_hhmm("1430").is_err());
    /// assert!(TimeOfDay::parse_hhmm("24:00").is_err());
    /// assert!(TimeOfDay::parse_hhmm("Ls").is_err());
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

        Self::from_hm(hour, minute)
    }

    /// Returns minutes from midnight, in [0, 1440).
    pub fn minutes(&self) -> u32 {
        self.0 as u32
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.minutes() / 60
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.minutes() % 60
    }

    /// Normalize onto a forward timeline anchored at `anchor`.
    ///
    /// Returns minutes since midnight of the anchor's day: a time strictly
    /// earlier than the anchor is taken to be on the next calendar day
    /// (+1440 minutes). Normalizing every time in a trip against the first
    /// departure removes all special-casing for segments that cross
    /// midnight.
    ///
    /// # Examples
    ///
    /// ```
    /// use gapeka_server::domain::TimeOfDay;
    ///
    /// let anchor = TimeOfDay::parse_hhmm("08:00").unwrap();
    ///
    /// // At or after the anchor: unchanged
    /// let same = TimeOfDay::parse_hhmm("23:55").unwrap();
    /// assert_eq!(same.forward_of(anchor), 23 * 60 + 55);
    ///
    /// // Before the anchor: next day
    /// let next = TimeOfDay::parse_hhmm("00:30").unwrap();
    /// assert_eq!(next.forward_of(anchor), 1440 + 30);
    /// ```
    pub fn forward_of(&self, anchor: TimeOfDay) -> u32 {
        if self.minutes() < anchor.minutes() {
            self.minutes() + MINUTES_PER_DAY
        } else {
            self.minutes()
        }
    }
}

impl fmt::Debug for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeOfDay({:02}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// The pass-through sentinel in the timetable ("langsung").
const PASS_THROUGH_SENTINEL: &str = "Ls";

/// A timetable entry: either a scheduled halt time or a pass-through.
///
/// GAPEKA encodes stops the train does not halt at with the arrival
/// sentinel "Ls"; the train passes the station at its departure time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopTime {
    /// The train halts (or passes) at this time.
    Scheduled(TimeOfDay),
    /// The train passes without halting; no time of its own.
    PassThrough,
}

impl StopTime {
    /// Parse a timetable field: "HH:MM" or the "Ls" sentinel.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        if s == PASS_THROUGH_SENTINEL {
            return Ok(StopTime::PassThrough);
        }
        TimeOfDay::parse_hhmm(s).map(StopTime::Scheduled)
    }

    /// Returns the scheduled time, or `None` for a pass-through.
    pub fn scheduled(&self) -> Option<TimeOfDay> {
        match self {
            StopTime::Scheduled(t) => Some(*t),
            StopTime::PassThrough => None,
        }
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
        fn valid_hhmm_parses(time_str in valid_time()) {
            prop_assert!(TimeOfDay::parse_hhmm(&time_str).is_ok());
        }

        /// Parse then display roundtrips
        #[test]
        fn parse_display_roundtrip(time_str in valid_time()) {
            let parsed = TimeOfDay::parse_hhmm(&time_str).unwrap();
            prop_assert_eq!(parsed.to_string(), time_str);
        }

        /// Minutes are always in [0, 1440)
        #[test]
        fn minutes_in_range(time_str in valid_time()) {
            let parsed = TimeOfDay::parse_hhmm(&time_str).unwrap();
            prop_assert!(parsed.minutes() < MINUTES_PER_DAY);
        }

        /// Normalization never moves a time before its anchor
        #[test]
        fn forward_of_at_least_anchor(
            h1 in 0u32..24, m1 in 0u32..60,
            h2 in 0u32..24, m2 in 0u32..60,
        ) {
            let t = TimeOfDay::from_hm(h1, m1).unwrap();
            let anchor = TimeOfDay::from_hm(h2, m2).unwrap();
            prop_assert!(t.forward_of(anchor) >= anchor.minutes());
        }

        /// Normalized values span less than one day past the anchor
        #[test]
        fn forward_of_within_one_day(
            h1 in 0u32..24, m1 in 0u32..60,
            h2 in 0u32..24, m2 in 0u32..60,
        ) {
            let t = TimeOfDay::from_hm(h1, m1).unwrap();
            let anchor = TimeOfDay::from_hm(h2, m2).unwrap();
            prop_assert!(t.forward_of(anchor) < anchor.minutes() + MINUTES_PER_DAY);
        }

        /// Invalid hour is rejected
        #[test]
        fn invalid_hour_rejected(hour in 24u32..100, minute in 0u32..60) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(TimeOfDay::parse_hhmm(&s).is_err());
        }

        /// Invalid minute is rejected
        #[test]
        fn invalid_minute_rejected(hour in 0u32..24, minute in 60u32..100) {
            let s = format!("{:02}:{:02}", hour, minute);
            prop_assert!(TimeOfDay::parse_hhmm(&s).is_err());
        }
    }
}
