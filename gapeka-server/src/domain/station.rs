//! Station code types.

use std::fmt;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A station code from the timetable, e.g. "GMR" for Gambir.
///
/// Codes are 1-5 uppercase ASCII letters. Timetable rows label stations as
/// "Name (CODE)"; use [`StationCode::from_label`] to extract the code from
/// such a label.
///
/// # Examples
///
/// ```
/// use gapeka_server::domain::StationCode;
///
/// let gmr = StationCode::parse("GMR").unwrap();
/// assert_eq!(gmr.as_str(), "GMR");
///
/// let from_label = StationCode::from_label("Gambir (GMR)").unwrap();
/// assert_eq!(from_label, gmr);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be 1-5 uppercase ASCII letters.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        if s.is_empty() || s.len() > 5 {
            return Err(InvalidStationCode {
                reason: "must be 1-5 characters",
            });
        }
        for b in s.bytes() {
            if !b.is_ascii_uppercase() {
                return Err(InvalidStationCode {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }
        Ok(StationCode(s.to_string()))
    }

    /// Extract the code from a station label like "Gambir (GMR)".
    ///
    /// The code is the text inside the first parenthesized group. Returns
    /// `None` if there is no such group or its contents are not a valid
    /// code.
    pub fn from_label(label: &str) -> Option<Self> {
        let open = label.find('(')?;
        let rest = &label[open + 1..];
        let close = rest.find(')')?;
        Self::parse(&rest[..close]).ok()
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
