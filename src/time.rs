use crate::error::{AirlineError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wall-clock time encoded as HHMM, e.g. `715` is 07:15.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ClockTime(u16);

impl ClockTime {
    pub fn new(hhmm: u16) -> Result<Self> {
        if hhmm / 100 > 23 || hhmm % 100 > 59 {
            return Err(AirlineError::InvalidClockTime(hhmm.to_string()));
        }
        Ok(ClockTime(hhmm))
    }

    pub fn hours(&self) -> u16 {
        self.0 / 100
    }

    pub fn minutes(&self) -> u16 {
        self.0 % 100
    }
}

/// Stored form. Leading zeros are lost in a number, so `5` is 00:05 and only
/// the hour and minute ranges are checked.
impl TryFrom<u16> for ClockTime {
    type Error = AirlineError;

    fn try_from(value: u16) -> Result<Self> {
        ClockTime::new(value)
    }
}

impl From<ClockTime> for u16 {
    fn from(value: ClockTime) -> Self {
        value.0
    }
}

impl FromStr for ClockTime {
    type Err = AirlineError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if !(3..=4).contains(&s.len()) || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AirlineError::InvalidClockTime(s.to_string()));
        }
        s.parse::<u16>()
            .map_err(|_| AirlineError::InvalidClockTime(s.to_string()))
            .and_then(ClockTime::new)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

/// Calendar day a flight operates on.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightDate(NaiveDate);

impl FlightDate {
    /// 1 = January ... 12 = December.
    pub fn month(&self) -> u32 {
        self.0.month()
    }
}

impl FromStr for FlightDate {
    type Err = AirlineError;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(FlightDate)
            .map_err(|_| AirlineError::InvalidDate(s.to_string()))
    }
}

impl fmt::Display for FlightDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
