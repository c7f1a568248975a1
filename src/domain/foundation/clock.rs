//! Clock time value object (`HH:mm`).

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

const MINUTES_PER_DAY: i32 = 24 * 60;
const NOON: i32 = 12 * 60;

/// A wall-clock time with minute precision, written as `HH:mm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Builds a clock time from hour and minute.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| {
                ValidationError::invalid_format("time", format!("{:02}:{:02}", hour, minute))
            })
    }

    /// Parses `HH:mm`, ignoring surrounding whitespace.
    ///
    /// Exactly two digits for hours and minutes are required.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let s = raw.trim();
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(ValidationError::invalid_format(
                "time",
                format!("expected HH:mm, got '{}'", s),
            ));
        }
        NaiveTime::parse_from_str(s, "%H:%M")
            .map(Self)
            .map_err(|_| {
                ValidationError::invalid_format("time", format!("'{}' is not a valid time", s))
            })
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes since midnight.
    pub fn minutes_since_midnight(&self) -> i32 {
        (self.0.hour() * 60 + self.0.minute()) as i32
    }

    /// Minutes since the preceding noon.
    ///
    /// Orders an evening and the following morning as one night:
    /// 23:30 sorts before 00:10, and 12:00 is the earliest point.
    pub fn night_minutes(&self) -> i32 {
        (self.minutes_since_midnight() - NOON).rem_euclid(MINUTES_PER_DAY)
    }

    /// True if `self` comes earlier in the night than `other`.
    pub fn is_earlier_in_night_than(&self, other: &ClockTime) -> bool {
        self.night_minutes() < other.night_minutes()
    }

    /// Minutes elapsed from `self` forward to `later`, wrapping past midnight.
    pub fn minutes_until(&self, later: &ClockTime) -> u32 {
        (later.minutes_since_midnight() - self.minutes_since_midnight())
            .rem_euclid(MINUTES_PER_DAY) as u32
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
