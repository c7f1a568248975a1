//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Calendar date of this instant as observed in `tz`.
    pub fn local_date(&self, tz: Tz) -> NaiveDate {
        self.0.with_timezone(&tz).date_naive()
    }

    /// Half-open `[start, end)` bounds of the calendar day containing this
    /// instant, where the day is measured in `tz`.
    ///
    /// Returns `None` only when local midnight does not exist in `tz` and no
    /// later instant of that hour resolves either.
    pub fn day_bounds(&self, tz: Tz) -> Option<(Timestamp, Timestamp)> {
        let today = self.local_date(tz);
        let tomorrow = today.succ_opt()?;
        Some((start_of_day(today, tz)?, start_of_day(tomorrow, tz)?))
    }
}

fn start_of_day(date: NaiveDate, tz: Tz) -> Option<Timestamp> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    // Zones that shift at midnight have no 00:00; the first valid instant is 01:00.
    let local = tz
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())?;
    Some(Timestamp(local.with_timezone(&Utc)))
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
