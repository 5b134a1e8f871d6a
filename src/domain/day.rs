/// Calendar-day value type
///
/// Completion timestamps are stored as instants, but every statistic in the
/// tracker reasons about whole days in the user's local timezone. `DateDay`
/// is the single place where an instant becomes a day.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A calendar day with no time-of-day component
///
/// Equality and ordering are structural over (year, month, day), so two
/// completions logged at 00:05 and 23:55 on the same local date compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateDay(NaiveDate);

impl DateDay {
    /// Build a day from its Gregorian components
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The local calendar day an instant falls on
    pub fn from_instant(instant: &DateTime<Utc>) -> Self {
        Self::from_instant_in(instant, &Local)
    }

    /// The calendar day an instant falls on in an explicit timezone
    pub fn from_instant_in<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> Self {
        Self(instant.with_timezone(tz).date_naive())
    }

    /// Today in the local timezone
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The previous calendar day
    pub fn pred(&self) -> Self {
        Self(self.0 - Duration::days(1))
    }

    /// The next calendar day
    pub fn succ(&self) -> Self {
        Self(self.0 + Duration::days(1))
    }

    /// Shift by a signed number of days
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Whole calendar days from `earlier` to `self` (negative if `earlier` is later)
    pub fn days_since(&self, earlier: DateDay) -> i64 {
        (self.0 - earlier.0).num_days()
    }

    /// First day of the month containing this day
    pub fn first_of_month(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    pub fn same_month(&self, other: DateDay) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }
}

impl From<NaiveDate> for DateDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
