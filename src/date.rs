//! Calendar day handling. Every date is a naive `YYYY-MM-DD` interpreted at
//! UTC midnight, so results never depend on the host timezone.

use crate::error::{Error, Result};
use std::fmt;
use time::macros::format_description;
use time::Date;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Parse a strict `YYYY-MM-DD` string.
pub fn parse_date(s: &str) -> Result<Date> {
    let fmt = format_description!("[year]-[month]-[day]");
    Date::parse(s.trim(), fmt).map_err(|e| Error::Parse { input: s.to_string(), reason: e.to_string() })
}

/// UTC epoch seconds of midnight at the start of `date`.
pub fn epoch_of(date: Date) -> i64 {
    date.midnight().assume_utc().unix_timestamp()
}

/// Parse `YYYY-MM-DD` and return the UTC epoch seconds of its midnight.
pub fn epoch_for_date(s: &str) -> Result<i64> {
    parse_date(s).map(epoch_of)
}

/// Half-open `[start, end)` window covering exactly one calendar day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl TimeWindow {
    pub fn for_day(date: Date) -> Self {
        let start = epoch_of(date);
        Self { start, end: start + SECONDS_PER_DAY }
    }

    pub fn for_date_str(s: &str) -> Result<Self> {
        parse_date(s).map(Self::for_day)
    }

    pub fn contains(&self, ts: i64) -> bool {
        ts >= self.start && ts < self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Render a date back to `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

/// Inclusive iteration from `start` to `end` (if `start` <= `end`), else empty.
pub fn iter_days(start: Date, end: Date) -> impl Iterator<Item = Date> {
    let mut curr = if start <= end { Some(start) } else { None };
    std::iter::from_fn(move || {
        let ret = curr?;
        curr = ret.next_day().filter(|n| *n <= end);
        Some(ret)
    })
}
