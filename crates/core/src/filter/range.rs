//! Date-range predicate shared by ledger queries and list screens.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Normalizes a date or timestamp string to its calendar day.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (the day as written, offset
/// ignored) and offset-less `YYYY-MM-DDTHH:MM[:SS[.f]]`.
#[must_use]
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
        .or_else(|| {
            DATETIME_FORMATS.iter().find_map(|format| {
                NaiveDateTime::parse_from_str(value, format)
                    .ok()
                    .map(|timestamp| timestamp.date())
            })
        })
}

/// Returns true if `date` falls within `[start, end]`, compared by day.
///
/// Empty bounds are unbounded. An unparseable `date` is never in range; an
/// unparseable bound is ignored.
#[must_use]
pub fn in_range(date: &str, start: &str, end: &str) -> bool {
    parse_day(date).is_some_and(|day| DateRange::parse(start, end).contains(day))
}

/// An inclusive range of calendar days, open on a side with no bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First included day.
    pub start: Option<NaiveDate>,
    /// Last included day.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    #[must_use]
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// A range that contains every day.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Builds a range from the text of two date inputs.
    #[must_use]
    pub fn parse(start: &str, end: &str) -> Self {
        Self {
            start: parse_bound(start),
            end: parse_bound(end),
        }
    }

    /// Returns true if neither side is bounded.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Returns true if the given day falls within this range.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start.is_none_or(|start| day >= start) && self.end.is_none_or(|end| day <= end)
    }

    /// Keeps the items whose day is in range, without touching the input.
    pub fn filter<'a, T, F>(&self, items: &'a [T], day_of: F) -> Vec<&'a T>
    where
        F: Fn(&T) -> NaiveDate,
    {
        items.iter().filter(|item| self.contains(day_of(item))).collect()
    }
}

fn parse_bound(value: &str) -> Option<NaiveDate> {
    let day = parse_day(value);
    if day.is_none() && !value.trim().is_empty() {
        debug!(bound = value, "ignoring unparseable date bound");
    }
    day
}
