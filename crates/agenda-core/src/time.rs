//! Time helpers for agenda queries and display.
//!
//! This module provides [`DayWindow`] for the 24-hour query range of a
//! single calendar day, and [`format_duration`] for the human-readable
//! duration exposed to templates.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

/// The query window covering one local calendar day.
///
/// Represents a half-open interval `[start, end)` from local midnight of the
/// date to local midnight of the following date. Both bounds keep the
/// offset that was in effect, so they serialize as RFC 3339 with offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    /// Start of the day (inclusive).
    pub start: DateTime<FixedOffset>,
    /// Start of the next day (exclusive).
    pub end: DateTime<FixedOffset>,
}

impl DayWindow {
    /// Creates the window for `date` in the given timezone.
    ///
    /// Returns `None` only if the date has no successor.
    pub fn for_date<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<Self> {
        let next = date.succ_opt()?;
        let start = local_midnight(date, tz)?;
        let end = local_midnight(next, tz)?;
        Some(Self { start, end })
    }

    /// Returns the length of the window. 24 hours except on DST transitions.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks if a datetime falls within this window.
    pub fn contains<Tz: TimeZone>(&self, dt: &DateTime<Tz>) -> bool {
        let dt = dt.fixed_offset();
        self.start <= dt && dt < self.end
    }

    /// Start bound as RFC 3339.
    pub fn start_rfc3339(&self) -> String {
        self.start.to_rfc3339()
    }

    /// End bound as RFC 3339.
    pub fn end_rfc3339(&self) -> String {
        self.end.to_rfc3339()
    }
}

/// Resolves midnight of `date` in `tz`.
///
/// Ambiguous midnights take the earlier instant. Zones that skip midnight on
/// a DST change start the day at the first valid hour instead.
fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<FixedOffset>> {
    (0..3)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|dt| dt.fixed_offset())
}

/// Formats a duration for humans: `1h30m`, `45m`, `20s`, `0m`.
///
/// Negative durations get a leading `-`. Seconds are shown only when they
/// are not a whole number of minutes.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    let mut out = String::from(sign);
    if hours > 0 {
        out.push_str(&format!("{}h", hours));
    }
    if minutes > 0 || (hours == 0 && seconds == 0) {
        out.push_str(&format!("{}m", minutes));
    }
    if seconds > 0 {
        out.push_str(&format!("{}s", seconds));
    }
    out
}

/// Formats a date as `October 19, 2026`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
