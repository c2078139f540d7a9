//! Pure time helpers shared by the scheduling domain and its consumers.
//!
//! Covers the two concerns every view of a task needs: snapping suggested
//! schedule times onto the quarter-hour grid, and rendering durations and
//! clock times for display. Everything here is a pure function of its
//! arguments.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};

/// Rounds an instant to the nearest quarter-hour boundary.
///
/// Seconds and sub-seconds are dropped before rounding. Minutes round
/// half-up onto the grid, carrying into the next hour (or day) when the
/// rounded minute reaches 60: `10:07` becomes `10:00`, `10:08` becomes
/// `10:15`, and `23:53` becomes `00:00` on the following day.
#[must_use]
pub fn round_to_quarter_hour(instant: DateTime<Utc>) -> DateTime<Utc> {
    let truncated = instant
        - Duration::seconds(i64::from(instant.second()))
        - Duration::nanoseconds(i64::from(instant.nanosecond()));
    let minute = i64::from(instant.minute());
    let target: i64 = match minute {
        0..=7 => 0,
        8..=22 => 15,
        23..=37 => 30,
        38..=52 => 45,
        _ => 60,
    };
    truncated + Duration::minutes(target - minute)
}

/// Decomposes a second count into whole hours, minutes, and seconds.
///
/// Negative inputs clamp to zero.
#[must_use]
pub fn decompose_seconds(total_seconds: i64) -> (i64, i64, i64) {
    let total = Duration::seconds(total_seconds.max(0));
    let hours = total.num_hours();
    let minutes = (total - Duration::hours(hours)).num_minutes();
    let seconds = (total - Duration::hours(hours) - Duration::minutes(minutes)).num_seconds();
    (hours, minutes, seconds)
}

/// Formats a second count as an `XhYmZs` display string, e.g. `0h 45m 0s`.
#[must_use]
pub fn format_duration(total_seconds: i64) -> String {
    let (hours, minutes, seconds) = decompose_seconds(total_seconds);
    format!("{hours}h {minutes}m {seconds}s")
}

/// Formats an instant as a `HH:MM` clock time for display.
#[must_use]
pub fn format_clock_time(instant: DateTime<Utc>) -> String {
    instant.format("%H:%M").to_string()
}

/// Formats a calendar date for summary headings, e.g. `Friday, 01 May 2026`.
#[must_use]
pub fn format_day(date: NaiveDate) -> String {
    date.format("%A, %d %B %Y").to_string()
}
