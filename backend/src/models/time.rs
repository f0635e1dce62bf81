//! Civil, timezone-naive instants.
//!
//! Every calculator in this crate works on wall-clock time in the caller's
//! own calendar. [`Instant`] is therefore a plain [`NaiveDateTime`]; the
//! helpers here cover parsing the form inputs the panel accepts and the
//! weekday arithmetic shared by the schedule-aware calculators.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// A point in civil time with sub-second resolution.
pub type Instant = NaiveDateTime;

/// Formats accepted by [`parse_instant`], tried in order.
///
/// `%.f` also matches an absent fractional part, so each pattern covers
/// both `HH:MM:SS` and `HH:MM:SS.fff`.
const ACCEPTED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Error returned when a textual instant cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised date-time '{input}' (expected YYYY-MM-DDTHH:MM[:SS])")]
pub struct TimeParseError {
    pub input: String,
}

/// Parse a `datetime-local` style string into an [`Instant`].
pub fn parse_instant(input: &str) -> Result<Instant, TimeParseError> {
    let trimmed = input.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| TimeParseError {
            input: input.to_string(),
        })
}

/// Render an instant as `YYYY-MM-DDTHH:MM:SS`, dropping sub-second digits.
pub fn format_instant(instant: &Instant) -> String {
    instant.format(DISPLAY_FORMAT).to_string()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// First Monday-Friday date strictly after `date`.
pub fn next_weekday(date: NaiveDate) -> NaiveDate {
    let mut next = date + Duration::days(1);
    while is_weekend(next) {
        next += Duration::days(1);
    }
    next
}

/// `date` itself when it is a weekday, otherwise the following Monday.
pub fn weekday_on_or_after(date: NaiveDate) -> NaiveDate {
    if is_weekend(date) {
        next_weekday(date)
    } else {
        date
    }
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> Instant {
    date.and_time(NaiveTime::MIN)
}

/// `date` at `hour:00`. Hour 24 is the following midnight.
pub fn at_hour(date: NaiveDate, hour: u8) -> Instant {
    start_of_day(date) + Duration::hours(i64::from(hour))
}

/// Convert a fractional number of hours into an exact [`Duration`].
///
/// The value is rounded once to whole nanoseconds so that all later
/// boundary arithmetic is integral. Returns `None` for non-finite input or
/// magnitudes chrono cannot represent.
pub fn hours_to_duration(hours: f64) -> Option<Duration> {
    if !hours.is_finite() {
        return None;
    }
    let nanos = qtty::Hours::new(hours).to::<qtty::Nanosecond>().value().round();
    if nanos.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(Duration::nanoseconds(nanos as i64))
}

/// Fractional hours contained in `duration`.
pub fn duration_to_hours(duration: Duration) -> f64 {
    let seconds = match duration.num_nanoseconds() {
        Some(ns) => ns as f64 / 1e9,
        None => duration.num_seconds() as f64,
    };
    qtty::Seconds::new(seconds).to::<qtty::Hour>().value()
}
