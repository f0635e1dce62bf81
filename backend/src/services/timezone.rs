//! Fixed-offset timezone conversion.
//!
//! The panel works with a short list of standard-time UTC offsets rather than
//! a full tz database. Offsets are in hours and may be fractional (IST is
//! `+5.5`); they are rounded to whole minutes.

use chrono::{DateTime, Duration, FixedOffset, NaiveTime, Timelike, Utc};
use serde::Serialize;

use crate::models::time::Instant;

/// Widest offset in use anywhere (Line Islands, UTC+14).
pub const MAX_OFFSET_HOURS: f64 = 14.0;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimeZoneError {
    #[error("invalid UTC offset {0} hours (expected -14..=14)")]
    InvalidOffset(f64),

    #[error("invalid time of day '{0}' (expected HH:MM)")]
    InvalidTime(String),
}

/// A timezone choice offered by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeZonePreset {
    pub label: &'static str,
    pub offset_hours: f64,
}

const fn preset(label: &'static str, offset_hours: f64) -> TimeZonePreset {
    TimeZonePreset {
        label,
        offset_hours,
    }
}

pub const TIMEZONE_PRESETS: [TimeZonePreset; 11] = [
    preset("UTC", 0.0),
    preset("EST (New York)", -5.0),
    preset("CST (Chicago)", -6.0),
    preset("MST (Denver)", -7.0),
    preset("PST (Los Angeles)", -8.0),
    preset("GMT (London)", 0.0),
    preset("CET (Paris)", 1.0),
    preset("IST (India)", 5.5),
    preset("CST (China)", 8.0),
    preset("JST (Tokyo)", 9.0),
    preset("AEST (Sydney)", 10.0),
];

/// First preset whose offset matches `offset_hours`.
pub fn preset_for_offset(offset_hours: f64) -> Option<&'static TimeZonePreset> {
    TIMEZONE_PRESETS
        .iter()
        .find(|p| (p.offset_hours - offset_hours).abs() < f64::EPSILON)
}

/// Build a [`FixedOffset`] east of UTC from fractional hours.
pub fn fixed_offset(offset_hours: f64) -> Result<FixedOffset, TimeZoneError> {
    if !offset_hours.is_finite() || offset_hours.abs() > MAX_OFFSET_HOURS {
        return Err(TimeZoneError::InvalidOffset(offset_hours));
    }
    let minutes = qtty::Hours::new(offset_hours)
        .to::<qtty::Minute>()
        .value()
        .round() as i32;
    FixedOffset::east_opt(minutes * 60).ok_or(TimeZoneError::InvalidOffset(offset_hours))
}

/// A wall-clock time after conversion, with the calendar day it falls on
/// relative to the input. Offsets span UTC-14..=UTC+14, so the shift ranges
/// over `-2..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftedTime {
    pub time: NaiveTime,
    pub day_offset: i64,
}

impl ShiftedTime {
    /// `HH:MM` rendering.
    pub fn formatted(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

/// Parse `HH:MM` (or `HH:MM:SS`).
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, TimeZoneError> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| TimeZoneError::InvalidTime(input.to_string()))
}

/// Convert a time of day between two UTC offsets.
///
/// # Arguments
///
/// * `time` - Wall-clock time in the source zone, `HH:MM`
/// * `from_hours` - Source offset from UTC in hours
/// * `to_hours` - Target offset from UTC in hours
///
/// # Returns
///
/// The target wall-clock time, wrapped into a single day, and the day shift.
pub fn convert_time_of_day(
    time: &str,
    from_hours: f64,
    to_hours: f64,
) -> Result<ShiftedTime, TimeZoneError> {
    let time = parse_time_of_day(time)?;
    let from = fixed_offset(from_hours)?;
    let to = fixed_offset(to_hours)?;

    let shift = i64::from(to.local_minus_utc() - from.local_minus_utc());
    let total = i64::from(time.num_seconds_from_midnight()) + shift;
    let seconds = total.rem_euclid(SECONDS_PER_DAY) as u32;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, time.nanosecond())
        .ok_or_else(|| TimeZoneError::InvalidTime(time.to_string()))?;

    Ok(ShiftedTime {
        time,
        day_offset: total.div_euclid(SECONDS_PER_DAY),
    })
}

/// Convert a full civil instant between two UTC offsets.
pub fn convert_instant(
    instant: Instant,
    from_hours: f64,
    to_hours: f64,
) -> Result<Instant, TimeZoneError> {
    let from = fixed_offset(from_hours)?;
    let to = fixed_offset(to_hours)?;
    let shift = Duration::seconds(i64::from(to.local_minus_utc() - from.local_minus_utc()));
    instant
        .checked_add_signed(shift)
        .ok_or(TimeZoneError::InvalidOffset(to_hours))
}

/// The customer's civil time right now.
pub fn customer_local_time(
    now: DateTime<Utc>,
    offset_hours: f64,
) -> Result<Instant, TimeZoneError> {
    let offset = fixed_offset(offset_hours)?;
    Ok(now.with_timezone(&offset).naive_local())
}
