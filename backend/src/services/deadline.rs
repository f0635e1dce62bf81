//! SLA deadline computation over a business calendar.
//!
//! Given a start instant, a duration in hours and a [`Schedule`], the
//! deadline is the instant at which that many *counted* hours have elapsed.
//! Hours outside the schedule's active windows are skipped.
//!
//! Durations are converted to whole nanoseconds once up front; every window
//! boundary after that is exact integer arithmetic, so fractional SLAs such
//! as `0.25` hours land on the expected minute.

use chrono::Duration;

use crate::models::schedule::{BusinessWindow, Schedule};
use crate::models::time::{
    at_hour, hours_to_duration, is_weekend, next_weekday, parse_instant, start_of_day,
    weekday_on_or_after, Instant, TimeParseError,
};

/// Largest duration accepted, roughly 114 calendar years of 24/7 time.
pub const MAX_DURATION_HOURS: f64 = 1_000_000.0;

/// Reasons a deadline cannot be computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeadlineError {
    #[error("invalid start: {0}")]
    InvalidStart(#[from] TimeParseError),

    #[error("invalid duration: {hours} hours (expected a finite number between 0 and {max})", max = MAX_DURATION_HOURS)]
    InvalidDuration { hours: f64 },
}

/// Compute the instant at which `duration_hours` of schedule time have elapsed.
///
/// # Arguments
///
/// * `start` - Instant the clock starts ticking
/// * `duration_hours` - Counted hours to consume, fractional values allowed
/// * `schedule` - Which hours of the week count
///
/// # Returns
///
/// * `Ok(Instant)` - The deadline, never earlier than `start`
/// * `Err(DeadlineError::InvalidDuration)` - Negative, non-finite or out of range duration
///
/// A zero duration returns `start` unchanged for every schedule, even when
/// `start` falls outside the schedule's windows.
pub fn compute_deadline(
    start: Instant,
    duration_hours: f64,
    schedule: Schedule,
) -> Result<Instant, DeadlineError> {
    let invalid = || DeadlineError::InvalidDuration {
        hours: duration_hours,
    };

    if !duration_hours.is_finite() || !(0.0..=MAX_DURATION_HOURS).contains(&duration_hours) {
        return Err(invalid());
    }
    let remaining = hours_to_duration(duration_hours).ok_or_else(invalid)?;
    if remaining.is_zero() {
        return Ok(start);
    }

    // Every walk below stays inside this horizon, so once it is representable
    // the unchecked chrono arithmetic in the loops cannot overflow.
    start
        .checked_add_signed(calendar_horizon(duration_hours, schedule))
        .ok_or_else(invalid)?;

    let deadline = match schedule {
        Schedule::AlwaysOn => start + remaining,
        Schedule::WeekdaysFull => walk_weekdays(start, remaining),
        Schedule::BusinessWindow(window) => walk_business_window(start, remaining, window),
    };

    log::debug!(
        "deadline for {}h on {} from {} is {}",
        duration_hours,
        schedule,
        start,
        deadline
    );
    Ok(deadline)
}

/// String entry point for form input.
///
/// Parses `start` with [`parse_instant`] and delegates to [`compute_deadline`].
pub fn compute_deadline_str(
    start: &str,
    duration_hours: f64,
    schedule: Schedule,
) -> Result<Instant, DeadlineError> {
    let start = parse_instant(start)?;
    compute_deadline(start, duration_hours, schedule)
}

/// Move `instant` forward to the first moment that counts under `window`.
///
/// Weekends go to the next weekday's opening; before opening goes to today's
/// opening; at or after closing goes to the next weekday's opening.
pub fn align_to_window(instant: Instant, window: BusinessWindow) -> Instant {
    let date = instant.date();
    if is_weekend(date) {
        return at_hour(next_weekday(date), window.start_hour());
    }

    let open = at_hour(date, window.start_hour());
    let close = at_hour(date, window.end_hour());
    if instant < open {
        open
    } else if instant >= close {
        at_hour(next_weekday(date), window.start_hour())
    } else {
        instant
    }
}

fn walk_weekdays(start: Instant, mut remaining: Duration) -> Instant {
    let mut current = if is_weekend(start.date()) {
        start_of_day(weekday_on_or_after(start.date()))
    } else {
        start
    };

    loop {
        let midnight = start_of_day(current.date() + Duration::days(1));
        let span = midnight - current;
        if remaining <= span {
            return current + remaining;
        }
        remaining = remaining - span;
        current = start_of_day(next_weekday(current.date()));
    }
}

fn walk_business_window(start: Instant, mut remaining: Duration, window: BusinessWindow) -> Instant {
    let mut current = align_to_window(start, window);

    loop {
        let close = at_hour(current.date(), window.end_hour());
        let span = (close - current).max(Duration::zero());
        if remaining <= span {
            return current + remaining;
        }
        remaining = remaining - span;
        current = at_hour(next_weekday(current.date()), window.start_hour());
    }
}

/// Upper bound on the calendar time a walk can cover.
fn calendar_horizon(duration_hours: f64, schedule: Schedule) -> Duration {
    let hours_per_day = match schedule {
        Schedule::AlwaysOn => return Duration::hours(duration_hours.ceil() as i64),
        Schedule::WeekdaysFull => 24.0,
        Schedule::BusinessWindow(window) => f64::from(window.hours_per_day()),
    };
    let working_days = (duration_hours / hours_per_day).ceil() as i64;
    // five working days per seven calendar days, plus slack for alignment
    Duration::days(working_days * 7 / 5 + 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Timelike, Weekday};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Instant {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    // 2024-03-04 is a Monday; 2024-03-08 a Friday.

    #[test]
    fn always_on_adds_wall_clock_hours() {
        let start = at(2024, 3, 6, 10, 0);
        let deadline = compute_deadline(start, 26.0, Schedule::AlwaysOn).unwrap();
        assert_eq!(deadline, at(2024, 3, 7, 12, 0));
    }

    #[test]
    fn business_window_rolls_over_weekend() {
        let deadline =
            compute_deadline(at(2024, 3, 8, 16, 0), 2.0, Schedule::BUSINESS_HOURS).unwrap();
        assert_eq!(deadline, at(2024, 3, 11, 10, 0));
    }

    #[test]
    fn weekdays_full_skips_from_saturday() {
        let deadline =
            compute_deadline(at(2024, 3, 9, 10, 0), 5.0, Schedule::WeekdaysFull).unwrap();
        assert_eq!(deadline, at(2024, 3, 11, 5, 0));
    }

    #[test]
    fn weekdays_full_crosses_weekend_midweek_start() {
        // Friday 20:00 + 10h: 4h Friday, 6h Monday
        let deadline =
            compute_deadline(at(2024, 3, 8, 20, 0), 10.0, Schedule::WeekdaysFull).unwrap();
        assert_eq!(deadline, at(2024, 3, 11, 6, 0));
    }

    #[test]
    fn weekdays_full_exact_fit_ends_at_midnight() {
        let deadline =
            compute_deadline(at(2024, 3, 8, 20, 0), 4.0, Schedule::WeekdaysFull).unwrap();
        assert_eq!(deadline, at(2024, 3, 9, 0, 0));
    }

    #[test]
    fn business_window_aligns_early_start_to_opening() {
        let deadline =
            compute_deadline(at(2024, 3, 5, 6, 30), 1.5, Schedule::BUSINESS_HOURS).unwrap();
        assert_eq!(deadline, at(2024, 3, 5, 10, 30));
    }

    #[test]
    fn business_window_start_at_close_belongs_to_next_day() {
        let deadline =
            compute_deadline(at(2024, 3, 5, 17, 0), 1.0, Schedule::BUSINESS_HOURS).unwrap();
        assert_eq!(deadline, at(2024, 3, 6, 10, 0));
    }

    #[test]
    fn business_window_exact_fill_ends_at_close() {
        let deadline =
            compute_deadline(at(2024, 3, 5, 9, 0), 8.0, Schedule::BUSINESS_HOURS).unwrap();
        assert_eq!(deadline, at(2024, 3, 5, 17, 0));
    }

    #[test]
    fn business_window_multi_day() {
        // 20h of 9-17: Mon 8h, Tue 8h, Wed 4h
        let deadline =
            compute_deadline(at(2024, 3, 4, 9, 0), 20.0, Schedule::BUSINESS_HOURS).unwrap();
        assert_eq!(deadline, at(2024, 3, 6, 13, 0));
    }

    #[test]
    fn extended_window_preset() {
        let schedule: Schedule = "biz_8_18".parse().unwrap();
        let deadline = compute_deadline(at(2024, 3, 8, 17, 0), 3.0, schedule).unwrap();
        assert_eq!(deadline, at(2024, 3, 11, 10, 0));
    }

    #[test]
    fn full_day_window_behaves_like_weekdays_full() {
        let window = Schedule::business_window(0, 24).unwrap();
        let start = at(2024, 3, 8, 20, 0);
        assert_eq!(
            compute_deadline(start, 10.0, window).unwrap(),
            compute_deadline(start, 10.0, Schedule::WeekdaysFull).unwrap()
        );
    }

    #[test]
    fn fractional_hours_are_exact() {
        let deadline =
            compute_deadline(at(2024, 3, 5, 16, 45), 0.25, Schedule::BUSINESS_HOURS).unwrap();
        assert_eq!(deadline, at(2024, 3, 5, 17, 0));

        let deadline =
            compute_deadline(at(2024, 3, 5, 16, 45), 0.5, Schedule::BUSINESS_HOURS).unwrap();
        assert_eq!(deadline, at(2024, 3, 6, 9, 15));
    }

    #[test]
    fn zero_duration_returns_start_for_every_schedule() {
        let saturday = at(2024, 3, 9, 23, 0);
        for schedule in [
            Schedule::AlwaysOn,
            Schedule::WeekdaysFull,
            Schedule::BUSINESS_HOURS,
        ] {
            assert_eq!(compute_deadline(saturday, 0.0, schedule).unwrap(), saturday);
        }
    }

    #[test]
    fn negative_and_non_finite_durations_are_invalid() {
        let start = at(2024, 3, 5, 9, 0);
        for hours in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e12] {
            for schedule in [
                Schedule::AlwaysOn,
                Schedule::WeekdaysFull,
                Schedule::BUSINESS_HOURS,
            ] {
                assert!(matches!(
                    compute_deadline(start, hours, schedule),
                    Err(DeadlineError::InvalidDuration { .. })
                ));
            }
        }
    }

    #[test]
    fn string_entry_point_reports_bad_start() {
        let err = compute_deadline_str("yesterday", 1.0, Schedule::AlwaysOn).unwrap_err();
        assert!(matches!(err, DeadlineError::InvalidStart(_)));

        let ok = compute_deadline_str("2024-03-08T16:00", 2.0, Schedule::BUSINESS_HOURS).unwrap();
        assert_eq!(ok, at(2024, 3, 11, 10, 0));
    }

    #[test]
    fn huge_business_durations_stay_on_weekdays() {
        let deadline =
            compute_deadline(at(2024, 3, 4, 9, 0), 10_000.0, Schedule::BUSINESS_HOURS).unwrap();
        assert!(!matches!(deadline.weekday(), Weekday::Sat | Weekday::Sun));
        assert!(deadline.hour() >= 9 && deadline.hour() <= 17);
    }

    #[test]
    fn align_to_window_cases() {
        let window = BusinessWindow::new(9, 17).unwrap();
        assert_eq!(align_to_window(at(2024, 3, 9, 12, 0), window), at(2024, 3, 11, 9, 0));
        assert_eq!(align_to_window(at(2024, 3, 5, 8, 59), window), at(2024, 3, 5, 9, 0));
        assert_eq!(align_to_window(at(2024, 3, 5, 12, 0), window), at(2024, 3, 5, 12, 0));
        assert_eq!(align_to_window(at(2024, 3, 8, 17, 0), window), at(2024, 3, 11, 9, 0));
    }
}
