//! Property tests for the SLA deadline walk.

use chrono::{Datelike, Duration, NaiveDate, Timelike, Weekday};
use proptest::prelude::*;

use handyman::models::{Instant, Schedule};
use handyman::services::{compute_deadline, DeadlineError};

fn base() -> Instant {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Any minute within two years of 2024-01-01.
fn start_strategy() -> impl Strategy<Value = Instant> {
    (0i64..2 * 366 * 24 * 60).prop_map(|m| base() + Duration::minutes(m))
}

fn window_strategy() -> impl Strategy<Value = Schedule> {
    (0u8..24)
        .prop_flat_map(|s| (Just(s), s + 1..=24))
        .prop_map(|(s, e)| Schedule::business_window(s, e).unwrap())
}

fn schedule_strategy() -> impl Strategy<Value = Schedule> {
    prop_oneof![
        Just(Schedule::AlwaysOn),
        Just(Schedule::WeekdaysFull),
        window_strategy(),
    ]
}

fn is_weekend(t: Instant) -> bool {
    matches!(t.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Whether the minute starting at `t` counts under `schedule`.
fn counts(t: Instant, schedule: Schedule) -> bool {
    match schedule {
        Schedule::AlwaysOn => true,
        Schedule::WeekdaysFull => !is_weekend(t),
        Schedule::BusinessWindow(w) => {
            let hour = t.hour() as u8;
            !is_weekend(t) && hour >= w.start_hour() && hour < w.end_hour()
        }
    }
}

proptest! {
    #[test]
    fn prop_always_on_adds_exact_hours(start in start_strategy(), minutes in 0i64..100_000) {
        let hours = minutes as f64 / 60.0;
        let deadline = compute_deadline(start, hours, Schedule::AlwaysOn).unwrap();
        prop_assert_eq!(deadline, start + Duration::minutes(minutes));
    }

    #[test]
    fn prop_zero_duration_is_identity(start in start_strategy(), schedule in schedule_strategy()) {
        prop_assert_eq!(compute_deadline(start, 0.0, schedule).unwrap(), start);
    }

    #[test]
    fn prop_never_before_start(
        start in start_strategy(),
        hours in 0.0..500.0f64,
        schedule in schedule_strategy(),
    ) {
        prop_assert!(compute_deadline(start, hours, schedule).unwrap() >= start);
    }

    #[test]
    fn prop_monotonic_in_duration(
        start in start_strategy(),
        a in 0.0..300.0f64,
        b in 0.0..300.0f64,
        schedule in schedule_strategy(),
    ) {
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        let d_short = compute_deadline(start, short, schedule).unwrap();
        let d_long = compute_deadline(start, long, schedule).unwrap();
        prop_assert!(d_short <= d_long);
    }

    #[test]
    fn prop_business_window_lands_inside_window(
        start in start_strategy(),
        hours in 0.01..200.0f64,
        (s, e) in (0u8..23).prop_flat_map(|s| (Just(s), s + 1..24)),
    ) {
        let schedule = Schedule::business_window(s, e).unwrap();
        let deadline = compute_deadline(start, hours, schedule).unwrap();
        prop_assert!(!is_weekend(deadline));

        let seconds = deadline.num_seconds_from_midnight() as f64
            + f64::from(deadline.nanosecond()) / 1e9;
        prop_assert!(seconds > f64::from(s) * 3600.0);
        prop_assert!(seconds <= f64::from(e) * 3600.0);
    }

    #[test]
    fn prop_counted_minutes_match_duration(
        start in start_strategy(),
        minutes in 1i64..2_400,
        schedule in schedule_strategy(),
    ) {
        let deadline = compute_deadline(start, minutes as f64 / 60.0, schedule).unwrap();
        let mut counted = 0;
        let mut t = start;
        while t < deadline {
            if counts(t, schedule) {
                counted += 1;
            }
            t += Duration::minutes(1);
        }
        prop_assert_eq!(counted, minutes);
    }

    #[test]
    fn prop_negative_duration_is_invalid(start in start_strategy(), schedule in schedule_strategy()) {
        prop_assert_eq!(
            compute_deadline(start, -1.0, schedule),
            Err(DeadlineError::InvalidDuration { hours: -1.0 })
        );
    }
}

#[test]
fn test_non_finite_durations_are_invalid() {
    for hours in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            compute_deadline(base(), hours, Schedule::WeekdaysFull),
            Err(DeadlineError::InvalidDuration { .. })
        ));
    }
}
