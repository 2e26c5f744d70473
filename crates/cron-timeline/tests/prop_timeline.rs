//! Property-based tests for the instant-resolution engine using proptest.
//!
//! These verify invariants that should hold for *any* daily wall-clock
//! schedule in any of a set of real timezones, not just the concrete
//! examples in `timeline_tests.rs`.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use cron_timeline::instants;
use cron_timeline::{CronTimeline, Timeline};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_time() -> impl Strategy<Value = NaiveTime> {
    (0u32..=23, 0u32..=59, 0u32..=59).prop_map(|(h, m, s)| {
        NaiveTime::from_hms_opt(h, m, s).expect("strategy produces valid times")
    })
}

fn arb_zone() -> impl Strategy<Value = Tz> {
    prop_oneof![
        Just("UTC"),
        Just("Europe/Amsterdam"),
        Just("America/New_York"),
        Just("Asia/Tokyo"),
        Just("Australia/Sydney"),
    ]
    .prop_map(|name| name.parse().expect("strategy produces valid zones"))
}

/// A query instant in the 2020–2029 range. Day is capped at 28 to avoid
/// invalid month/day combos.
fn arb_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (2020i32..=2029, 1u32..=12, 1u32..=28, 0u32..=23, 0u32..=59).prop_map(|(y, mo, d, h, mi)| {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .expect("strategy produces valid instants")
    })
}

fn daily_timeline(time: NaiveTime, zone: Tz) -> CronTimeline {
    instants::daily_at(time, zone).expect("whole-second daily schedule parses")
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: a successor is an instant, and its own predecessor
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn successor_round_trips(time in arb_time(), zone in arb_zone(), t in arb_instant()) {
        let timeline = daily_timeline(time, zone);

        if let Some(n) = timeline.next_instant(t) {
            prop_assert!(n > t, "successor {n} not after query point {t}");
            prop_assert!(timeline.is_instant(n));
            prop_assert_eq!(
                timeline.previous_instant(n + Duration::nanoseconds(1)),
                Some(n)
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: nothing lies between predecessor and successor
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn no_instant_between_neighbors(time in arb_time(), zone in arb_zone(), t in arb_instant()) {
        let timeline = daily_timeline(time, zone);

        let (Some(p), Some(n)) = (timeline.previous_instant(t), timeline.next_instant(t)) else {
            return Ok(());
        };
        prop_assert!(p < t);
        prop_assert!(n > t);

        // The first instant after the predecessor is the query point itself
        // when it happens to be an instant, otherwise the successor.
        let expected = if timeline.is_instant(t) { t } else { n };
        prop_assert_eq!(timeline.next_instant(p), Some(expected));

        // When the query point is not an instant, (p, n) holds no instant at
        // all, so any point between the neighbors resolves to the same pair.
        if !timeline.is_instant(t) {
            let midpoint = p + (n - p) / 2;
            if midpoint > p && midpoint < n && !timeline.is_instant(midpoint) {
                prop_assert_eq!(timeline.next_instant(midpoint), Some(n));
                prop_assert_eq!(timeline.previous_instant(midpoint), Some(p));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: forward walk then backward walk reproduces the sequence
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn walk_inversion(time in arb_time(), zone in arb_zone(), start in arb_instant()) {
        const STEPS: usize = 10;
        let timeline = daily_timeline(time, zone);

        let mut cursor = start;
        let mut forward = Vec::with_capacity(STEPS);
        for _ in 0..STEPS {
            let Some(next) = timeline.next_instant(cursor) else {
                return Ok(()); // range exhausted, nothing to invert
            };
            forward.push(next);
            cursor = next;
        }

        cursor += Duration::nanoseconds(1);
        for expected in forward.iter().rev() {
            let previous = timeline.previous_instant(cursor);
            prop_assert_eq!(previous, Some(*expected));
            cursor = *expected;
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: instants are strictly ordered and roughly daily
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn consecutive_instants_are_about_a_day_apart(
        time in arb_time(),
        zone in arb_zone(),
        start in arb_instant(),
    ) {
        let timeline = daily_timeline(time, zone);

        let mut cursor = start;
        let mut last: Option<DateTime<Utc>> = None;
        for _ in 0..5 {
            let Some(next) = timeline.next_instant(cursor) else {
                return Ok(());
            };
            if let Some(previous) = last {
                let spacing = next - previous;
                // DST shifts move a daily schedule by at most two hours; a
                // gap on the schedule's own wall time can additionally pull
                // an occurrence forward.
                prop_assert!(
                    spacing >= Duration::hours(22) && spacing <= Duration::hours(26),
                    "unexpected spacing {spacing} between {previous} and {next}"
                );
            }
            last = Some(next);
            cursor = next;
        }
    }
}
