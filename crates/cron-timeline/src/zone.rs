//! Wall-clock ↔ UTC conversion with explicit DST disambiguation.
//!
//! Civil-time rules make naive wall-clock arithmetic unsound at transition
//! boundaries, so the two policies below are pinned here and applied inside
//! every evaluator call:
//!
//! - A wall time inside a spring-forward gap resolves to the first valid
//!   instant after the gap (a scheduled 02:30 during a 02:00→03:00 jump
//!   fires at 03:00, on that day only).
//! - A wall time inside a fall-back overlap resolves to the instant under the
//!   standard (post-transition) offset, regardless of search direction, so
//!   repeated queries at the same wall-clock value are idempotent.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// Longest gap worth probing across, in whole minutes. Real tzdata gaps top
/// out at a calendar-day skip (Samoa, 2011); anything wider is unmappable.
const MAX_GAP_MINUTES: i64 = 48 * 60;

/// Map a wall-clock time in `zone` to the UTC instant it resolves to.
///
/// Total for every wall time real tzdata can produce; `None` only if a gap
/// exceeds [`MAX_GAP_MINUTES`]. The mapping is monotone nondecreasing in the
/// wall time, which the evaluator's scan loops rely on.
pub(crate) fn wall_to_utc(wall: NaiveDateTime, zone: Tz) -> Option<DateTime<Utc>> {
    match zone.from_local_datetime(&wall) {
        LocalResult::Single(instant) => Some(instant.with_timezone(&Utc)),
        // Fall-back overlap: the later UTC instant carries the standard
        // (post-transition) offset.
        LocalResult::Ambiguous(_, standard) => Some(standard.with_timezone(&Utc)),
        LocalResult::None => first_instant_after_gap(wall, zone),
    }
}

/// Project a UTC instant onto the zone's wall clock.
pub(crate) fn utc_to_wall(instant: DateTime<Utc>, zone: Tz) -> NaiveDateTime {
    instant.with_timezone(&zone).naive_local()
}

/// Width of the wall-clock discontinuity at the offset transition nearest
/// `instant`, if one lies within `probe` on either side. `None` when the
/// offset is stable across the whole probed window.
///
/// The width equals the amount of wall time a gap skips (or an overlap
/// repeats): one hour for an ordinary DST change, a full day for a
/// date-line move like Pacific/Apia's in 2011.
pub(crate) fn transition_delta(instant: DateTime<Utc>, zone: Tz, probe: Duration) -> Option<Duration> {
    let offset_at =
        |t: DateTime<Utc>| zone.offset_from_utc_datetime(&t.naive_utc()).fix().local_minus_utc();

    let here = offset_at(instant);
    let before = instant
        .checked_sub_signed(probe)
        .map_or(here, |t| offset_at(t));
    let after = instant
        .checked_add_signed(probe)
        .map_or(here, |t| offset_at(t));

    let widest = (here - before).abs().max((after - here).abs());
    (widest > 0).then(|| Duration::seconds(i64::from(widest)))
}

/// Resolve a nonexistent wall time to the first valid instant after its gap.
///
/// Transitions are minute-aligned in tzdata, so probing whole minutes lands
/// exactly on the gap end.
fn first_instant_after_gap(wall: NaiveDateTime, zone: Tz) -> Option<DateTime<Utc>> {
    let mut probe = wall.with_second(0)?.with_nanosecond(0)?;
    for _ in 0..MAX_GAP_MINUTES {
        probe += Duration::minutes(1);
        match zone.from_local_datetime(&probe) {
            LocalResult::None => continue,
            LocalResult::Single(instant) => return Some(instant.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => return Some(earliest.with_timezone(&Utc)),
        }
    }
    None
}
