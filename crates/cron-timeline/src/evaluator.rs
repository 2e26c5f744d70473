//! Forward-only schedule evaluation, adapted to a UTC query surface.
//!
//! Wraps the `cron` crate's [`Schedule`] and maps its occurrences through the
//! gap/overlap policy in [`crate::zone`]. The schedule is deliberately
//! iterated over *naive wall-clock* times rather than zone-tagged times: the
//! `cron` crate skips wall times that fall in a spring-forward gap, while
//! this crate's policy normalizes them to the first valid instant after the
//! gap.

use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use chrono_tz::Tz;
use cron::Schedule;

use crate::error::{Result, TimelineError};
use crate::format::{self, CronFormat};
use crate::zone;

/// Last calendar year the schedule evaluator can produce occurrences for.
/// This is a limitation of the `cron` crate, whose year field spans 1970–2100.
pub(crate) const MAX_YEAR: i32 = 2100;

/// Start of the representable range: the Unix epoch.
pub(crate) fn representable_floor() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH
}

/// End of the representable range: one tick below 2101-01-01T00:00:00Z.
pub(crate) fn representable_ceiling() -> DateTime<Utc> {
    // 2101-01-01T00:00:00Z as seconds since the epoch (asserted by a test).
    const CEILING_EPOCH_SECONDS: i64 = 4_133_980_800;
    DateTime::UNIX_EPOCH + Duration::seconds(CEILING_EPOCH_SECONDS) - Duration::nanoseconds(1)
}

/// A parsed cron schedule evaluated against a single timezone.
///
/// Parsed once at construction and held opaquely; never re-parsed per query.
#[derive(Debug, Clone)]
pub(crate) struct Evaluator {
    schedule: Schedule,
    zone: Tz,
}

impl Evaluator {
    /// Parse `expression` under the given field convention.
    pub(crate) fn parse(expression: &str, format: CronFormat, zone: Tz) -> Result<Self> {
        let normalized = format::normalize(expression, format);
        let schedule =
            Schedule::from_str(&normalized).map_err(|source| TimelineError::InvalidCron {
                expression: expression.to_string(),
                source,
            })?;
        Ok(Self { schedule, zone })
    }

    /// The first occurrence strictly after `from`, or at `from` itself when
    /// `inclusive` is set.
    pub(crate) fn next_occurrence(
        &self,
        from: DateTime<Utc>,
        inclusive: bool,
    ) -> Option<DateTime<Utc>> {
        self.occurrences_from(from)
            .find(|&occurrence| occurrence > from || (inclusive && occurrence == from))
    }

    /// Ascending occurrences within a UTC range. Consecutive duplicates are
    /// collapsed: gap normalization can map several wall times onto the same
    /// instant.
    pub(crate) fn occurrences_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        from_inclusive: bool,
        to_inclusive: bool,
    ) -> Vec<DateTime<Utc>> {
        let mut occurrences: Vec<DateTime<Utc>> = Vec::new();
        if to < from {
            return occurrences;
        }

        for occurrence in self.occurrences_from(from) {
            let past_end = if to_inclusive {
                occurrence > to
            } else {
                occurrence >= to
            };
            if past_end {
                break;
            }

            let before_start = if from_inclusive {
                occurrence < from
            } else {
                occurrence <= from
            };
            if before_start {
                continue;
            }

            if occurrences.last() != Some(&occurrence) {
                occurrences.push(occurrence);
            }
        }

        occurrences
    }

    /// UTC-mapped occurrences starting slightly before `from`'s wall-clock
    /// projection; callers filter against `from` itself. The sequence is
    /// monotone nondecreasing and terminates once the schedule's year field
    /// is exhausted.
    fn occurrences_from(&self, from: DateTime<Utc>) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        // The naive wall times are tagged as UTC purely to drive the schedule
        // iterator; the real mapping to UTC happens per occurrence.
        let origin = DateTime::<Utc>::from_naive_utc_and_offset(self.seek_origin(from), Utc);
        self.schedule
            .after(&origin)
            .filter_map(move |wall| zone::wall_to_utc(wall.naive_utc(), self.zone))
    }

    /// Wall-clock point to begin a forward scan for occurrences at or after
    /// `from`.
    ///
    /// Near an offset transition the scan must back up past the whole
    /// discontinuity: occurrences in an overlap's daylight pass resolve
    /// *forward* to the standard pass, and occurrences inside a gap resolve
    /// forward to the gap's end, so a scan starting exactly at `from`'s
    /// projection would miss them. The backup is the discontinuity's own
    /// width plus an hour of slack, which scales up to calendar-day skips
    /// (Pacific/Apia, 2011).
    fn seek_origin(&self, from: DateTime<Utc>) -> NaiveDateTime {
        let margin = match zone::transition_delta(from, self.zone, Duration::hours(3)) {
            Some(delta) => delta + Duration::hours(1),
            None => Duration::seconds(1),
        };
        let wall = zone::utc_to_wall(from, self.zone);
        wall.checked_sub_signed(margin).unwrap_or(wall)
    }
}
