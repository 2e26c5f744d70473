//! The instant-resolution engine: bidirectional queries over a cron schedule.
//!
//! The underlying evaluator can only search forward in time, so backward
//! search is derived here by scanning expanding windows of past occurrences
//! rather than delegated. Window width is 1.5× the schedule's observed
//! cadence, a safety margin for schedules whose spacing locally contracts
//! (leap-day rules and the like).

use chrono::{DateTime, Datelike, Duration, Utc};
use chrono_tz::Tz;

use crate::error::Result;
use crate::evaluator::{self, Evaluator, MAX_YEAR};
use crate::format::{self, CronFormat};

/// A set of instants on the UTC timeline, queryable in both directions.
///
/// Implementations are immutable after construction; every query is a finite,
/// pure calendar computation with no shared mutable state.
pub trait Timeline {
    /// The first matching instant strictly after `from`, if any remains.
    fn next_instant(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>>;

    /// The last matching instant strictly before `from`, if any exists.
    fn previous_instant(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>>;

    /// Whether `t` itself is a matching instant, tick-for-tick.
    fn is_instant(&self, t: DateTime<Utc>) -> bool;
}

/// Instants defined by a cron expression in a fixed timezone.
///
/// Supports expressions of 5 or 6 fields: second (optional), minute, hour,
/// day of month, month, day of week. Occurrences exist within the evaluator's
/// representable range, whose year field spans 1970–2100.
#[derive(Debug, Clone)]
pub struct CronTimeline {
    evaluator: Evaluator,
    /// Spacing between the schedule's first two occurrences; `None` when the
    /// schedule has at most one occurrence in its whole representable range.
    cadence: Option<Duration>,
}

impl CronTimeline {
    /// Build a timeline from `expression` in `zone`, picking the field
    /// convention with [`format::resolve_format`].
    ///
    /// # Errors
    /// Returns [`crate::TimelineError::InvalidCron`] if the expression fails
    /// parse validation.
    pub fn new(expression: &str, zone: Tz) -> Result<Self> {
        Self::with_format(expression, format::resolve_format(expression), zone)
    }

    /// Build a timeline from `expression` under an explicit field convention.
    ///
    /// # Errors
    /// Returns [`crate::TimelineError::InvalidCron`] if the expression fails
    /// parse validation.
    pub fn with_format(expression: &str, format: CronFormat, zone: Tz) -> Result<Self> {
        let evaluator = Evaluator::parse(expression, format, zone)?;
        let cadence = first_cadence(&evaluator);
        Ok(Self { evaluator, cadence })
    }
}

impl Timeline for CronTimeline {
    fn next_instant(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if from.year() > MAX_YEAR {
            return None;
        }
        self.evaluator.next_occurrence(from, false)
    }

    fn previous_instant(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let from = if from.year() > MAX_YEAR {
            evaluator::representable_ceiling()
        } else {
            from
        };

        let Some(cadence) = self.cadence else {
            // At most one occurrence exists in the whole range. An inclusive
            // forward query can only land at or after `from`, which is never
            // a predecessor.
            return match self.evaluator.next_occurrence(from, true) {
                Some(occurrence) if occurrence < from => Some(occurrence),
                _ => None,
            };
        };

        let estimate = cadence * 3 / 2;
        let floor = evaluator::representable_floor();

        // Walk windows [from − estimate×(attempt+1), from − estimate×attempt)
        // backward until one holds an occurrence. Only representable-floor
        // underflow bounds the walk: no global lower bound exists on how
        // sparse a schedule may be.
        for attempt in 0i32.. {
            let window_end = estimate
                .checked_mul(attempt)
                .and_then(|back| from.checked_sub_signed(back))
                .unwrap_or(floor);
            if window_end <= floor {
                return None;
            }

            let window_start = estimate
                .checked_mul(attempt + 1)
                .and_then(|back| from.checked_sub_signed(back))
                .unwrap_or(floor)
                .max(floor);

            let occurrences =
                self.evaluator
                    .occurrences_in_range(window_start, window_end, true, false);
            if let Some(latest) = occurrences.last() {
                return Some(*latest);
            }
        }

        None
    }

    fn is_instant(&self, t: DateTime<Utc>) -> bool {
        if t.year() > MAX_YEAR {
            return false;
        }
        self.evaluator.next_occurrence(t, true) == Some(t)
    }
}

/// Spacing between the schedule's first two occurrences after the
/// representable floor.
///
/// The probe starts one tick past the floor rather than at the floor itself;
/// some evaluators misreport an occurrence landing exactly on their origin.
fn first_cadence(evaluator: &Evaluator) -> Option<Duration> {
    let origin = evaluator::representable_floor() + Duration::nanoseconds(1);
    let first = evaluator.next_occurrence(origin, true)?;
    let second = evaluator.next_occurrence(first, false)?;
    Some(second - first)
}
