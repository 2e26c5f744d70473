//! Error types for cron-timeline operations.

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use thiserror::Error;

/// Errors that can occur when building or querying a cron timeline.
#[derive(Error, Debug)]
pub enum TimelineError {
    /// The cron expression failed grammar or field validation.
    /// Raised at construction time, never deferred to the first query.
    #[error("invalid cron expression {expression:?}: {source}")]
    InvalidCron {
        /// The expression as the caller supplied it, before any field normalization.
        expression: String,
        #[source]
        source: cron::error::Error,
    },

    /// A time of day with sub-second precision cannot be expressed as a cron field.
    #[error("time of day {0} has sub-second precision, which cron fields cannot express")]
    UnrepresentableTime(NaiveTime),

    /// A calendar boundary query fell outside the representable range.
    #[error("no {boundary} found for {date} in timezone {zone}")]
    BoundaryOutOfRange {
        /// Which boundary was requested (e.g. "start of day").
        boundary: &'static str,
        date: NaiveDate,
        zone: Tz,
    },
}

/// Convenience alias used throughout cron-timeline.
pub type Result<T> = std::result::Result<T, TimelineError>;
