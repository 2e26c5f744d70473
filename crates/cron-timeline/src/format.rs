//! Cron field-count conventions and the resolver that picks one.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Field-count convention of a cron expression.
///
/// Chosen once when a timeline is constructed and never re-derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CronFormat {
    /// Five fields: minute, hour, day of month, month, day of week.
    #[default]
    Standard,
    /// Six fields, with a leading seconds field.
    WithSeconds,
}

/// Pick the field-count convention for an expression whose format was left
/// unspecified.
///
/// Returns [`CronFormat::WithSeconds`] iff the text splits into exactly six
/// whitespace-separated tokens. This is a best-effort heuristic, not a grammar
/// check — anything that is certainly not six fields is treated as standard,
/// and genuinely malformed text is rejected by schedule parsing instead.
pub fn resolve_format(expression: &str) -> CronFormat {
    if expression.split_whitespace().count() == 6 {
        CronFormat::WithSeconds
    } else {
        CronFormat::Standard
    }
}

/// Rewrite `expression` into the six-field form the schedule parser expects.
///
/// The underlying evaluator always wants a seconds field, so the five-field
/// standard form gains a literal `0` seconds field up front.
pub(crate) fn normalize(expression: &str, format: CronFormat) -> Cow<'_, str> {
    match format {
        CronFormat::Standard => Cow::Owned(format!("0 {}", expression.trim())),
        CronFormat::WithSeconds => Cow::Borrowed(expression),
    }
}
