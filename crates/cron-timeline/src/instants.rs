//! Named timeline constructors composed from [`CronTimeline`].
//!
//! Every constructor takes its timezone explicitly; there is no ambient
//! system-default zone. Constructors that would need general period algebra
//! (sub-second daily offsets, period filtering) are out of scope here.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use crate::error::{Result, TimelineError};
use crate::format::CronFormat;
use crate::timeline::{CronTimeline, Timeline};
use crate::zone;

/// Timeline with instants defined by cron expression `expression` in `zone`.
///
/// Supports expressions of 5 or 6 fields: second (optional), minute, hour,
/// day of month, month, day of week.
///
/// # Errors
/// Returns [`TimelineError::InvalidCron`] if the expression fails parse
/// validation.
pub fn from_cron(expression: &str, zone: Tz) -> Result<CronTimeline> {
    CronTimeline::new(expression, zone)
}

/// Timeline with instants defined by cron expression `expression` under an
/// explicit field convention in `zone`.
///
/// # Errors
/// Returns [`TimelineError::InvalidCron`] if the expression fails parse
/// validation.
pub fn from_cron_with_format(
    expression: &str,
    format: CronFormat,
    zone: Tz,
) -> Result<CronTimeline> {
    CronTimeline::with_format(expression, format, zone)
}

/// Timeline with one instant every second.
pub fn every_second(zone: Tz) -> Result<CronTimeline> {
    from_cron_with_format("* * * * * *", CronFormat::WithSeconds, zone)
}

/// Timeline with one instant every minute.
pub fn every_minute(zone: Tz) -> Result<CronTimeline> {
    from_cron("* * * * *", zone)
}

/// Timeline with an instant at the start of every hour in `zone`.
pub fn hourly(zone: Tz) -> Result<CronTimeline> {
    from_cron("0 * * * *", zone)
}

/// Timeline with an instant at the start of every day in `zone`.
pub fn daily(zone: Tz) -> Result<CronTimeline> {
    from_cron("0 0 * * *", zone)
}

/// Timeline with one instant every day at `time_of_day` in `zone`.
///
/// # Errors
/// Returns [`TimelineError::UnrepresentableTime`] if `time_of_day` carries
/// sub-second precision, which a cron field cannot express.
pub fn daily_at(time_of_day: NaiveTime, zone: Tz) -> Result<CronTimeline> {
    from_cron(&time_to_cron(time_of_day)?, zone)
}

/// Timeline with an instant at the start of every week (Monday) in `zone`.
pub fn weekly(zone: Tz) -> Result<CronTimeline> {
    start_of_days(&[Weekday::Mon], zone)
}

/// Timeline with an instant at the start of every month in `zone`.
pub fn monthly(zone: Tz) -> Result<CronTimeline> {
    from_cron("0 0 1 * *", zone)
}

/// Timeline with an instant at the start of every year in `zone`.
pub fn annually(zone: Tz) -> Result<CronTimeline> {
    from_cron("0 0 1 1 *", zone)
}

/// Timeline with an instant at the start of every day in `days_of_week`.
pub fn start_of_days(days_of_week: &[Weekday], zone: Tz) -> Result<CronTimeline> {
    let days: Vec<&str> = days_of_week.iter().copied().map(weekday_field).collect();
    from_cron(&format!("0 0 * * {}", days.join(",")), zone)
}

/// Timeline with an instant at the end of every day in `days_of_week`.
///
/// The end of a day coincides with the start of the following day.
pub fn end_of_days(days_of_week: &[Weekday], zone: Tz) -> Result<CronTimeline> {
    let next_days: Vec<Weekday> = days_of_week.iter().map(Weekday::succ).collect();
    start_of_days(&next_days, zone)
}

/// Timeline with an instant at the start of every month in `months` (1–12).
pub fn start_of_months(months: &[u32], zone: Tz) -> Result<CronTimeline> {
    let fields: Vec<String> = months.iter().map(u32::to_string).collect();
    from_cron(&format!("0 0 1 {} *", fields.join(",")), zone)
}

/// Timeline with an instant at the end of every month in `months` (1–12).
///
/// The end of a month coincides with the start of the following month;
/// December wraps to January.
pub fn end_of_months(months: &[u32], zone: Tz) -> Result<CronTimeline> {
    let next_months: Vec<u32> = months.iter().map(|m| m % 12 + 1).collect();
    start_of_months(&next_months, zone)
}

/// The UTC instant at which the day containing `date` starts in `zone`.
///
/// # Errors
/// Returns [`TimelineError::BoundaryOutOfRange`] if the boundary falls
/// outside the representable range.
pub fn start_of_day(date: NaiveDate, zone: Tz) -> Result<DateTime<Utc>> {
    previous_boundary(&daily(zone)?, date, zone, "start of day")
}

/// The UTC instant at which the day containing `date` ends in `zone`.
///
/// # Errors
/// Returns [`TimelineError::BoundaryOutOfRange`] if the boundary falls
/// outside the representable range.
pub fn end_of_day(date: NaiveDate, zone: Tz) -> Result<DateTime<Utc>> {
    next_boundary(&daily(zone)?, date, zone, "end of day")
}

/// The UTC instant at which the week (starting Monday) containing `date`
/// starts in `zone`.
///
/// # Errors
/// Returns [`TimelineError::BoundaryOutOfRange`] if the boundary falls
/// outside the representable range.
pub fn start_of_week(date: NaiveDate, zone: Tz) -> Result<DateTime<Utc>> {
    previous_boundary(&weekly(zone)?, date, zone, "start of week")
}

/// The UTC instant at which the week containing `date` ends in `zone`.
///
/// # Errors
/// Returns [`TimelineError::BoundaryOutOfRange`] if the boundary falls
/// outside the representable range.
pub fn end_of_week(date: NaiveDate, zone: Tz) -> Result<DateTime<Utc>> {
    next_boundary(&weekly(zone)?, date, zone, "end of week")
}

/// The UTC instant at which the month containing `date` starts in `zone`.
///
/// # Errors
/// Returns [`TimelineError::BoundaryOutOfRange`] if the boundary falls
/// outside the representable range.
pub fn start_of_month(date: NaiveDate, zone: Tz) -> Result<DateTime<Utc>> {
    previous_boundary(&monthly(zone)?, date, zone, "start of month")
}

/// The UTC instant at which the month containing `date` ends in `zone`.
///
/// # Errors
/// Returns [`TimelineError::BoundaryOutOfRange`] if the boundary falls
/// outside the representable range.
pub fn end_of_month(date: NaiveDate, zone: Tz) -> Result<DateTime<Utc>> {
    next_boundary(&monthly(zone)?, date, zone, "end of month")
}

/// The UTC instant at which the year containing `date` starts in `zone`.
///
/// # Errors
/// Returns [`TimelineError::BoundaryOutOfRange`] if the boundary falls
/// outside the representable range.
pub fn start_of_year(date: NaiveDate, zone: Tz) -> Result<DateTime<Utc>> {
    previous_boundary(&annually(zone)?, date, zone, "start of year")
}

/// The UTC instant at which the year containing `date` ends in `zone`.
///
/// # Errors
/// Returns [`TimelineError::BoundaryOutOfRange`] if the boundary falls
/// outside the representable range.
pub fn end_of_year(date: NaiveDate, zone: Tz) -> Result<DateTime<Utc>> {
    next_boundary(&annually(zone)?, date, zone, "end of year")
}

/// Render a whole-second time of day as a cron expression, matching the field
/// convention [`crate::format::resolve_format`] expects: five fields when the
/// seconds component is zero, six otherwise.
fn time_to_cron(time_of_day: NaiveTime) -> Result<String> {
    if time_of_day.nanosecond() != 0 {
        return Err(TimelineError::UnrepresentableTime(time_of_day));
    }
    if time_of_day.second() != 0 {
        return Ok(format!(
            "{} {} {} * * *",
            time_of_day.second(),
            time_of_day.minute(),
            time_of_day.hour()
        ));
    }
    Ok(format!(
        "{} {} * * *",
        time_of_day.minute(),
        time_of_day.hour()
    ))
}

fn weekday_field(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
        Weekday::Sun => "SUN",
    }
}

/// Most recent instant of `timeline` at or before the start of `date`'s day.
fn previous_boundary(
    timeline: &CronTimeline,
    date: NaiveDate,
    zone: Tz,
    boundary: &'static str,
) -> Result<DateTime<Utc>> {
    let day_start = day_start_instant(date, zone, boundary)?;
    // One tick past the boundary keeps an instant exactly on it inside its
    // own period.
    timeline
        .previous_instant(day_start + Duration::nanoseconds(1))
        .ok_or(TimelineError::BoundaryOutOfRange {
            boundary,
            date,
            zone,
        })
}

/// First instant of `timeline` strictly after the start of `date`'s day.
fn next_boundary(
    timeline: &CronTimeline,
    date: NaiveDate,
    zone: Tz,
    boundary: &'static str,
) -> Result<DateTime<Utc>> {
    let day_start = day_start_instant(date, zone, boundary)?;
    timeline
        .next_instant(day_start)
        .ok_or(TimelineError::BoundaryOutOfRange {
            boundary,
            date,
            zone,
        })
}

fn day_start_instant(date: NaiveDate, zone: Tz, boundary: &'static str) -> Result<DateTime<Utc>> {
    zone::wall_to_utc(date.and_time(NaiveTime::MIN), zone).ok_or(
        TimelineError::BoundaryOutOfRange {
            boundary,
            date,
            zone,
        },
    )
}
