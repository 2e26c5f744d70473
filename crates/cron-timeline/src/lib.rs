//! # cron-timeline
//!
//! Bidirectional cron instant resolution with DST-aware timezone handling.
//!
//! Resolves cron recurrence expressions into exact points on the UTC
//! timeline, answering "what is the next/previous matching instant?" and
//! "is this instant a match?" on top of a forward-only schedule evaluator
//! (the `cron` crate). Backward search is derived via expanding-window
//! scanning; spring-forward gaps and fall-back overlaps resolve under a
//! fixed, direction-independent policy via `chrono-tz`.
//!
//! ## Modules
//!
//! - [`timeline`] — the [`Timeline`] contract and the [`CronTimeline`] engine
//! - [`format`] — 5-field vs 6-field cron convention resolution
//! - [`instants`] — named convenience constructors (daily, weekly, …)
//! - [`error`] — error types

pub mod error;
pub mod format;
pub mod instants;
pub mod timeline;

mod evaluator;
mod zone;

pub use error::{Result, TimelineError};
pub use format::{resolve_format, CronFormat};
pub use timeline::{CronTimeline, Timeline};
