//! # recurrence-engine
//!
//! Anchor-relative recurrence matching for calendar reminders.
//!
//! Given an anchor date, an optional range end, and a recurrence pattern, the
//! engine decides whether a calendar date is an occurrence. It handles the
//! calendar edge cases a date picker gets wrong: monthly reminders anchored on
//! the 29th-31st, February 29 anniversaries, "2nd Wednesday of the month", and
//! custom "every N days/weeks/months/years" patterns.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use recurrence_engine::{RecurrenceKind, RecurrenceSpec};
//!
//! let jan_31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
//! let spec = RecurrenceSpec::new(jan_31, RecurrenceKind::Monthly);
//!
//! // A 31st-anchored monthly reminder fires on the last day of every month.
//! assert!(spec.is_occurrence(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
//! assert!(spec.is_occurrence(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()));
//! assert!(!spec.is_occurrence(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
//! ```
//!
//! ## Modules
//!
//! - [`evaluator`] — (candidate, anchor, range end, kind) → is it an occurrence
//! - [`calendar`] — month-end, weekday index, nth weekday, calendar-unit differences
//! - [`rule`] — `RecurrenceSpec` and the recurrence kinds
//! - [`occurrences`] — lazy iteration over the occurrences in a date window
//! - [`export`] — RFC 5545 RRULE rendering
//! - [`error`] — Error types

pub mod calendar;
pub mod error;
pub mod evaluator;
pub mod export;
pub mod occurrences;
pub mod rule;

pub use calendar::{
    calendar_unit_difference, is_last_day_of_month, nth_weekday_occurrence_in_month,
    weekday_index, CalendarUnit,
};
pub use error::RecurrenceError;
pub use evaluator::is_occurrence;
pub use occurrences::Occurrences;
pub use rule::{
    CustomRecurrence, CustomUnit, MonthDayRule, RecurrenceKind, RecurrenceSpec, WeekDay,
};
