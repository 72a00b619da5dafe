//! Error types for recurrence-engine operations.
//!
//! The evaluator itself never fails. These errors come from the fallible edges
//! around it: caller-side validation, parsing, and RRULE export.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecurrenceError {
    #[error("Invalid frequency: {0} (must be at least 1)")]
    InvalidFrequency(u32),

    #[error("Invalid day of month: {0} (must be 1-31)")]
    InvalidMonthDay(u32),

    #[error("Invalid weekday occurrence: {0} (must be 1-4)")]
    InvalidOccurrence(u8),

    #[error("Weekly custom recurrence has no weekdays selected")]
    EmptyWeekDays,

    #[error("Recurrence has no anchor date")]
    MissingAnchor,

    #[error("Range end {range_end} must come after anchor {anchor}")]
    RangeEndBeforeAnchor {
        anchor: NaiveDate,
        range_end: NaiveDate,
    },

    #[error("Invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Invalid weekday name: {0}")]
    InvalidWeekDay(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Recurrence cannot be expressed as an RRULE: {0}")]
    NotExportable(String),

    #[error("Invalid RRULE: {0}")]
    InvalidRule(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RecurrenceError>;
