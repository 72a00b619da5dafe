//! Calendar arithmetic on plain dates.
//!
//! Every function here is pure and total over valid `NaiveDate`s. Differences use
//! calendar field arithmetic, not elapsed time: Jan 31 → Feb 1 is one month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::rule::WeekDay;

/// Unit for [`calendar_unit_difference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarUnit {
    Day,
    /// Sunday-started calendar weeks.
    Week,
    Month,
    Year,
}

/// Number of days in `month` of `year`, or `None` if the month is not 1-12
/// (or the year is outside chrono's range).
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next_first {
        Some(next) => Some((next - first).num_days() as u32),
        // December of chrono's last representable year.
        None => Some(31),
    }
}

/// The final calendar day of `date`'s month.
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let last = days_in_month(date.year(), date.month()).unwrap_or(date.day());
    date.with_day(last).unwrap_or(date)
}

/// True iff `date` is the last day of its month (Feb 29 in leap years, Feb 28 otherwise).
pub fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt()
        .is_none_or(|next| next.month() != date.month())
}

/// Sunday = 0 … Saturday = 6.
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// If `date` falls on `target`, which occurrence of that weekday it is within the
/// month: `ceil(day / 7)`.
///
/// The ordinal is not clamped, so the fifth Monday of a month yields `Some(5)`.
/// Returns `None` when the weekday differs.
pub fn nth_weekday_occurrence_in_month(date: NaiveDate, target: WeekDay) -> Option<u32> {
    if WeekDay::of(date) != target {
        return None;
    }
    Some(date.day().div_ceil(7))
}

/// Signed number of whole `unit`s from `anchor` to `date`.
///
/// Never negative when `date >= anchor`.
pub fn calendar_unit_difference(date: NaiveDate, anchor: NaiveDate, unit: CalendarUnit) -> i64 {
    match unit {
        CalendarUnit::Day => (date - anchor).num_days(),
        CalendarUnit::Week => {
            // Shift both dates back to the Sunday that starts their week.
            let days = (date - anchor).num_days();
            let shift = i64::from(weekday_index(anchor)) - i64::from(weekday_index(date));
            (days + shift) / 7
        }
        CalendarUnit::Month => month_ordinal(date) - month_ordinal(anchor),
        CalendarUnit::Year => i64::from(date.year()) - i64::from(anchor.year()),
    }
}

fn month_ordinal(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}
