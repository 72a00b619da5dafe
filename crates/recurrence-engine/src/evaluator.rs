//! Recurrence evaluation -- decides whether a calendar date is an occurrence.
//!
//! The evaluator is a total predicate: malformed custom recurrences (zero
//! frequency, out-of-range day or ordinal, empty weekday set) never match and
//! never fail. Use [`RecurrenceSpec::validate`] to reject them up front.

use chrono::{Datelike, NaiveDate};
use tracing::trace;

use crate::calendar::{
    calendar_unit_difference, is_last_day_of_month, nth_weekday_occurrence_in_month,
    weekday_index,
};
use crate::rule::{
    CustomRecurrence, CustomUnit, MonthDayRule, RecurrenceKind, RecurrenceSpec, WeekDay,
};

/// Decide whether `candidate` is an occurrence of `kind` anchored at `anchor`.
///
/// Returns `false` when there is no anchor, when `candidate` precedes the anchor,
/// when it falls after `range_end`, or when `kind` is [`RecurrenceKind::None`].
pub fn is_occurrence(
    candidate: NaiveDate,
    anchor: Option<NaiveDate>,
    range_end: Option<NaiveDate>,
    kind: &RecurrenceKind,
) -> bool {
    let Some(anchor) = anchor else {
        return false;
    };
    if candidate < anchor {
        return false;
    }
    if range_end.is_some_and(|end| candidate > end) {
        return false;
    }

    match kind {
        RecurrenceKind::None => false,
        RecurrenceKind::Daily => true,
        RecurrenceKind::Weekly => weekday_index(candidate) == weekday_index(anchor),
        RecurrenceKind::Monthly => matches_month_day(candidate, anchor.day()),
        RecurrenceKind::Yearly => matches_anniversary(candidate, anchor),
        RecurrenceKind::Custom(custom) => matches_custom(candidate, anchor, custom),
    }
}

impl RecurrenceSpec {
    /// Decide whether `candidate` is an occurrence of this recurrence.
    pub fn is_occurrence(&self, candidate: NaiveDate) -> bool {
        is_occurrence(candidate, self.anchor, self.range_end, &self.kind)
    }
}

/// Month-end aware day-of-month test.
///
/// Day 31 fires on the last day of every month. Days 29 and 30 fire on that day,
/// and also on the last day of February, which is too short to contain them.
fn matches_month_day(candidate: NaiveDate, day: u32) -> bool {
    match day {
        31 => is_last_day_of_month(candidate),
        29 | 30 => {
            candidate.day() == day || (candidate.month() == 2 && is_last_day_of_month(candidate))
        }
        _ => candidate.day() == day,
    }
}

/// Same month and day as the anchor. An anchor on February's last day (28th or
/// 29th) matches February's last day in every year.
fn matches_anniversary(candidate: NaiveDate, anchor: NaiveDate) -> bool {
    if anchor.month() == 2 && is_last_day_of_month(anchor) {
        return candidate.month() == 2 && is_last_day_of_month(candidate);
    }
    candidate.month() == anchor.month() && candidate.day() == anchor.day()
}

fn matches_custom(candidate: NaiveDate, anchor: NaiveDate, custom: &CustomRecurrence) -> bool {
    if custom.frequency == 0 {
        trace!("custom recurrence with zero frequency never matches");
        return false;
    }

    let on_day = match &custom.unit {
        CustomUnit::Day => true,
        CustomUnit::Week { week_days } => {
            if week_days.is_empty() {
                trace!("weekly custom recurrence without weekdays never matches");
            }
            week_days.contains(&WeekDay::of(candidate))
        }
        CustomUnit::Month { on } => matches_month_rule(candidate, on),
        CustomUnit::Year => matches_anniversary(candidate, anchor),
    };
    if !on_day {
        return false;
    }

    let elapsed = calendar_unit_difference(candidate, anchor, custom.unit.calendar_unit());
    elapsed.rem_euclid(i64::from(custom.frequency)) == 0
}

fn matches_month_rule(candidate: NaiveDate, rule: &MonthDayRule) -> bool {
    match *rule {
        MonthDayRule::OnDayOfMonth(day) => {
            if !(1..=31).contains(&day) {
                trace!(day, "day of month out of range never matches");
                return false;
            }
            matches_month_day(candidate, day)
        }
        MonthDayRule::OnNthWeekday {
            weekday,
            occurrence,
        } => {
            // A fifth occurrence is never a hit, even if requested explicitly.
            if !(1..=4).contains(&occurrence) {
                trace!(occurrence, "weekday occurrence out of range never matches");
                return false;
            }
            nth_weekday_occurrence_in_month(candidate, weekday) == Some(u32::from(occurrence))
        }
    }
}
