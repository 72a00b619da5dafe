//! Lazy, bounded sequences of occurrence dates.
//!
//! A calendar view asks "which days of this month are occurrences". Rather than
//! each caller looping over dates, [`Occurrences`] walks a closed date window one
//! day at a time and yields the matches in ascending order.

use std::iter::FusedIterator;

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::days_in_month;
use crate::error::{RecurrenceError, Result};
use crate::rule::RecurrenceSpec;

/// Iterator over the occurrences of a [`RecurrenceSpec`] inside a date window.
///
/// Cloning yields an independent iterator from the current position, so a fresh
/// clone taken before iteration restarts the sequence.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    spec: &'a RecurrenceSpec,
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl<'a> Occurrences<'a> {
    fn new(spec: &'a RecurrenceSpec, start: NaiveDate, end: NaiveDate) -> Self {
        // Clip the window to [anchor, range_end]; nothing outside can match.
        let first = spec.anchor.map_or(start, |anchor| start.max(anchor));
        let last = spec.range_end.map_or(end, |range_end| end.min(range_end));
        let next =
            (spec.anchor.is_some() && !spec.kind.is_none() && first <= last).then_some(first);
        debug!(%first, %last, empty = next.is_none(), "occurrence window");
        Self { spec, next, last }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while let Some(date) = self.next {
            self.next = date.succ_opt().filter(|next| *next <= self.last);
            if self.spec.is_occurrence(date) {
                return Some(date);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(date) => (0, usize::try_from((self.last - date).num_days() + 1).ok()),
            None => (0, Some(0)),
        }
    }
}

impl FusedIterator for Occurrences<'_> {}

impl RecurrenceSpec {
    /// Occurrences between `start` and `end`, both inclusive.
    pub fn occurrences_between(&self, start: NaiveDate, end: NaiveDate) -> Occurrences<'_> {
        Occurrences::new(self, start, end)
    }

    /// Occurrences within one calendar month.
    ///
    /// # Errors
    /// Returns `RecurrenceError::InvalidMonth` if `month` is not 1-12.
    pub fn occurrences_in_month(&self, year: i32, month: u32) -> Result<Occurrences<'_>> {
        let invalid = || RecurrenceError::InvalidMonth { year, month };
        let days = days_in_month(year, month).ok_or_else(invalid)?;
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let last = NaiveDate::from_ymd_opt(year, month, days).ok_or_else(invalid)?;
        Ok(Occurrences::new(self, first, last))
    }

    /// Whether any day in `[start, end]` is an occurrence.
    pub fn has_occurrence_between(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.occurrences_between(start, end).next().is_some()
    }
}
