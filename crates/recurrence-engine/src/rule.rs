//! Recurrence data model.
//!
//! A [`RecurrenceSpec`] is the immutable value a calendar UI builds from its form
//! state (selected date, optional end date, recurrence choice) and hands to the
//! evaluator. Everything here is plain data: `Clone`, `Send + Sync`, serde-friendly.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::CalendarUnit;
use crate::error::{RecurrenceError, Result};

/// Day of the week, indexed from Sunday = 0.
///
/// Serialized as the lowercase English name (`"monday"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekDay {
    /// All seven days, Sunday first.
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Sunday,
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
    ];

    /// Sunday = 0 … Saturday = 6.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Inverse of [`WeekDay::index`]. Returns `None` for values above 6.
    pub fn from_index(index: u8) -> Option<WeekDay> {
        Self::ALL.get(index as usize).copied()
    }

    /// The weekday `date` falls on.
    pub fn of(date: NaiveDate) -> WeekDay {
        date.weekday().into()
    }

    /// Lowercase English name, as used on the wire.
    pub fn name(self) -> &'static str {
        match self {
            WeekDay::Sunday => "sunday",
            WeekDay::Monday => "monday",
            WeekDay::Tuesday => "tuesday",
            WeekDay::Wednesday => "wednesday",
            WeekDay::Thursday => "thursday",
            WeekDay::Friday => "friday",
            WeekDay::Saturday => "saturday",
        }
    }
}

impl From<Weekday> for WeekDay {
    fn from(day: Weekday) -> Self {
        Self::ALL[day.num_days_from_sunday() as usize]
    }
}

impl From<WeekDay> for Weekday {
    fn from(day: WeekDay) -> Self {
        match day {
            WeekDay::Sunday => Weekday::Sun,
            WeekDay::Monday => Weekday::Mon,
            WeekDay::Tuesday => Weekday::Tue,
            WeekDay::Wednesday => Weekday::Wed,
            WeekDay::Thursday => Weekday::Thu,
            WeekDay::Friday => Weekday::Fri,
            WeekDay::Saturday => Weekday::Sat,
        }
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts full names and three-letter abbreviations, case-insensitively.
impl FromStr for WeekDay {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|day| day.name() == lower || (lower.len() == 3 && day.name().starts_with(lower.as_str())))
            .ok_or_else(|| RecurrenceError::InvalidWeekDay(s.to_string()))
    }
}

/// Which day of the month a monthly custom recurrence lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonthDayRule {
    /// A fixed day number (1-31), with the same month-end handling as plain
    /// monthly recurrences: 31 means "last day", 29/30 also fire at February's end.
    #[serde(rename = "day_of_month")]
    OnDayOfMonth(u32),
    /// The `occurrence`-th (1-4) `weekday` of the month, e.g. 2nd Wednesday.
    #[serde(rename = "nth_weekday")]
    OnNthWeekday { weekday: WeekDay, occurrence: u8 },
}

/// The unit of a custom recurrence, with the unit-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "lowercase")]
pub enum CustomUnit {
    Day,
    Week {
        #[serde(default)]
        week_days: BTreeSet<WeekDay>,
    },
    Month {
        on: MonthDayRule,
    },
    Year,
}

impl CustomUnit {
    pub fn calendar_unit(&self) -> CalendarUnit {
        match self {
            CustomUnit::Day => CalendarUnit::Day,
            CustomUnit::Week { .. } => CalendarUnit::Week,
            CustomUnit::Month { .. } => CalendarUnit::Month,
            CustomUnit::Year => CalendarUnit::Year,
        }
    }
}

/// "Every `frequency` `unit`s", e.g. every 2 weeks on Monday and Wednesday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRecurrence {
    pub frequency: u32,
    #[serde(flatten)]
    pub unit: CustomUnit,
}

impl CustomRecurrence {
    pub fn every_days(frequency: u32) -> Self {
        Self {
            frequency,
            unit: CustomUnit::Day,
        }
    }

    pub fn every_weeks(frequency: u32, week_days: impl IntoIterator<Item = WeekDay>) -> Self {
        Self {
            frequency,
            unit: CustomUnit::Week {
                week_days: week_days.into_iter().collect(),
            },
        }
    }

    pub fn every_months_on_day(frequency: u32, day: u32) -> Self {
        Self {
            frequency,
            unit: CustomUnit::Month {
                on: MonthDayRule::OnDayOfMonth(day),
            },
        }
    }

    pub fn every_months_on_nth(frequency: u32, weekday: WeekDay, occurrence: u8) -> Self {
        Self {
            frequency,
            unit: CustomUnit::Month {
                on: MonthDayRule::OnNthWeekday {
                    weekday,
                    occurrence,
                },
            },
        }
    }

    pub fn every_years(frequency: u32) -> Self {
        Self {
            frequency,
            unit: CustomUnit::Year,
        }
    }

    /// Check the invariants a form should enforce before saving.
    pub fn validate(&self) -> Result<()> {
        if self.frequency == 0 {
            return Err(RecurrenceError::InvalidFrequency(self.frequency));
        }
        match &self.unit {
            CustomUnit::Week { week_days } if week_days.is_empty() => {
                Err(RecurrenceError::EmptyWeekDays)
            }
            CustomUnit::Month {
                on: MonthDayRule::OnDayOfMonth(day),
            } if !(1..=31).contains(day) => Err(RecurrenceError::InvalidMonthDay(*day)),
            CustomUnit::Month {
                on: MonthDayRule::OnNthWeekday { occurrence, .. },
            } if !(1..=4).contains(occurrence) => {
                Err(RecurrenceError::InvalidOccurrence(*occurrence))
            }
            _ => Ok(()),
        }
    }
}

/// The recurrence pattern chosen for a reminder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecurrenceKind {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Custom(CustomRecurrence),
}

impl RecurrenceKind {
    pub fn is_none(&self) -> bool {
        matches!(self, RecurrenceKind::None)
    }
}

/// A complete, immutable recurrence: anchor, optional range end, and pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecurrenceSpec {
    /// The originally selected date. `None` until the user picks one.
    pub anchor: Option<NaiveDate>,
    /// Last date (inclusive) on which the pattern may fire.
    #[serde(default)]
    pub range_end: Option<NaiveDate>,
    #[serde(default)]
    pub kind: RecurrenceKind,
}

impl RecurrenceSpec {
    pub fn new(anchor: NaiveDate, kind: RecurrenceKind) -> Self {
        Self {
            anchor: Some(anchor),
            range_end: None,
            kind,
        }
    }

    pub fn until(mut self, range_end: NaiveDate) -> Self {
        self.range_end = Some(range_end);
        self
    }

    /// Parse a spec from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Whether `date` is the anchor itself (the "selected" day in a picker).
    pub fn is_anchor(&self, date: NaiveDate) -> bool {
        self.anchor == Some(date)
    }

    /// Check the invariants the date picker enforces before a spec reaches the
    /// evaluator. The evaluator tolerates every violation, this just reports them.
    pub fn validate(&self) -> Result<()> {
        let anchor = match (self.anchor, &self.kind) {
            (None, RecurrenceKind::None) => return Ok(()),
            (None, _) => return Err(RecurrenceError::MissingAnchor),
            (Some(anchor), _) => anchor,
        };
        if let Some(range_end) = self.range_end {
            if range_end <= anchor {
                return Err(RecurrenceError::RangeEndBeforeAnchor { anchor, range_end });
            }
        }
        if let RecurrenceKind::Custom(custom) = &self.kind {
            custom.validate()?;
        }
        Ok(())
    }
}
