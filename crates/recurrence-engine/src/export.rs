//! RRULE export -- renders a recurrence as an RFC 5545 rule with the same dates.
//!
//! Month-end handling maps onto RRULE features: a 31st anchor becomes
//! `BYMONTHDAY=-1`, and a 29th/30th anchor becomes `BYMONTHDAY=d,-1;BYSETPOS=1`
//! (the day itself where it exists, else the month's last day, which only
//! happens in February). Custom weeks are counted from Sunday, hence `WKST=SU`.

use chrono::{Datelike, NaiveDate};
use rrule::RRuleSet;
use tracing::debug;

use crate::calendar::is_last_day_of_month;
use crate::error::{RecurrenceError, Result};
use crate::rule::{CustomUnit, MonthDayRule, RecurrenceKind, RecurrenceSpec, WeekDay};

impl RecurrenceSpec {
    /// Render the `RRULE` value (without the `RRULE:` prefix), e.g.
    /// `FREQ=MONTHLY;BYMONTHDAY=-1`. A range end becomes `UNTIL`.
    ///
    /// # Errors
    /// Returns `RecurrenceError::MissingAnchor` without an anchor, and
    /// `RecurrenceError::NotExportable` for `None` recurrences or custom
    /// recurrences that would never match.
    pub fn to_rrule(&self) -> Result<String> {
        let anchor = self.anchor.ok_or(RecurrenceError::MissingAnchor)?;
        let mut parts = rule_parts(anchor, &self.kind)?;
        if let Some(range_end) = self.range_end {
            parts.push(format!("UNTIL={}T000000Z", ical_date(range_end)));
        }
        let rule = parts.join(";");
        debug!(%rule, "exported recurrence");
        Ok(rule)
    }

    /// Render a full iCalendar block: `DTSTART` at the anchor's midnight (UTC)
    /// followed by the `RRULE` line.
    pub fn to_ical(&self) -> Result<String> {
        let rule = self.to_rrule()?;
        let anchor = self.anchor.ok_or(RecurrenceError::MissingAnchor)?;
        Ok(format!(
            "DTSTART;TZID=UTC:{}T000000\nRRULE:{}",
            ical_date(anchor),
            rule
        ))
    }

    /// Parse the exported block into an `rrule::RRuleSet` for expansion by RFC 5545
    /// tooling.
    pub fn to_rrule_set(&self) -> Result<RRuleSet> {
        self.to_ical()?
            .parse()
            .map_err(|e| RecurrenceError::InvalidRule(format!("{}", e)))
    }
}

fn rule_parts(anchor: NaiveDate, kind: &RecurrenceKind) -> Result<Vec<String>> {
    let parts = match kind {
        RecurrenceKind::None => {
            return Err(RecurrenceError::NotExportable(
                "recurrence type is none".to_string(),
            ))
        }
        RecurrenceKind::Daily => vec!["FREQ=DAILY".to_string()],
        RecurrenceKind::Weekly => vec![
            "FREQ=WEEKLY".to_string(),
            format!("BYDAY={}", byday_code(WeekDay::of(anchor))),
        ],
        RecurrenceKind::Monthly => {
            let mut parts = vec!["FREQ=MONTHLY".to_string()];
            parts.extend(month_day_parts(anchor.day()));
            parts
        }
        RecurrenceKind::Yearly => {
            let mut parts = vec!["FREQ=YEARLY".to_string()];
            parts.extend(anniversary_parts(anchor));
            parts
        }
        RecurrenceKind::Custom(custom) => {
            custom
                .validate()
                .map_err(|e| RecurrenceError::NotExportable(e.to_string()))?;
            let freq = match custom.unit {
                CustomUnit::Day => "DAILY",
                CustomUnit::Week { .. } => "WEEKLY",
                CustomUnit::Month { .. } => "MONTHLY",
                CustomUnit::Year => "YEARLY",
            };
            let mut parts = vec![format!("FREQ={}", freq)];
            if custom.frequency > 1 {
                parts.push(format!("INTERVAL={}", custom.frequency));
            }
            match &custom.unit {
                CustomUnit::Day => {}
                CustomUnit::Week { week_days } => {
                    parts.push("WKST=SU".to_string());
                    let days: Vec<&str> = week_days.iter().map(|d| byday_code(*d)).collect();
                    parts.push(format!("BYDAY={}", days.join(",")));
                }
                CustomUnit::Month {
                    on: MonthDayRule::OnDayOfMonth(day),
                } => parts.extend(month_day_parts(*day)),
                CustomUnit::Month {
                    on:
                        MonthDayRule::OnNthWeekday {
                            weekday,
                            occurrence,
                        },
                } => parts.push(format!("BYDAY={}{}", occurrence, byday_code(*weekday))),
                CustomUnit::Year => parts.extend(anniversary_parts(anchor)),
            }
            parts
        }
    };
    Ok(parts)
}

fn month_day_parts(day: u32) -> Vec<String> {
    match day {
        31 => vec!["BYMONTHDAY=-1".to_string()],
        29 | 30 => vec![format!("BYMONTHDAY={},-1", day), "BYSETPOS=1".to_string()],
        _ => vec![format!("BYMONTHDAY={}", day)],
    }
}

fn anniversary_parts(anchor: NaiveDate) -> Vec<String> {
    if anchor.month() == 2 && is_last_day_of_month(anchor) {
        return vec!["BYMONTH=2".to_string(), "BYMONTHDAY=-1".to_string()];
    }
    vec![
        format!("BYMONTH={}", anchor.month()),
        format!("BYMONTHDAY={}", anchor.day()),
    ]
}

fn byday_code(day: WeekDay) -> &'static str {
    match day {
        WeekDay::Sunday => "SU",
        WeekDay::Monday => "MO",
        WeekDay::Tuesday => "TU",
        WeekDay::Wednesday => "WE",
        WeekDay::Thursday => "TH",
        WeekDay::Friday => "FR",
        WeekDay::Saturday => "SA",
    }
}

fn ical_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}
