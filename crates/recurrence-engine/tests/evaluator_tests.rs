//! Tests for the recurrence evaluator: guard clauses and every recurrence kind.

use chrono::NaiveDate;
use recurrence_engine::{is_occurrence, CustomRecurrence, RecurrenceKind, RecurrenceSpec, WeekDay};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid test date")
}

fn custom(c: CustomRecurrence) -> RecurrenceKind {
    RecurrenceKind::Custom(c)
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

#[test]
fn no_anchor_never_matches() {
    assert!(!is_occurrence(d(2024, 1, 1), None, None, &RecurrenceKind::Daily));

    let spec = RecurrenceSpec {
        anchor: None,
        range_end: None,
        kind: RecurrenceKind::Daily,
    };
    assert!(!spec.is_occurrence(d(2024, 1, 1)));
}

#[test]
fn dates_before_anchor_never_match() {
    let spec = RecurrenceSpec::new(d(2024, 1, 10), RecurrenceKind::Daily);
    assert!(!spec.is_occurrence(d(2024, 1, 9)));
    assert!(!spec.is_occurrence(d(2023, 1, 10)));
    assert!(spec.is_occurrence(d(2024, 1, 10)));
}

#[test]
fn range_end_is_inclusive() {
    let spec = RecurrenceSpec::new(d(2024, 1, 1), RecurrenceKind::Daily).until(d(2024, 1, 10));
    assert!(spec.is_occurrence(d(2024, 1, 10)));
    assert!(!spec.is_occurrence(d(2024, 1, 11)));
}

#[test]
fn range_end_before_anchor_matches_nothing() {
    // Not validated by the evaluator; every candidate is simply out of range.
    let spec = RecurrenceSpec::new(d(2024, 1, 10), RecurrenceKind::Daily).until(d(2024, 1, 5));
    assert!(!spec.is_occurrence(d(2024, 1, 10)));
    assert!(!spec.is_occurrence(d(2024, 1, 4)));
}

#[test]
fn kind_none_never_matches_even_on_anchor() {
    let spec = RecurrenceSpec::new(d(2024, 1, 1), RecurrenceKind::None);
    assert!(!spec.is_occurrence(d(2024, 1, 1)));
    assert!(spec.is_anchor(d(2024, 1, 1)));
}

// ---------------------------------------------------------------------------
// Daily / Weekly
// ---------------------------------------------------------------------------

#[test]
fn daily_matches_every_day_from_anchor() {
    let spec = RecurrenceSpec::new(d(2024, 2, 27), RecurrenceKind::Daily);
    for day in [d(2024, 2, 27), d(2024, 2, 28), d(2024, 2, 29), d(2024, 3, 1), d(2031, 7, 4)] {
        assert!(spec.is_occurrence(day), "{} should match", day);
    }
}

#[test]
fn weekly_matches_same_weekday() {
    // 2024-01-03 is a Wednesday.
    let spec = RecurrenceSpec::new(d(2024, 1, 3), RecurrenceKind::Weekly);
    assert!(spec.is_occurrence(d(2024, 1, 10)));
    assert!(spec.is_occurrence(d(2024, 1, 24)));
    assert!(spec.is_occurrence(d(2025, 1, 1)));
    assert!(!spec.is_occurrence(d(2024, 1, 4)));
    assert!(!spec.is_occurrence(d(2024, 1, 9)));
}

// ---------------------------------------------------------------------------
// Monthly
// ---------------------------------------------------------------------------

#[test]
fn monthly_31st_anchor_fires_on_every_month_end() {
    let spec = RecurrenceSpec::new(d(2024, 1, 31), RecurrenceKind::Monthly);
    assert!(spec.is_occurrence(d(2024, 2, 29)), "leap February end");
    assert!(spec.is_occurrence(d(2024, 4, 30)), "April end");
    assert!(spec.is_occurrence(d(2024, 5, 31)));
    assert!(spec.is_occurrence(d(2025, 2, 28)), "non-leap February end");
    assert!(!spec.is_occurrence(d(2024, 3, 15)));
    assert!(!spec.is_occurrence(d(2024, 4, 29)));
}

#[test]
fn monthly_30th_anchor_falls_back_to_february_end() {
    let spec = RecurrenceSpec::new(d(2024, 1, 30), RecurrenceKind::Monthly);
    assert!(spec.is_occurrence(d(2025, 2, 28)));
    assert!(spec.is_occurrence(d(2024, 2, 29)));
    assert!(spec.is_occurrence(d(2024, 3, 30)));
    assert!(!spec.is_occurrence(d(2024, 3, 29)));
    assert!(!spec.is_occurrence(d(2024, 3, 31)), "31st is not the 30th");
}

#[test]
fn monthly_29th_anchor_in_non_leap_february() {
    let spec = RecurrenceSpec::new(d(2023, 1, 29), RecurrenceKind::Monthly);
    assert!(spec.is_occurrence(d(2023, 2, 28)));
    assert!(spec.is_occurrence(d(2023, 3, 29)));
    assert!(!spec.is_occurrence(d(2023, 3, 28)));
    // In a leap year February has its own 29th.
    assert!(spec.is_occurrence(d(2024, 2, 29)));
    assert!(!spec.is_occurrence(d(2024, 2, 28)));
}

#[test]
fn monthly_plain_day_matches_day_number_only() {
    let spec = RecurrenceSpec::new(d(2024, 1, 15), RecurrenceKind::Monthly);
    assert!(spec.is_occurrence(d(2024, 2, 15)));
    assert!(spec.is_occurrence(d(2030, 12, 15)));
    assert!(!spec.is_occurrence(d(2024, 2, 29)));
    assert!(!spec.is_occurrence(d(2024, 2, 14)));
}

// ---------------------------------------------------------------------------
// Yearly
// ---------------------------------------------------------------------------

#[test]
fn yearly_feb_29_anchor_fires_on_february_end() {
    let spec = RecurrenceSpec::new(d(2020, 2, 29), RecurrenceKind::Yearly);
    assert!(spec.is_occurrence(d(2021, 2, 28)));
    assert!(spec.is_occurrence(d(2024, 2, 29)));
    assert!(!spec.is_occurrence(d(2021, 2, 27)));
    assert!(!spec.is_occurrence(d(2024, 2, 28)), "leap year end is the 29th");
}

#[test]
fn yearly_feb_28_in_non_leap_year_is_also_month_end() {
    let spec = RecurrenceSpec::new(d(2023, 2, 28), RecurrenceKind::Yearly);
    assert!(spec.is_occurrence(d(2024, 2, 29)));
    assert!(!spec.is_occurrence(d(2024, 2, 28)));
}

#[test]
fn yearly_feb_28_in_leap_year_is_plain_anniversary() {
    let spec = RecurrenceSpec::new(d(2024, 2, 28), RecurrenceKind::Yearly);
    assert!(spec.is_occurrence(d(2025, 2, 28)));
    assert!(!spec.is_occurrence(d(2028, 2, 29)));
}

#[test]
fn yearly_matches_month_and_day() {
    let spec = RecurrenceSpec::new(d(2024, 7, 4), RecurrenceKind::Yearly);
    assert!(spec.is_occurrence(d(2025, 7, 4)));
    assert!(!spec.is_occurrence(d(2025, 7, 5)));
    assert!(!spec.is_occurrence(d(2025, 8, 4)));
}

// ---------------------------------------------------------------------------
// Custom
// ---------------------------------------------------------------------------

#[test]
fn custom_every_three_days() {
    let spec = RecurrenceSpec::new(d(2024, 1, 1), custom(CustomRecurrence::every_days(3)));
    assert!(spec.is_occurrence(d(2024, 1, 1)));
    assert!(spec.is_occurrence(d(2024, 1, 4)));
    assert!(spec.is_occurrence(d(2024, 3, 1)), "60 days later");
    assert!(!spec.is_occurrence(d(2024, 1, 5)));
}

#[test]
fn custom_biweekly_monday_and_wednesday() {
    // 2024-01-01 is a Monday.
    let spec = RecurrenceSpec::new(
        d(2024, 1, 1),
        custom(CustomRecurrence::every_weeks(
            2,
            [WeekDay::Monday, WeekDay::Wednesday],
        )),
    );
    assert!(spec.is_occurrence(d(2024, 1, 15)));
    assert!(spec.is_occurrence(d(2024, 1, 17)));
    assert!(!spec.is_occurrence(d(2024, 1, 8)), "odd week is skipped");
    assert!(!spec.is_occurrence(d(2024, 1, 16)), "Tuesday is not selected");
}

#[test]
fn custom_week_counts_sunday_started_weeks() {
    // Anchor Saturday 2024-01-06; the next day starts a new calendar week.
    let spec = RecurrenceSpec::new(
        d(2024, 1, 6),
        custom(CustomRecurrence::every_weeks(2, [WeekDay::Sunday])),
    );
    assert!(!spec.is_occurrence(d(2024, 1, 7)), "one week after anchor week");
    assert!(spec.is_occurrence(d(2024, 1, 14)), "two weeks after anchor week");
}

#[test]
fn custom_week_without_days_never_matches() {
    let spec = RecurrenceSpec::new(
        d(2024, 1, 1),
        custom(CustomRecurrence::every_weeks(1, Vec::<WeekDay>::new())),
    );
    assert!(!spec.is_occurrence(d(2024, 1, 1)));
    assert!(!spec.is_occurrence(d(2024, 1, 8)));
}

#[test]
fn custom_second_wednesday_monthly() {
    let spec = RecurrenceSpec::new(
        d(2024, 1, 1),
        custom(CustomRecurrence::every_months_on_nth(
            1,
            WeekDay::Wednesday,
            2,
        )),
    );
    assert!(spec.is_occurrence(d(2024, 1, 10)));
    assert!(spec.is_occurrence(d(2024, 2, 14)));
    assert!(!spec.is_occurrence(d(2024, 1, 17)), "3rd Wednesday");
    assert!(!spec.is_occurrence(d(2024, 1, 9)), "Tuesday");
}

#[test]
fn custom_fifth_weekday_never_matches() {
    // January 2024 has five Mondays: 1, 8, 15, 22, 29.
    let fourth = RecurrenceSpec::new(
        d(2024, 1, 1),
        custom(CustomRecurrence::every_months_on_nth(1, WeekDay::Monday, 4)),
    );
    assert!(fourth.is_occurrence(d(2024, 1, 22)));
    assert!(!fourth.is_occurrence(d(2024, 1, 29)));

    let fifth = RecurrenceSpec::new(
        d(2024, 1, 1),
        custom(CustomRecurrence::every_months_on_nth(1, WeekDay::Monday, 5)),
    );
    assert!(!fifth.is_occurrence(d(2024, 1, 29)));
}

#[test]
fn custom_nth_weekday_respects_month_interval() {
    let spec = RecurrenceSpec::new(
        d(2024, 1, 1),
        custom(CustomRecurrence::every_months_on_nth(
            3,
            WeekDay::Friday,
            1,
        )),
    );
    assert!(spec.is_occurrence(d(2024, 1, 5)));
    assert!(!spec.is_occurrence(d(2024, 2, 2)));
    assert!(spec.is_occurrence(d(2024, 4, 5)));
}

#[test]
fn custom_month_day_with_interval() {
    let spec = RecurrenceSpec::new(
        d(2024, 1, 10),
        custom(CustomRecurrence::every_months_on_day(3, 15)),
    );
    assert!(spec.is_occurrence(d(2024, 1, 15)));
    assert!(!spec.is_occurrence(d(2024, 2, 15)));
    assert!(spec.is_occurrence(d(2024, 4, 15)));
    assert!(!spec.is_occurrence(d(2024, 4, 16)));
}

#[test]
fn custom_month_day_31_uses_month_end() {
    let spec = RecurrenceSpec::new(
        d(2024, 1, 31),
        custom(CustomRecurrence::every_months_on_day(2, 31)),
    );
    assert!(spec.is_occurrence(d(2024, 3, 31)));
    assert!(spec.is_occurrence(d(2024, 5, 31)));
    assert!(!spec.is_occurrence(d(2024, 2, 29)), "odd month offset");
    assert!(!spec.is_occurrence(d(2024, 4, 30)), "odd month offset");
    assert!(spec.is_occurrence(d(2024, 9, 30)), "September end, 8 months later");
}

#[test]
fn custom_month_day_out_of_range_never_matches() {
    let spec = RecurrenceSpec::new(
        d(2024, 1, 1),
        custom(CustomRecurrence::every_months_on_day(1, 32)),
    );
    assert!(!spec.is_occurrence(d(2024, 1, 31)));
    let zero = RecurrenceSpec::new(
        d(2024, 1, 1),
        custom(CustomRecurrence::every_months_on_day(1, 0)),
    );
    assert!(!zero.is_occurrence(d(2024, 1, 31)));
}

#[test]
fn custom_every_other_year() {
    let spec = RecurrenceSpec::new(d(2024, 3, 15), custom(CustomRecurrence::every_years(2)));
    assert!(spec.is_occurrence(d(2024, 3, 15)));
    assert!(!spec.is_occurrence(d(2025, 3, 15)));
    assert!(spec.is_occurrence(d(2026, 3, 15)));
    assert!(!spec.is_occurrence(d(2026, 3, 16)));
}

#[test]
fn custom_year_feb_29_anchor() {
    let spec = RecurrenceSpec::new(d(2024, 2, 29), custom(CustomRecurrence::every_years(1)));
    assert!(spec.is_occurrence(d(2025, 2, 28)));
    assert!(spec.is_occurrence(d(2028, 2, 29)));
    assert!(!spec.is_occurrence(d(2028, 2, 28)));
}

#[test]
fn custom_zero_frequency_never_matches() {
    for c in [
        CustomRecurrence::every_days(0),
        CustomRecurrence::every_weeks(0, [WeekDay::Monday]),
        CustomRecurrence::every_months_on_day(0, 1),
        CustomRecurrence::every_years(0),
    ] {
        let spec = RecurrenceSpec::new(d(2024, 1, 1), custom(c));
        assert!(!spec.is_occurrence(d(2024, 1, 1)));
    }
}

#[test]
fn evaluation_is_idempotent() {
    let spec = RecurrenceSpec::new(
        d(2024, 1, 1),
        custom(CustomRecurrence::every_weeks(2, [WeekDay::Monday])),
    );
    let first = spec.is_occurrence(d(2024, 1, 15));
    let second = spec.is_occurrence(d(2024, 1, 15));
    assert_eq!(first, second);
    assert!(first);
}
