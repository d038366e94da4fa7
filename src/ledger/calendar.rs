//! Calendar arithmetic for month-anchored billing dates.
//!
//! Every helper here is pure. Months are 1-based and must lie in `1..=12`;
//! anything else is a caller bug and panics. Dates past the range chrono can
//! represent come back as `None`.

use chrono::{Datelike, NaiveDate};

/// Returns `day`, or the last valid day of `year`/`month` when `day` runs past it.
///
/// ```
/// use sponsor_ledger::ledger::calendar::clamp_day;
///
/// assert_eq!(clamp_day(2021, 4, 31), 30);
/// assert_eq!(clamp_day(2024, 2, 31), 29);
/// assert_eq!(clamp_day(2023, 2, 31), 28);
/// assert_eq!(clamp_day(2023, 1, 12), 12);
/// ```
pub fn clamp_day(year: i32, month: u32, day: u32) -> u32 {
    day.clamp(1, days_in_month(year, month))
}

/// Returns the `(year, month)` pair following the given one.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    assert!((1..=12).contains(&month), "month out of range: {month}");
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Advances `n` whole months from `date`'s month and lands on `day_of_month`,
/// clamped to the length of the target month. `None` once the target month
/// lies beyond [`NaiveDate::MAX`].
pub fn add_months(date: NaiveDate, day_of_month: u32, n: u32) -> Option<NaiveDate> {
    let index = month_index(date) + i64::from(n);
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, clamp_day(year, month, day_of_month))
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    assert!((1..=12).contains(&month), "month out of range: {month}");
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Iterates the dates on `day_of_month` (clamped) in each month after `after`'s,
/// starting with `after`'s own month, that fall strictly after `after` and
/// strictly before `until`. Stops early at the end of the representable range.
pub fn monthly_dates_between(
    after: NaiveDate,
    day_of_month: u32,
    until: NaiveDate,
) -> impl Iterator<Item = NaiveDate> {
    (0u32..)
        .map_while(move |offset| add_months(after, day_of_month, offset))
        .skip_while(move |date| *date <= after)
        .take_while(move |date| *date < until)
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn next_month_rolls_the_year() {
        assert_eq!(next_month(2020, 12), (2021, 1));
        assert_eq!(next_month(2020, 6), (2020, 7));
    }

    #[test]
    fn add_months_clamps_then_reverts() {
        let start = date(2021, 1, 31);
        assert_eq!(add_months(start, 31, 0), Some(date(2021, 1, 31)));
        assert_eq!(add_months(start, 31, 1), Some(date(2021, 2, 28)));
        assert_eq!(add_months(start, 31, 2), Some(date(2021, 3, 31)));
        assert_eq!(add_months(start, 31, 3), Some(date(2021, 4, 30)));
        assert_eq!(add_months(start, 31, 13), Some(date(2022, 2, 28)));
    }

    #[test]
    fn add_months_substitutes_the_requested_day() {
        assert_eq!(add_months(date(2020, 2, 1), 5, 0), Some(date(2020, 2, 5)));
        assert_eq!(add_months(date(2020, 11, 20), 3, 2), Some(date(2021, 1, 3)));
    }

    #[test]
    fn add_months_past_the_last_date_is_none() {
        let last_year = NaiveDate::MAX.year();
        let october = date(last_year, 10, 1);
        assert_eq!(add_months(october, 31, 2), Some(date(last_year, 12, 31)));
        assert_eq!(add_months(october, 1, 3), None);

        let dates: Vec<_> = monthly_dates_between(october, 1, NaiveDate::MAX).collect();
        assert_eq!(dates, vec![date(last_year, 11, 1), date(last_year, 12, 1)]);
    }

    #[test]
    fn leap_february_has_twenty_nine_days() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2023, 12), 31);
    }

    #[test]
    fn monthly_dates_are_strictly_inside_the_window() {
        let dates: Vec<_> =
            monthly_dates_between(date(2020, 2, 1), 5, date(2020, 4, 5)).collect();
        assert_eq!(dates, vec![date(2020, 2, 5), date(2020, 3, 5)]);

        let same_day: Vec<_> =
            monthly_dates_between(date(2020, 1, 5), 5, date(2020, 3, 6)).collect();
        assert_eq!(same_day, vec![date(2020, 2, 5), date(2020, 3, 5)]);
    }

    #[test]
    fn monthly_dates_empty_when_window_closes_first() {
        let mut dates = monthly_dates_between(date(2020, 1, 5), 5, date(2020, 2, 5));
        assert!(dates.next().is_none());
    }

    #[test]
    #[should_panic]
    fn month_thirteen_is_rejected() {
        next_month(2020, 13);
    }
}
