//! Calendar arithmetic for tick generation.
//!
//! Adding years or months keeps the day of month when the target month has
//! it and clamps to the month's last day otherwise, so January 31 plus one
//! month is the end of February. Results saturate at the limits of
//! `NaiveDateTime`; no operation fails.

use chrono::{Months, NaiveDateTime, TimeDelta};

/// Days in each month for non-leap years
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const MILLIS_PER_SECOND: i64 = 1000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Returns true if the given year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Returns the number of days in a given month/year
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[(month.clamp(1, 12) - 1) as usize]
    }
}

/// The earliest representable instant.
pub fn min_datetime() -> NaiveDateTime {
    NaiveDateTime::MIN
}

/// The latest representable instant.
pub fn max_datetime() -> NaiveDateTime {
    NaiveDateTime::MAX
}

pub fn add_years(date: NaiveDateTime, years: i64) -> NaiveDateTime {
    add_months(date, years.saturating_mul(12))
}

pub fn add_months(date: NaiveDateTime, months: i64) -> NaiveDateTime {
    let shifted = u32::try_from(months.unsigned_abs())
        .ok()
        .map(Months::new)
        .and_then(|step| {
            if months < 0 {
                date.checked_sub_months(step)
            } else {
                date.checked_add_months(step)
            }
        });
    match shifted {
        Some(shifted) => shifted,
        None if months < 0 => min_datetime(),
        None => max_datetime(),
    }
}

pub fn add_weeks(date: NaiveDateTime, weeks: i64) -> NaiveDateTime {
    add_days(date, weeks.saturating_mul(7))
}

pub fn add_days(date: NaiveDateTime, days: i64) -> NaiveDateTime {
    add_millis_scaled(date, days, MILLIS_PER_DAY)
}

pub fn add_hours(date: NaiveDateTime, hours: i64) -> NaiveDateTime {
    add_millis_scaled(date, hours, MILLIS_PER_HOUR)
}

pub fn add_minutes(date: NaiveDateTime, minutes: i64) -> NaiveDateTime {
    add_millis_scaled(date, minutes, MILLIS_PER_MINUTE)
}

pub fn add_seconds(date: NaiveDateTime, seconds: i64) -> NaiveDateTime {
    add_millis_scaled(date, seconds, MILLIS_PER_SECOND)
}

pub fn add_milliseconds(date: NaiveDateTime, millis: i64) -> NaiveDateTime {
    add_millis_scaled(date, millis, 1)
}

fn add_millis_scaled(date: NaiveDateTime, amount: i64, scale: i64) -> NaiveDateTime {
    let shifted = amount
        .checked_mul(scale)
        .and_then(TimeDelta::try_milliseconds)
        .and_then(|delta| date.checked_add_signed(delta));
    match shifted {
        Some(shifted) => shifted,
        None if amount < 0 => min_datetime(),
        None => max_datetime(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2023, 4), 30);
    }

    #[test]
    fn test_add_months_negative_crosses_year() {
        assert_eq!(add_months(date(2020, 3, 31), -13), date(2019, 2, 28));
        assert_eq!(add_months(date(2020, 1, 15), -1), date(2019, 12, 15));
    }

    #[test]
    fn test_saturates_at_representable_range() {
        assert_eq!(add_years(date(9999, 6, 1), 1), date(10000, 6, 1));
        assert_eq!(add_days(date(1, 1, 2), -5), date(0, 12, 28));
        assert_eq!(add_milliseconds(date(2020, 1, 1), i64::MAX), max_datetime());
        assert_eq!(add_months(date(2020, 1, 1), i64::MIN), min_datetime());
        assert_eq!(add_years(max_datetime(), 1), max_datetime());
    }
}
