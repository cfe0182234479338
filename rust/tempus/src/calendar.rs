//! Proleptic Gregorian day arithmetic.
//!
//! Dates are counted as days since 0001-01-01, which is day 0. Conversions use
//! 400-year era arithmetic with years starting on March 1, so the leap day
//! falls at the end of the shifted year and every conversion is O(1).

use crate::{
    DAYS_PER_400_YEARS, MAX_YEAR, MIN_YEAR, error::Error, result::Result, weekday::Weekday,
};

/// Cumulative day counts at the start of each month, for common years.
const DAYS_TO_MONTH_365: [u32; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];
/// Cumulative day counts at the start of each month, for leap years.
const DAYS_TO_MONTH_366: [u32; 13] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

/// Offset of 0001-01-01 from 0000-03-01, the origin of the shifted calendar.
const SHIFTED_EPOCH_OFFSET: i64 = 306;

/// Day count of 1970-01-01.
pub const UNIX_EPOCH_DAYS: i32 = 719_162;

/// Day count of the earliest representable date.
pub const MIN_DAYS: i32 = shifted_days(MIN_YEAR as i64, 1, 1) as i32;
/// Day count of the latest representable date.
pub const MAX_DAYS: i32 = shifted_days(MAX_YEAR as i64, 12, 31) as i32;

pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub const fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Number of days in `month` (1-12) of `year`; returns 0 for an invalid month.
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    if month < 1 || month > 12 {
        return 0;
    }
    let table = if is_leap_year(year) {
        &DAYS_TO_MONTH_366
    } else {
        &DAYS_TO_MONTH_365
    };
    table[month as usize] - table[month as usize - 1]
}

pub fn is_valid_date(year: i32, month: u32, day: u32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year) && day >= 1 && day <= days_in_month(year, month)
}

/// Converts a calendar date to its day count.
///
/// # Errors
///
/// `InvalidDate` when the month or day is not valid for the year, or the year
/// is outside `[MIN_YEAR, MAX_YEAR]`.
///
/// # Examples
///
/// ```
/// # use tempus::calendar::{date_to_days, UNIX_EPOCH_DAYS};
/// assert_eq!(date_to_days(1, 1, 1).unwrap(), 0);
/// assert_eq!(date_to_days(1970, 1, 1).unwrap(), UNIX_EPOCH_DAYS);
/// assert!(date_to_days(2023, 2, 29).is_err());
/// ```
pub fn date_to_days(year: i32, month: u32, day: u32) -> Result<i32> {
    if !is_valid_date(year, month, day) {
        return Err(Error::invalid_date(format!(
            "{year:04}-{month:02}-{day:02} is not a valid calendar date"
        )));
    }
    Ok(shifted_days(year as i64, month as i64, day as i64) as i32)
}

const fn shifted_days(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let year_of_era = y.rem_euclid(400);
    let shifted_month = if month > 2 { month - 3 } else { month + 9 };
    let day_of_year = (153 * shifted_month + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_PER_400_YEARS + day_of_era - SHIFTED_EPOCH_OFFSET
}

/// Converts a day count back to `(year, month, day)`.
///
/// Total for every day count in `[MIN_DAYS, MAX_DAYS]`.
pub fn days_to_date(days: i32) -> (i32, u32, u32) {
    let z = days as i64 + SHIFTED_EPOCH_OFFSET;
    let era = z.div_euclid(DAYS_PER_400_YEARS);
    let day_of_era = z.rem_euclid(DAYS_PER_400_YEARS);
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400 + if month <= 2 { 1 } else { 0 };
    (year as i32, month as u32, day as u32)
}

/// Day of the year (1-366).
///
/// # Errors
///
/// `InvalidDate` when the month or day is not valid for the year.
pub fn ordinal(year: i32, month: u32, day: u32) -> Result<u32> {
    if day < 1 || day > days_in_month(year, month) {
        return Err(Error::invalid_date(format!(
            "month {month}, day {day} does not exist in {year}"
        )));
    }
    Ok(day_of_year(year, month, day))
}

/// Callers guarantee `month` is in 1-12.
pub(crate) fn day_of_year(year: i32, month: u32, day: u32) -> u32 {
    let table = if is_leap_year(year) {
        &DAYS_TO_MONTH_366
    } else {
        &DAYS_TO_MONTH_365
    };
    table[month as usize - 1] + day
}

/// Converts an ordinal date to `(month, day)`.
pub fn ordinal_to_month_day(year: i32, ordinal: u32) -> Option<(u32, u32)> {
    if ordinal < 1 || ordinal > days_in_year(year) {
        return None;
    }
    let table = if is_leap_year(year) {
        &DAYS_TO_MONTH_366
    } else {
        &DAYS_TO_MONTH_365
    };
    // The estimate is at most one month behind.
    let mut month = (ordinal + 30) / 31;
    if month < 12 && ordinal > table[month as usize] {
        month += 1;
    }
    Some((month, ordinal - table[month as usize - 1]))
}

/// Converts an ordinal date to its day count.
pub fn from_ordinal(year: i32, ordinal: u32) -> Result<i32> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) || ordinal < 1 || ordinal > days_in_year(year) {
        return Err(Error::invalid_date(format!(
            "day {ordinal} of year {year} does not exist"
        )));
    }
    Ok(shifted_days(year as i64, 1, 1) as i32 + ordinal as i32 - 1)
}

/// Weekday of a day count. Day 0 (0001-01-01) is a Monday.
pub fn weekday_of(days: i32) -> Weekday {
    Weekday::from_monday0_unchecked(days.rem_euclid(7) as u8)
}

/// Number of ISO weeks (52 or 53) in the ISO week-year `year`.
pub fn iso_weeks_in_year(year: i32) -> u32 {
    // A year has 53 weeks when it starts on a Thursday, or on a Wednesday in a
    // leap year.
    let jan1 = weekday_of(shifted_days(year as i64, 1, 1) as i32);
    match jan1 {
        Weekday::Thu => 53,
        Weekday::Wed if is_leap_year(year) => 53,
        _ => 52,
    }
}

/// ISO 8601 week date `(iso_year, week, weekday)` of a day count.
pub fn iso_week_date(days: i32) -> (i32, u32, Weekday) {
    let (year, month, day) = days_to_date(days);
    let weekday = weekday_of(days);
    let ordinal = day_of_year(year, month, day) as i32;
    let week = (ordinal - weekday.number_from_monday() as i32 + 10) / 7;
    if week < 1 {
        (year - 1, iso_weeks_in_year(year - 1), weekday)
    } else if week as u32 > iso_weeks_in_year(year) {
        (year + 1, 1, weekday)
    } else {
        (year, week as u32, weekday)
    }
}

/// Day count of an ISO 8601 week date.
///
/// # Errors
///
/// `InvalidDate` when the week does not exist in `iso_year`, or the result is
/// outside the representable range.
pub fn from_iso_week_date(iso_year: i32, week: u32, weekday: Weekday) -> Result<i32> {
    // ISO years reach one past the calendar bounds at either end.
    if !(MIN_YEAR - 1..=MAX_YEAR + 1).contains(&iso_year)
        || week < 1
        || week > iso_weeks_in_year(iso_year)
    {
        return Err(Error::invalid_date(format!(
            "ISO week {week} of {iso_year} does not exist"
        )));
    }
    // January 4th always falls in week 1.
    let jan4 = shifted_days(iso_year as i64, 1, 4);
    let week1_monday = jan4 - weekday_of(jan4 as i32).num_days_from_monday() as i64;
    let days = week1_monday + (week as i64 - 1) * 7 + weekday.num_days_from_monday() as i64;
    if days < MIN_DAYS as i64 || days > MAX_DAYS as i64 {
        return Err(Error::invalid_date(format!(
            "{iso_year}-W{week:02}-{} is out of the representable range",
            weekday.number_from_monday()
        )));
    }
    Ok(days as i32)
}

pub fn is_valid_days(days: i64) -> bool {
    (MIN_DAYS as i64..=MAX_DAYS as i64).contains(&days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_epoch_constants() {
        assert_eq!(date_to_days(1, 1, 1).unwrap(), 0);
        assert_eq!(date_to_days(1970, 1, 1).unwrap(), UNIX_EPOCH_DAYS);
        assert_eq!(days_to_date(0), (1, 1, 1));
        assert_eq!(days_to_date(-1), (0, 12, 31));
        assert_eq!(days_to_date(MIN_DAYS), (MIN_YEAR, 1, 1));
        assert_eq!(days_to_date(MAX_DAYS), (MAX_YEAR, 12, 31));
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2100));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(-100));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 13), 0);
        assert_eq!(days_in_month(2024, 0), 0);
    }

    #[test]
    fn test_round_trip_around_era_boundaries() {
        for days in [-146_097 - 1, -146_097, -1, 0, 1, 146_096, 146_097, 730_119, 730_120] {
            let (y, m, d) = days_to_date(days);
            assert_eq!(date_to_days(y, m, d).unwrap(), days, "{y}-{m}-{d}");
        }
    }

    #[test]
    fn test_ordinals() {
        assert_eq!(ordinal(2024, 12, 25).unwrap(), 360);
        assert_eq!(ordinal(2023, 12, 31).unwrap(), 365);
        assert_eq!(ordinal(2024, 12, 31).unwrap(), 366);
        for (month, day) in [(0, 1), (13, 1), (2, 0), (2, 30), (u32::MAX, 1)] {
            let err = ordinal(2024, month, day).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::InvalidDate { .. }), "{month}-{day}");
        }
        assert!(ordinal(2023, 2, 29).is_err());
        assert_eq!(ordinal_to_month_day(2024, 60), Some((2, 29)));
        assert_eq!(ordinal_to_month_day(2023, 60), Some((3, 1)));
        assert_eq!(ordinal_to_month_day(2024, 366), Some((12, 31)));
        assert_eq!(ordinal_to_month_day(2023, 366), None);
        assert_eq!(ordinal_to_month_day(2023, 0), None);
        for ord in 1..=366 {
            let (m, d) = ordinal_to_month_day(2024, ord).unwrap();
            assert_eq!(ordinal(2024, m, d).unwrap(), ord);
        }
        for ord in 1..=365 {
            let (m, d) = ordinal_to_month_day(2023, ord).unwrap();
            assert_eq!(ordinal(2023, m, d).unwrap(), ord);
        }
    }

    #[test]
    fn test_iso_week_boundaries() {
        // 2021-01-03 is a Sunday still in 2020-W53.
        let days = date_to_days(2021, 1, 3).unwrap();
        assert_eq!(iso_week_date(days), (2020, 53, Weekday::Sun));
        // 2024-12-30 is the Monday of 2025-W01.
        let days = date_to_days(2024, 12, 30).unwrap();
        assert_eq!(iso_week_date(days), (2025, 1, Weekday::Mon));
        assert_eq!(iso_weeks_in_year(2020), 53);
        assert_eq!(iso_weeks_in_year(2015), 53);
        assert_eq!(iso_weeks_in_year(2024), 52);
        assert!(from_iso_week_date(2024, 53, Weekday::Mon).is_err());
        assert!(from_iso_week_date(2024, 0, Weekday::Mon).is_err());
        assert_eq!(
            from_iso_week_date(2020, 53, Weekday::Sun).unwrap(),
            date_to_days(2021, 1, 3).unwrap()
        );
    }

    #[test]
    fn test_invalid_dates() {
        assert!(date_to_days(2024, 13, 1).is_err());
        assert!(date_to_days(2024, 0, 1).is_err());
        assert!(date_to_days(2024, 4, 31).is_err());
        assert!(date_to_days(MAX_YEAR + 1, 1, 1).is_err());
        assert!(date_to_days(MIN_YEAR - 1, 12, 31).is_err());
        assert!(from_ordinal(2023, 366).is_err());
        assert_eq!(from_ordinal(2024, 366).unwrap(), date_to_days(2024, 12, 31).unwrap());
    }
}
