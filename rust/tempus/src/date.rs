use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use num_traits::Bounded;

use crate::{
    Duration, NaiveDateTime, NaiveTime, SECONDS_PER_DAY,
    calendar::{self, MAX_DAYS, MIN_DAYS},
    error::Error,
    format::{self, FormatFields, Formattable},
    month::Month,
    result::Result,
    weekday::Weekday,
};

/// A proleptic Gregorian calendar date without a time zone.
///
/// Backed by a single day count (0001-01-01 is day 0), so ordering, hashing
/// and day arithmetic are plain integer operations. Valid years are
/// `MIN_YEAR..=MAX_YEAR`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NaiveDate {
    days: i32,
}

/// ISO 8601 week date view of a [`NaiveDate`].
///
/// The ISO year can differ from the calendar year for dates in the first and
/// last days of January and December.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct IsoWeek {
    year: i32,
    week: u32,
    weekday: Weekday,
}

impl IsoWeek {
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Week number, 1 to 53.
    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn week0(&self) -> u32 {
        self.week - 1
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }
}

/// `YYYY-Www-D`
impl fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format::write_year(f, self.year)?;
        write!(f, "-W{:02}-{}", self.week, self.weekday.number_from_monday())
    }
}

impl NaiveDate {
    /// 1 January of `MIN_YEAR`.
    pub const MIN: NaiveDate = NaiveDate { days: MIN_DAYS };
    /// 31 December of `MAX_YEAR`.
    pub const MAX: NaiveDate = NaiveDate { days: MAX_DAYS };
    /// 1970-01-01
    pub const UNIX_EPOCH: NaiveDate = NaiveDate {
        days: calendar::UNIX_EPOCH_DAYS,
    };

    /// Creates a date from its calendar fields.
    ///
    /// # Arguments
    ///
    /// * `year` - Year in `MIN_YEAR..=MAX_YEAR`; year 0 is 1 BCE.
    /// * `month` - Month, 1 to 12.
    /// * `day` - Day of the month, 1 to 28..31.
    ///
    /// # Errors
    ///
    /// `InvalidDate` for any field outside its range, including 29 February
    /// of a common year.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tempus::{NaiveDate, Weekday};
    /// let christmas = NaiveDate::from_ymd(2024, 12, 25).unwrap();
    /// assert_eq!(christmas.ordinal(), 360);
    /// assert_eq!(christmas.weekday(), Weekday::Wed);
    /// assert!(NaiveDate::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
        calendar::date_to_days(year, month, day).map(|days| NaiveDate { days })
    }

    /// Creates a date from a year and day of the year (1 to 365 or 366).
    pub fn from_yo(year: i32, ordinal: u32) -> Result<NaiveDate> {
        calendar::from_ordinal(year, ordinal).map(|days| NaiveDate { days })
    }

    /// Creates a date from an ISO 8601 week date.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tempus::{NaiveDate, Weekday};
    /// let date = NaiveDate::from_isoywd(2024, 52, Weekday::Mon).unwrap();
    /// assert_eq!(date, NaiveDate::from_ymd(2024, 12, 23).unwrap());
    /// ```
    pub fn from_isoywd(iso_year: i32, week: u32, weekday: Weekday) -> Result<NaiveDate> {
        calendar::from_iso_week_date(iso_year, week, weekday).map(|days| NaiveDate { days })
    }

    /// Inverse of [`NaiveDate::num_days_from_ce`]; 0001-01-01 is day 1.
    pub fn from_num_days_from_ce(days: i32) -> Result<NaiveDate> {
        NaiveDate::from_days(days as i64 - 1)
    }

    /// Creates a date from the internal day count, where 0001-01-01 is 0.
    pub(crate) fn from_days(days: i64) -> Result<NaiveDate> {
        if !calendar::is_valid_days(days) {
            return Err(Error::out_of_range(format!(
                "date {days} days after 0001-01-01"
            )));
        }
        Ok(NaiveDate { days: days as i32 })
    }

    pub(crate) fn days(&self) -> i32 {
        self.days
    }

    pub fn and_time(&self, time: NaiveTime) -> NaiveDateTime {
        NaiveDateTime::new(*self, time)
    }

    pub fn and_hms(&self, hour: u32, minute: u32, second: u32) -> Result<NaiveDateTime> {
        NaiveTime::from_hms(hour, minute, second).map(|time| self.and_time(time))
    }

    pub fn and_hms_milli(
        &self,
        hour: u32,
        minute: u32,
        second: u32,
        milli: u32,
    ) -> Result<NaiveDateTime> {
        NaiveTime::from_hms_milli(hour, minute, second, milli).map(|time| self.and_time(time))
    }

    pub fn and_hms_micro(
        &self,
        hour: u32,
        minute: u32,
        second: u32,
        micro: u32,
    ) -> Result<NaiveDateTime> {
        NaiveTime::from_hms_micro(hour, minute, second, micro).map(|time| self.and_time(time))
    }

    pub fn and_hms_nano(
        &self,
        hour: u32,
        minute: u32,
        second: u32,
        nano: u32,
    ) -> Result<NaiveDateTime> {
        NaiveTime::from_hms_nano(hour, minute, second, nano).map(|time| self.and_time(time))
    }
}

// Calendar projections
impl NaiveDate {
    pub fn year(&self) -> i32 {
        calendar::days_to_date(self.days).0
    }

    /// Month, 1 to 12.
    pub fn month(&self) -> u32 {
        calendar::days_to_date(self.days).1
    }

    /// Month, 0 to 11.
    pub fn month0(&self) -> u32 {
        self.month() - 1
    }

    pub fn month_of_year(&self) -> Month {
        Month::ALL[self.month0() as usize]
    }

    pub fn day(&self) -> u32 {
        calendar::days_to_date(self.days).2
    }

    pub fn day0(&self) -> u32 {
        self.day() - 1
    }

    /// Day of the year, 1 to 366.
    pub fn ordinal(&self) -> u32 {
        let (year, month, day) = calendar::days_to_date(self.days);
        calendar::day_of_year(year, month, day)
    }

    pub fn ordinal0(&self) -> u32 {
        self.ordinal() - 1
    }

    pub fn weekday(&self) -> Weekday {
        calendar::weekday_of(self.days)
    }

    /// ISO 8601 week date.
    ///
    /// ```
    /// # use tempus::{NaiveDate, Weekday};
    /// let week = NaiveDate::from_ymd(2021, 1, 3).unwrap().iso_week();
    /// assert_eq!((week.year(), week.week(), week.weekday()), (2020, 53, Weekday::Sun));
    /// ```
    pub fn iso_week(&self) -> IsoWeek {
        let (year, week, weekday) = calendar::iso_week_date(self.days);
        IsoWeek {
            year,
            week,
            weekday,
        }
    }

    /// Days since the start of the common era, counting 0001-01-01 as 1.
    pub fn num_days_from_ce(&self) -> i32 {
        self.days + 1
    }

    pub fn is_leap_year(&self) -> bool {
        calendar::is_leap_year(self.year())
    }

    pub fn days_in_month(&self) -> u32 {
        let (year, month, _) = calendar::days_to_date(self.days);
        calendar::days_in_month(year, month)
    }
}

// Arithmetic
impl NaiveDate {
    /// The following day.
    ///
    /// # Errors
    ///
    /// `OutOfRange` on `NaiveDate::MAX`.
    pub fn succ(&self) -> Result<NaiveDate> {
        self.checked_add_days(1)
    }

    /// The preceding day.
    ///
    /// # Errors
    ///
    /// `OutOfRange` on `NaiveDate::MIN`.
    pub fn pred(&self) -> Result<NaiveDate> {
        self.checked_sub_days(1)
    }

    pub fn checked_add_days(&self, days: i64) -> Result<NaiveDate> {
        match (self.days as i64).checked_add(days) {
            Some(days) => NaiveDate::from_days(days),
            None => Err(Error::out_of_range(format!("{self} + {days} days"))),
        }
    }

    pub fn checked_sub_days(&self, days: i64) -> Result<NaiveDate> {
        match (self.days as i64).checked_sub(days) {
            Some(days) => NaiveDate::from_days(days),
            None => Err(Error::out_of_range(format!("{self} - {days} days"))),
        }
    }

    /// Adds a whole number of days.
    ///
    /// A date has no time of day, so a duration with a sub-day remainder is
    /// rejected rather than truncated.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `duration` is not a multiple of 24 hours;
    /// `OutOfRange` if the result leaves the representable range.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tempus::{NaiveDate, Duration};
    /// let date = NaiveDate::from_ymd(2024, 1, 1).unwrap();
    /// let later = date.checked_add_signed(Duration::days(100)).unwrap();
    /// assert_eq!(later, NaiveDate::from_ymd(2024, 4, 10).unwrap());
    /// assert!(date.checked_add_signed(Duration::hours(36)).is_err());
    /// ```
    pub fn checked_add_signed(&self, duration: Duration) -> Result<NaiveDate> {
        self.checked_add_days(whole_days(duration)?)
    }

    pub fn checked_sub_signed(&self, duration: Duration) -> Result<NaiveDate> {
        self.checked_sub_days(whole_days(duration)?)
    }

    /// `self - other` as a whole-day duration.
    pub fn signed_duration_since(&self, other: NaiveDate) -> Duration {
        Duration::seconds((self.days as i64 - other.days as i64) * SECONDS_PER_DAY)
    }
}

fn whole_days(duration: Duration) -> Result<i64> {
    if duration.subsec_nanos() != 0 || duration.num_seconds() % SECONDS_PER_DAY != 0 {
        return Err(Error::invalid_arg(
            "duration",
            format!("{duration} is not a whole number of days"),
        ));
    }
    Ok(duration.num_days())
}

// Text
impl NaiveDate {
    /// Formats with a strftime-style pattern; see [`crate::format`].
    ///
    /// ```
    /// # use tempus::NaiveDate;
    /// let date = NaiveDate::from_ymd(2024, 3, 5).unwrap();
    /// assert_eq!(date.format("%A, %B %e %Y").unwrap(), "Tuesday, March  5 2024");
    /// ```
    pub fn format(&self, pattern: &str) -> Result<String> {
        format::format_with_pattern(self, pattern)
    }

    pub fn parse_from_str(s: &str, pattern: &str) -> Result<NaiveDate> {
        format::parse_date(s, pattern)
    }
}

impl Formattable for NaiveDate {
    fn format_fields(&self) -> FormatFields {
        FormatFields {
            date: Some(*self),
            ..Default::default()
        }
    }
}

impl Add<Duration> for NaiveDate {
    type Output = Result<NaiveDate>;

    fn add(self, rhs: Duration) -> Result<NaiveDate> {
        self.checked_add_signed(rhs)
    }
}

impl Sub<Duration> for NaiveDate {
    type Output = Result<NaiveDate>;

    fn sub(self, rhs: Duration) -> Result<NaiveDate> {
        self.checked_sub_signed(rhs)
    }
}

impl Sub for NaiveDate {
    type Output = Duration;

    fn sub(self, rhs: NaiveDate) -> Duration {
        self.signed_duration_since(rhs)
    }
}

impl Bounded for NaiveDate {
    fn min_value() -> NaiveDate {
        NaiveDate::MIN
    }

    fn max_value() -> NaiveDate {
        NaiveDate::MAX
    }
}

/// `YYYY-MM-DD`, with a signed year outside 0..=9999.
impl fmt::Display for NaiveDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day) = calendar::days_to_date(self.days);
        format::write_year(f, year)?;
        write!(f, "-{month:02}-{day:02}")
    }
}

impl fmt::Debug for NaiveDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for NaiveDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
    }
}

impl Default for NaiveDate {
    /// 1970-01-01.
    fn default() -> NaiveDate {
        NaiveDate::UNIX_EPOCH
    }
}
