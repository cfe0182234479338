use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use num_traits::Bounded;

use crate::{
    DateTime, Duration, IsoWeek, MICROS_PER_SECOND, MILLIS_PER_SECOND, NANOS_PER_MICRO,
    NANOS_PER_MILLI, NANOS_PER_SECOND, NaiveDate, NaiveTime, SECONDS_PER_DAY, TimeZone, Utc,
    Weekday,
    calendar::UNIX_EPOCH_DAYS,
    clock::Timestamp,
    error::Error,
    format::{self, FormatFields, Formattable},
    result::Result,
};

/// A date and time of day without an offset.
///
/// Timestamp conversions treat the value as UTC.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NaiveDateTime {
    date: NaiveDate,
    time: NaiveTime,
}

impl NaiveDateTime {
    pub const MIN: NaiveDateTime = NaiveDateTime {
        date: NaiveDate::MIN,
        time: NaiveTime::MIDNIGHT,
    };
    pub const MAX: NaiveDateTime = NaiveDateTime {
        date: NaiveDate::MAX,
        time: NaiveTime::MAX,
    };
    /// 1970-01-01 00:00:00
    pub const UNIX_EPOCH: NaiveDateTime = NaiveDateTime {
        date: NaiveDate::UNIX_EPOCH,
        time: NaiveTime::MIDNIGHT,
    };

    pub const fn new(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
        NaiveDateTime { date, time }
    }

    /// Shorthand for `NaiveDate::from_ymd(..)?.and_hms(..)`.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<NaiveDateTime> {
        NaiveDate::from_ymd(year, month, day)?.and_hms(hour, minute, second)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }
}

// Timestamps
impl NaiveDateTime {
    /// Creates a value from Unix seconds and a nanosecond fraction.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `nanos` is not below one second or the date leaves the
    /// representable range.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tempus::NaiveDateTime;
    /// let dt = NaiveDateTime::from_timestamp(1_703_520_645, 0).unwrap();
    /// assert_eq!(dt.to_string(), "2023-12-25 16:10:45");
    /// assert_eq!(dt.timestamp(), 1_703_520_645);
    /// ```
    pub fn from_timestamp(secs: i64, nanos: u32) -> Result<NaiveDateTime> {
        if nanos as i64 >= NANOS_PER_SECOND {
            return Err(Error::out_of_range(format!("nanosecond fraction {nanos}")));
        }
        let days = secs.div_euclid(SECONDS_PER_DAY) + UNIX_EPOCH_DAYS as i64;
        let secs_of_day = secs.rem_euclid(SECONDS_PER_DAY);
        let date = NaiveDate::from_days(days)
            .map_err(|_| Error::out_of_range(format!("timestamp {secs}")))?;
        let time = NaiveTime::from_nanos_unchecked(
            secs_of_day as u64 * NANOS_PER_SECOND as u64 + nanos as u64,
        );
        Ok(NaiveDateTime { date, time })
    }

    pub fn from_timestamp_millis(millis: i64) -> Result<NaiveDateTime> {
        NaiveDateTime::from_timestamp(
            millis.div_euclid(MILLIS_PER_SECOND),
            (millis.rem_euclid(MILLIS_PER_SECOND) * NANOS_PER_MILLI) as u32,
        )
    }

    pub fn from_timestamp_micros(micros: i64) -> Result<NaiveDateTime> {
        NaiveDateTime::from_timestamp(
            micros.div_euclid(MICROS_PER_SECOND),
            (micros.rem_euclid(MICROS_PER_SECOND) * NANOS_PER_MICRO) as u32,
        )
    }

    pub fn from_timestamp_nanos(nanos: i64) -> Result<NaiveDateTime> {
        NaiveDateTime::from_timestamp(
            nanos.div_euclid(NANOS_PER_SECOND),
            nanos.rem_euclid(NANOS_PER_SECOND) as u32,
        )
    }

    pub fn from_unix(timestamp: Timestamp) -> Result<NaiveDateTime> {
        NaiveDateTime::from_timestamp(timestamp.seconds, timestamp.nanos)
    }

    /// Whole seconds since the Unix epoch, rounding toward negative infinity.
    pub fn timestamp(&self) -> i64 {
        (self.date.days() as i64 - UNIX_EPOCH_DAYS as i64) * SECONDS_PER_DAY
            + self.time.num_seconds_from_midnight() as i64
    }

    /// Milliseconds since the Unix epoch; fits `i64` over the whole range.
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp() * MILLIS_PER_SECOND
            + (self.time.nanosecond() as i64 / NANOS_PER_MILLI)
    }

    /// Microseconds since the Unix epoch; fits `i64` over the whole range.
    pub fn timestamp_micros(&self) -> i64 {
        self.timestamp() * MICROS_PER_SECOND
            + (self.time.nanosecond() as i64 / NANOS_PER_MICRO)
    }

    /// Nanoseconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// `OutOfRange` outside roughly 1677-09-21 to 2262-04-11.
    pub fn timestamp_nanos(&self) -> Result<i64> {
        self.timestamp()
            .checked_mul(NANOS_PER_SECOND)
            .and_then(|nanos| nanos.checked_add(self.time.nanosecond() as i64))
            .ok_or_else(|| Error::out_of_range(format!("{self} in nanoseconds since 1970")))
    }

    pub fn timestamp_subsec_nanos(&self) -> u32 {
        self.time.nanosecond()
    }

    pub fn to_unix(&self) -> Timestamp {
        Timestamp {
            seconds: self.timestamp(),
            nanos: self.time.nanosecond(),
        }
    }
}

// Arithmetic
impl NaiveDateTime {
    /// Adds `duration`, carrying whole days from the time into the date.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if the result leaves the representable range.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tempus::{NaiveDateTime, Duration};
    /// let dt = NaiveDateTime::from_ymd_hms(2024, 12, 31, 23, 0, 0).unwrap();
    /// let next = dt.checked_add_signed(Duration::hours(2)).unwrap();
    /// assert_eq!(next, NaiveDateTime::from_ymd_hms(2025, 1, 1, 1, 0, 0).unwrap());
    /// ```
    pub fn checked_add_signed(&self, duration: Duration) -> Result<NaiveDateTime> {
        let (time, carry) = self.time.overflowing_add_signed(duration);
        let date = self
            .date
            .checked_add_days(carry)
            .map_err(|_| Error::out_of_range(format!("{self} + {duration}")))?;
        Ok(NaiveDateTime { date, time })
    }

    pub fn checked_sub_signed(&self, duration: Duration) -> Result<NaiveDateTime> {
        let (time, carry) = self.time.overflowing_sub_signed(duration);
        let date = self
            .date
            .checked_add_days(carry)
            .map_err(|_| Error::out_of_range(format!("{self} - {duration}")))?;
        Ok(NaiveDateTime { date, time })
    }

    /// Exact `self - other`.
    pub fn signed_duration_since(&self, other: NaiveDateTime) -> Duration {
        let days = self.date.days() as i64 - other.date.days() as i64;
        let nanos = self.time.nanos_since_midnight() as i64 - other.time.nanos_since_midnight() as i64;
        Duration::from_secs_nanos(days * SECONDS_PER_DAY, nanos)
    }
}

// Calendar projections
impl NaiveDateTime {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn ordinal(&self) -> u32 {
        self.date.ordinal()
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn iso_week(&self) -> IsoWeek {
        self.date.iso_week()
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    pub fn second(&self) -> u32 {
        self.time.second()
    }

    pub fn nanosecond(&self) -> u32 {
        self.time.nanosecond()
    }
}

// Zones and text
impl NaiveDateTime {
    /// Interprets the value as UTC.
    pub fn and_utc(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc(*self)
    }

    /// Interprets the value as local civil time in `tz`.
    pub fn and_local_timezone<Tz: TimeZone>(&self, tz: Tz) -> Result<DateTime<Tz>> {
        tz.from_local_datetime(self)
    }

    pub fn format(&self, pattern: &str) -> Result<String> {
        format::format_with_pattern(self, pattern)
    }

    /// Parses with a strftime-style pattern; any offset in the input is
    /// ignored.
    pub fn parse_from_str(s: &str, pattern: &str) -> Result<NaiveDateTime> {
        format::parse_datetime(s, pattern)
    }
}

impl Formattable for NaiveDateTime {
    fn format_fields(&self) -> FormatFields {
        FormatFields {
            date: Some(self.date),
            time: Some(self.time),
            ..Default::default()
        }
    }
}

impl Add<Duration> for NaiveDateTime {
    type Output = Result<NaiveDateTime>;

    fn add(self, rhs: Duration) -> Result<NaiveDateTime> {
        self.checked_add_signed(rhs)
    }
}

impl Sub<Duration> for NaiveDateTime {
    type Output = Result<NaiveDateTime>;

    fn sub(self, rhs: Duration) -> Result<NaiveDateTime> {
        self.checked_sub_signed(rhs)
    }
}

impl Sub for NaiveDateTime {
    type Output = Duration;

    fn sub(self, rhs: NaiveDateTime) -> Duration {
        self.signed_duration_since(rhs)
    }
}

impl Bounded for NaiveDateTime {
    fn min_value() -> NaiveDateTime {
        NaiveDateTime::MIN
    }

    fn max_value() -> NaiveDateTime {
        NaiveDateTime::MAX
    }
}

impl Default for NaiveDateTime {
    fn default() -> NaiveDateTime {
        NaiveDateTime::UNIX_EPOCH
    }
}

/// `YYYY-MM-DD HH:MM:SS[.fraction]`
impl fmt::Display for NaiveDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}

/// `YYYY-MM-DDTHH:MM:SS[.fraction]`
impl fmt::Debug for NaiveDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

impl FromStr for NaiveDateTime {
    type Err = Error;

    /// Accepts `T` or a single space between the date and the time.
    fn from_str(s: &str) -> Result<NaiveDateTime> {
        // Signed years widen the date, so the separator has no fixed position.
        let separator = s.bytes().find(|b| matches!(b, b'T' | b' '));
        let pattern = if separator == Some(b' ') {
            "%Y-%m-%d %H:%M:%S%.f"
        } else {
            "%Y-%m-%dT%H:%M:%S%.f"
        };
        NaiveDateTime::parse_from_str(s, pattern)
    }
}
