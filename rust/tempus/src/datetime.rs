use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::{
    Duration, FixedOffset, IsoWeek, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc, Weekday,
    clock::Timestamp,
    error::Error,
    format::{self, FormatFields, Formattable, SecondsFormat},
    result::Result,
};

/// An instant paired with the zone it is viewed in.
///
/// The local civil time always equals the UTC instant plus the offset, and
/// both lie within the representable range. Comparison, equality and hashing
/// use the instant alone, so the same moment in two zones compares equal.
///
/// # Examples
///
/// ```
/// # use tempus::{DateTime, FixedOffset};
/// let dt = DateTime::parse_from_rfc3339("2024-12-25T15:30:45+05:00").unwrap();
/// assert_eq!(dt.to_utc().to_string(), "2024-12-25 10:30:45 UTC");
/// assert_eq!(dt.to_rfc2822().unwrap(), "Wed, 25 Dec 2024 15:30:45 +0500");
/// ```
#[derive(Clone, Copy)]
pub struct DateTime<Tz: TimeZone> {
    utc: NaiveDateTime,
    local: NaiveDateTime,
    offset: FixedOffset,
    tz: Tz,
}

// Constructors
impl<Tz: TimeZone> DateTime<Tz> {
    /// Builds a value from a UTC instant and the offset `tz` reports there.
    /// Public construction goes through [`TimeZone`], which resolves that
    /// offset itself.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if the local civil time falls outside the representable
    /// range.
    pub(crate) fn from_parts(
        utc: NaiveDateTime,
        offset: FixedOffset,
        tz: Tz,
    ) -> Result<DateTime<Tz>> {
        let local = utc
            .checked_add_signed(offset.as_duration())
            .map_err(|_| Error::out_of_range(format!("{utc} UTC at offset {offset}")))?;
        Ok(DateTime {
            utc,
            local,
            offset,
            tz,
        })
    }
}

impl DateTime<Utc> {
    pub const UNIX_EPOCH: DateTime<Utc> = DateTime {
        utc: NaiveDateTime::UNIX_EPOCH,
        local: NaiveDateTime::UNIX_EPOCH,
        offset: FixedOffset::UTC,
        tz: Utc,
    };

    pub const fn from_naive_utc(utc: NaiveDateTime) -> DateTime<Utc> {
        DateTime {
            utc,
            local: utc,
            offset: FixedOffset::UTC,
            tz: Utc,
        }
    }

    /// # Examples
    ///
    /// ```
    /// # use tempus::DateTime;
    /// let dt = DateTime::from_timestamp(1_703_520_645, 0).unwrap();
    /// assert_eq!(dt.to_string(), "2023-12-25 16:10:45 UTC");
    /// ```
    pub fn from_timestamp(secs: i64, nanos: u32) -> Result<DateTime<Utc>> {
        Ok(NaiveDateTime::from_timestamp(secs, nanos)?.and_utc())
    }

    pub fn from_timestamp_millis(millis: i64) -> Result<DateTime<Utc>> {
        Ok(NaiveDateTime::from_timestamp_millis(millis)?.and_utc())
    }

    pub fn from_timestamp_micros(micros: i64) -> Result<DateTime<Utc>> {
        Ok(NaiveDateTime::from_timestamp_micros(micros)?.and_utc())
    }

    pub fn from_timestamp_nanos(nanos: i64) -> Result<DateTime<Utc>> {
        Ok(NaiveDateTime::from_timestamp_nanos(nanos)?.and_utc())
    }
}

// Timestamps and views
impl<Tz: TimeZone> DateTime<Tz> {
    pub fn timestamp(&self) -> i64 {
        self.utc.timestamp()
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.utc.timestamp_millis()
    }

    pub fn timestamp_micros(&self) -> i64 {
        self.utc.timestamp_micros()
    }

    pub fn timestamp_nanos(&self) -> Result<i64> {
        self.utc.timestamp_nanos()
    }

    pub fn timestamp_subsec_nanos(&self) -> u32 {
        self.utc.timestamp_subsec_nanos()
    }

    pub fn to_unix(&self) -> Timestamp {
        self.utc.to_unix()
    }

    pub fn naive_utc(&self) -> NaiveDateTime {
        self.utc
    }

    pub fn naive_local(&self) -> NaiveDateTime {
        self.local
    }

    /// The local calendar date.
    pub fn date_naive(&self) -> NaiveDate {
        self.local.date()
    }

    /// The local time of day.
    pub fn time(&self) -> NaiveTime {
        self.local.time()
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    pub fn year(&self) -> i32 {
        self.local.year()
    }

    pub fn month(&self) -> u32 {
        self.local.month()
    }

    pub fn day(&self) -> u32 {
        self.local.day()
    }

    pub fn ordinal(&self) -> u32 {
        self.local.ordinal()
    }

    pub fn weekday(&self) -> Weekday {
        self.local.weekday()
    }

    pub fn iso_week(&self) -> IsoWeek {
        self.local.iso_week()
    }

    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    pub fn minute(&self) -> u32 {
        self.local.minute()
    }

    pub fn second(&self) -> u32 {
        self.local.second()
    }

    pub fn nanosecond(&self) -> u32 {
        self.local.nanosecond()
    }
}

// Zone conversion
impl<Tz: TimeZone> DateTime<Tz> {
    /// The same instant in `tz`.
    ///
    /// # Errors
    ///
    /// `OffsetResolution` if `tz` cannot resolve the instant, `OutOfRange` if
    /// the local time in `tz` is not representable.
    pub fn with_timezone<Tz2: TimeZone>(&self, tz: &Tz2) -> Result<DateTime<Tz2>> {
        tz.from_utc_datetime(&self.utc)
    }

    /// The same instant viewed at `offset`.
    pub fn to_fixed(&self, offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
        DateTime::from_parts(self.utc, offset, offset)
    }

    /// Drops the zone but keeps the current offset.
    pub fn fixed_offset(&self) -> DateTime<FixedOffset> {
        DateTime {
            utc: self.utc,
            local: self.local,
            offset: self.offset,
            tz: self.offset,
        }
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc(self.utc)
    }
}

// Arithmetic
impl<Tz: TimeZone> DateTime<Tz> {
    /// Adds `duration` to the instant and resolves the offset again, so a
    /// [`crate::Local`] value may change offset across a transition.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if the result leaves the representable range.
    pub fn checked_add_signed(&self, duration: Duration) -> Result<DateTime<Tz>> {
        let utc = self.utc.checked_add_signed(duration)?;
        self.tz.from_utc_datetime(&utc)
    }

    pub fn checked_sub_signed(&self, duration: Duration) -> Result<DateTime<Tz>> {
        let utc = self.utc.checked_sub_signed(duration)?;
        self.tz.from_utc_datetime(&utc)
    }

    /// Exact elapsed time between two instants, whatever their zones.
    pub fn signed_duration_since<Tz2: TimeZone>(&self, other: &DateTime<Tz2>) -> Duration {
        self.utc.signed_duration_since(other.utc)
    }
}

// Text
impl<Tz: TimeZone> DateTime<Tz> {
    /// `YYYY-MM-DDTHH:MM:SS[.fraction]±HH:MM`, with `+00:00` for UTC.
    pub fn to_rfc3339(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }

    /// RFC 3339 with a chosen fraction width; `use_z` writes a zero offset
    /// as `Z`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tempus::{DateTime, SecondsFormat};
    /// let dt = DateTime::from_timestamp(1_703_520_645, 500_000_000).unwrap();
    /// assert_eq!(dt.to_rfc3339(), "2023-12-25T16:10:45.500+00:00");
    /// assert_eq!(
    ///     dt.to_rfc3339_opts(SecondsFormat::Secs, true),
    ///     "2023-12-25T16:10:45Z"
    /// );
    /// ```
    pub fn to_rfc3339_opts(&self, seconds: SecondsFormat, use_z: bool) -> String {
        format::write_rfc3339(&self.local, self.offset, seconds, use_z)
    }

    /// `Dow, DD Mon YYYY HH:MM:SS ±HHMM`; the fraction is dropped.
    ///
    /// # Errors
    ///
    /// `OutOfRange` for years outside 0..=9999, `InvalidFormat` for an offset
    /// with a seconds component. RFC 2822 cannot express either.
    pub fn to_rfc2822(&self) -> Result<String> {
        format::write_rfc2822(&self.local, self.offset)
    }

    pub fn format(&self, pattern: &str) -> Result<String> {
        format::format_with_pattern(self, pattern)
    }
}

impl DateTime<FixedOffset> {
    pub fn parse_from_rfc3339(s: &str) -> Result<DateTime<FixedOffset>> {
        format::parse_from_rfc3339(s)
    }

    pub fn parse_from_rfc2822(s: &str) -> Result<DateTime<FixedOffset>> {
        format::parse_from_rfc2822(s)
    }

    /// Parses with a strftime-style pattern that includes an offset.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tempus::DateTime;
    /// let dt = DateTime::parse_from_str("2024-12-25 15:30 -0800", "%Y-%m-%d %H:%M %z").unwrap();
    /// assert_eq!(dt.offset().local_minus_utc(), -8 * 3600);
    /// assert_eq!(dt.naive_utc().to_string(), "2024-12-25 23:30:00");
    /// ```
    pub fn parse_from_str(s: &str, pattern: &str) -> Result<DateTime<FixedOffset>> {
        format::parse_zoned(s, pattern)
    }
}

impl<Tz: TimeZone> Formattable for DateTime<Tz> {
    fn format_fields(&self) -> FormatFields {
        FormatFields {
            date: Some(self.local.date()),
            time: Some(self.local.time()),
            offset: Some(self.offset),
            label: Some(self.tz.label(self.offset)),
        }
    }
}

impl<Tz: TimeZone, Tz2: TimeZone> PartialEq<DateTime<Tz2>> for DateTime<Tz> {
    fn eq(&self, other: &DateTime<Tz2>) -> bool {
        self.utc == other.utc
    }
}

impl<Tz: TimeZone> Eq for DateTime<Tz> {}

impl<Tz: TimeZone, Tz2: TimeZone> PartialOrd<DateTime<Tz2>> for DateTime<Tz> {
    fn partial_cmp(&self, other: &DateTime<Tz2>) -> Option<Ordering> {
        self.utc.partial_cmp(&other.utc)
    }
}

impl<Tz: TimeZone> Ord for DateTime<Tz> {
    fn cmp(&self, other: &DateTime<Tz>) -> Ordering {
        self.utc.cmp(&other.utc)
    }
}

impl<Tz: TimeZone> Hash for DateTime<Tz> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.utc.hash(state)
    }
}

impl<Tz: TimeZone> Add<Duration> for DateTime<Tz> {
    type Output = Result<DateTime<Tz>>;

    fn add(self, rhs: Duration) -> Result<DateTime<Tz>> {
        self.checked_add_signed(rhs)
    }
}

impl<Tz: TimeZone> Sub<Duration> for DateTime<Tz> {
    type Output = Result<DateTime<Tz>>;

    fn sub(self, rhs: Duration) -> Result<DateTime<Tz>> {
        self.checked_sub_signed(rhs)
    }
}

impl<Tz: TimeZone, Tz2: TimeZone> Sub<DateTime<Tz2>> for DateTime<Tz> {
    type Output = Duration;

    fn sub(self, rhs: DateTime<Tz2>) -> Duration {
        self.signed_duration_since(&rhs)
    }
}

/// Local date and time followed by the zone label, e.g.
/// `2024-12-25 15:30:45 UTC` or `2024-12-25 15:30:45 +05:00`.
impl<Tz: TimeZone> fmt::Display for DateTime<Tz> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.local, self.tz.label(self.offset))
    }
}

impl<Tz: TimeZone> fmt::Debug for DateTime<Tz> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.local, self.offset)
    }
}

/// RFC 3339.
impl FromStr for DateTime<FixedOffset> {
    type Err = Error;

    fn from_str(s: &str) -> Result<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(s)
    }
}

/// RFC 3339, converted to UTC.
impl FromStr for DateTime<Utc> {
    type Err = Error;

    fn from_str(s: &str) -> Result<DateTime<Utc>> {
        Ok(DateTime::parse_from_rfc3339(s)?.to_utc())
    }
}

impl Default for DateTime<Utc> {
    fn default() -> DateTime<Utc> {
        DateTime::UNIX_EPOCH
    }
}
