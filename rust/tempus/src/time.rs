use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use num_traits::Bounded;

use crate::{
    Duration, NANOS_PER_DAY, NANOS_PER_MICRO, NANOS_PER_MILLI, NANOS_PER_SECOND,
    SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
    error::Error,
    format::{self, FormatFields, Formattable},
    result::Result,
};

/// A time of day with nanosecond precision and no date or offset.
///
/// Arithmetic on a standalone `NaiveTime` wraps around midnight; use
/// [`NaiveTime::overflowing_add_signed`] to observe the number of days
/// carried.
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NaiveTime {
    /// Nanoseconds since midnight, below `NANOS_PER_DAY`.
    nanos: u64,
}

impl NaiveTime {
    pub const MIDNIGHT: NaiveTime = NaiveTime { nanos: 0 };
    /// 23:59:59.999999999
    pub const MAX: NaiveTime = NaiveTime {
        nanos: NANOS_PER_DAY as u64 - 1,
    };

    /// Creates a time from hour (0-23), minute (0-59) and second (0-59).
    ///
    /// # Errors
    ///
    /// `InvalidTime` if any field is out of range. Leap seconds are not
    /// representable.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<NaiveTime> {
        NaiveTime::from_hms_nano(hour, minute, second, 0)
    }

    pub fn from_hms_milli(hour: u32, minute: u32, second: u32, milli: u32) -> Result<NaiveTime> {
        if milli >= 1_000 {
            return Err(Error::invalid_time(format!("millisecond {milli} out of range")));
        }
        NaiveTime::from_hms_nano(hour, minute, second, milli * NANOS_PER_MILLI as u32)
    }

    pub fn from_hms_micro(hour: u32, minute: u32, second: u32, micro: u32) -> Result<NaiveTime> {
        if micro >= 1_000_000 {
            return Err(Error::invalid_time(format!("microsecond {micro} out of range")));
        }
        NaiveTime::from_hms_nano(hour, minute, second, micro * NANOS_PER_MICRO as u32)
    }

    /// Creates a time from its fields and a nanosecond fraction
    /// (0-999,999,999).
    ///
    /// # Examples
    ///
    /// ```
    /// # use tempus::NaiveTime;
    /// let t = NaiveTime::from_hms_nano(15, 30, 45, 500_000_000).unwrap();
    /// assert_eq!(t.to_string(), "15:30:45.500");
    /// assert!(NaiveTime::from_hms_nano(24, 0, 0, 0).is_err());
    /// ```
    pub fn from_hms_nano(hour: u32, minute: u32, second: u32, nano: u32) -> Result<NaiveTime> {
        if hour >= 24 || minute >= 60 || second >= 60 || nano as i64 >= NANOS_PER_SECOND {
            return Err(Error::invalid_time(format!(
                "{hour:02}:{minute:02}:{second:02}.{nano:09} is not a valid time of day"
            )));
        }
        let secs = hour as u64 * SECONDS_PER_HOUR as u64
            + minute as u64 * SECONDS_PER_MINUTE as u64
            + second as u64;
        Ok(NaiveTime {
            nanos: secs * NANOS_PER_SECOND as u64 + nano as u64,
        })
    }

    /// Creates a time from seconds since midnight (0-86,399) and a nanosecond
    /// fraction.
    pub fn from_num_seconds_from_midnight(secs: u32, nano: u32) -> Result<NaiveTime> {
        if secs as i64 >= SECONDS_PER_DAY || nano as i64 >= NANOS_PER_SECOND {
            return Err(Error::invalid_time(format!(
                "{secs}s + {nano}ns after midnight"
            )));
        }
        Ok(NaiveTime {
            nanos: secs as u64 * NANOS_PER_SECOND as u64 + nano as u64,
        })
    }

    /// Creates a time from nanoseconds since midnight.
    pub(crate) fn from_nanos_unchecked(nanos: u64) -> NaiveTime {
        debug_assert!(nanos < NANOS_PER_DAY as u64);
        NaiveTime { nanos }
    }

    pub fn hour(&self) -> u32 {
        self.num_seconds_from_midnight() / SECONDS_PER_HOUR as u32
    }

    pub fn minute(&self) -> u32 {
        self.num_seconds_from_midnight() / SECONDS_PER_MINUTE as u32 % 60
    }

    pub fn second(&self) -> u32 {
        self.num_seconds_from_midnight() % 60
    }

    /// Sub-second fraction in nanoseconds.
    pub fn nanosecond(&self) -> u32 {
        (self.nanos % NANOS_PER_SECOND as u64) as u32
    }

    pub fn num_seconds_from_midnight(&self) -> u32 {
        (self.nanos / NANOS_PER_SECOND as u64) as u32
    }

    pub fn nanos_since_midnight(&self) -> u64 {
        self.nanos
    }

    /// Hour on a 12-hour clock, with `true` for PM.
    pub fn hour12(&self) -> (bool, u32) {
        let hour = self.hour();
        let hour12 = match hour % 12 {
            0 => 12,
            h => h,
        };
        (hour >= 12, hour12)
    }

    /// Adds `duration` and wraps around midnight.
    ///
    /// Returns the new time and the number of whole days carried, negative
    /// when the result wrapped backwards.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tempus::{NaiveTime, Duration};
    /// let t = NaiveTime::from_hms(22, 0, 0).unwrap();
    /// let (wrapped, carry) = t.overflowing_add_signed(Duration::hours(5));
    /// assert_eq!(wrapped, NaiveTime::from_hms(3, 0, 0).unwrap());
    /// assert_eq!(carry, 1);
    /// ```
    pub fn overflowing_add_signed(&self, duration: Duration) -> (NaiveTime, i64) {
        let total = self.nanos as i128 + duration.total_nanos();
        let nanos_per_day = NANOS_PER_DAY as i128;
        let carry = total.div_euclid(nanos_per_day);
        let nanos = total.rem_euclid(nanos_per_day) as u64;
        // |duration| < 2^63 s, so the day carry always fits in i64.
        (NaiveTime { nanos }, carry as i64)
    }

    pub fn overflowing_sub_signed(&self, duration: Duration) -> (NaiveTime, i64) {
        let total = self.nanos as i128 - duration.total_nanos();
        let nanos_per_day = NANOS_PER_DAY as i128;
        let carry = total.div_euclid(nanos_per_day);
        let nanos = total.rem_euclid(nanos_per_day) as u64;
        (NaiveTime { nanos }, carry as i64)
    }

    /// `self - other`, within ±24 hours.
    pub fn signed_duration_since(&self, other: NaiveTime) -> Duration {
        Duration::nanoseconds(self.nanos as i64 - other.nanos as i64)
    }

    pub fn format(&self, pattern: &str) -> Result<String> {
        format::format_with_pattern(self, pattern)
    }

    pub fn parse_from_str(s: &str, pattern: &str) -> Result<NaiveTime> {
        format::parse_time(s, pattern)
    }
}

impl Formattable for NaiveTime {
    fn format_fields(&self) -> FormatFields {
        FormatFields {
            time: Some(*self),
            ..Default::default()
        }
    }
}

impl Add<Duration> for NaiveTime {
    type Output = NaiveTime;

    /// Wraps around midnight; the day carry is discarded.
    fn add(self, rhs: Duration) -> NaiveTime {
        self.overflowing_add_signed(rhs).0
    }
}

impl Sub<Duration> for NaiveTime {
    type Output = NaiveTime;

    fn sub(self, rhs: Duration) -> NaiveTime {
        self.overflowing_sub_signed(rhs).0
    }
}

impl Sub for NaiveTime {
    type Output = Duration;

    fn sub(self, rhs: NaiveTime) -> Duration {
        self.signed_duration_since(rhs)
    }
}

impl Bounded for NaiveTime {
    fn min_value() -> NaiveTime {
        NaiveTime::MIDNIGHT
    }

    fn max_value() -> NaiveTime {
        NaiveTime::MAX
    }
}

/// `HH:MM:SS`, followed by a 3, 6 or 9 digit fraction when non-zero.
impl fmt::Display for NaiveTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )?;
        format::write_auto_fraction(f, self.nanosecond())
    }
}

impl fmt::Debug for NaiveTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for NaiveTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
    }
}
