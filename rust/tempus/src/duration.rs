use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::Bounded;

use crate::{
    NANOS_PER_MICRO, NANOS_PER_MILLI, NANOS_PER_SECOND, SECONDS_PER_DAY, SECONDS_PER_HOUR,
    SECONDS_PER_MINUTE, SECONDS_PER_WEEK, error::Error, result::Result,
};

const NANOS_PER_SECOND_I128: i128 = NANOS_PER_SECOND as i128;

/// A signed span of time with nanosecond precision.
///
/// Stored as whole seconds plus a non-negative nanosecond remainder, so
/// `-1.5s` is `{secs: -2, nanos: 500_000_000}`. The representable range is
/// `[Duration::MIN, Duration::MAX]`, roughly ±292 billion years; arithmetic
/// that leaves it fails with `DurationOverflow`.
///
/// # Examples
///
/// ```
/// # use tempus::{Duration, DurationParts};
/// let span = Duration::from_parts(DurationParts {
///     days: 1,
///     hours: 2,
///     minutes: 30,
///     ..Default::default()
/// })
/// .unwrap();
/// assert_eq!(span.num_hours(), 26);
/// assert_eq!((Duration::hours(2) + span).unwrap().num_hours(), 28);
/// ```
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Duration {
    secs: i64,
    nanos: u32,
}

/// Multi-unit description of a [`Duration`]; unset fields default to zero.
///
/// ```
/// # use tempus::{Duration, DurationParts};
/// let parts = DurationParts { weeks: 1, milliseconds: 500, ..Default::default() };
/// assert_eq!(Duration::from_parts(parts).unwrap().num_milliseconds().unwrap(), 604_800_500);
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DurationParts {
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
    pub microseconds: i64,
    pub nanoseconds: i64,
}

impl Duration {
    pub const ZERO: Duration = Duration { secs: 0, nanos: 0 };
    pub const MAX: Duration = Duration {
        secs: i64::MAX,
        nanos: 999_999_999,
    };
    /// Exactly `-Duration::MAX`.
    pub const MIN: Duration = Duration {
        secs: i64::MIN,
        nanos: 1,
    };

    pub(crate) const fn from_secs_nanos(secs: i64, nanos: i64) -> Duration {
        // Callers guarantee `secs * 1e9 + nanos` stays in range.
        Duration {
            secs: secs + nanos.div_euclid(NANOS_PER_SECOND),
            nanos: nanos.rem_euclid(NANOS_PER_SECOND) as u32,
        }
    }

    /// Builds a duration from a total nanosecond count.
    fn from_total(total: i128, operation: &str) -> Result<Duration> {
        let secs = total.div_euclid(NANOS_PER_SECOND_I128);
        let nanos = total.rem_euclid(NANOS_PER_SECOND_I128) as u32;
        match i64::try_from(secs) {
            Ok(secs) if (secs, nanos) >= (i64::MIN, 1) => Ok(Duration { secs, nanos }),
            _ => Err(Error::duration_overflow(operation)),
        }
    }

    /// The stored representation: floored seconds and a nanosecond
    /// remainder in `0..1_000_000_000`.
    pub(crate) fn as_secs_nanos(&self) -> (i64, u32) {
        (self.secs, self.nanos)
    }

    /// Total nanoseconds; always fits in `i128`.
    pub fn total_nanos(&self) -> i128 {
        self.secs as i128 * NANOS_PER_SECOND_I128 + self.nanos as i128
    }
}

// Constructors
impl Duration {
    pub const fn weeks(weeks: i32) -> Duration {
        Duration::from_secs_nanos(weeks as i64 * SECONDS_PER_WEEK, 0)
    }

    pub const fn days(days: i32) -> Duration {
        Duration::from_secs_nanos(days as i64 * SECONDS_PER_DAY, 0)
    }

    pub const fn hours(hours: i32) -> Duration {
        Duration::from_secs_nanos(hours as i64 * SECONDS_PER_HOUR, 0)
    }

    pub const fn minutes(minutes: i32) -> Duration {
        Duration::from_secs_nanos(minutes as i64 * SECONDS_PER_MINUTE, 0)
    }

    /// `i64::MIN` seconds lies one nanosecond below [`Duration::MIN`] and
    /// saturates to it; [`Duration::try_seconds`] rejects it instead.
    pub const fn seconds(seconds: i64) -> Duration {
        if seconds == i64::MIN {
            return Duration::MIN;
        }
        Duration {
            secs: seconds,
            nanos: 0,
        }
    }

    pub const fn milliseconds(milliseconds: i64) -> Duration {
        Duration::from_secs_nanos(
            milliseconds.div_euclid(1_000),
            milliseconds.rem_euclid(1_000) * NANOS_PER_MILLI,
        )
    }

    pub const fn microseconds(microseconds: i64) -> Duration {
        Duration::from_secs_nanos(
            microseconds.div_euclid(1_000_000),
            microseconds.rem_euclid(1_000_000) * NANOS_PER_MICRO,
        )
    }

    pub const fn nanoseconds(nanoseconds: i64) -> Duration {
        Duration::from_secs_nanos(0, nanoseconds)
    }

    /// Like [`Duration::weeks`], for magnitudes beyond `i32`.
    pub fn try_weeks(weeks: i64) -> Result<Duration> {
        Duration::scaled_seconds(weeks, SECONDS_PER_WEEK, "weeks")
    }

    pub fn try_days(days: i64) -> Result<Duration> {
        Duration::scaled_seconds(days, SECONDS_PER_DAY, "days")
    }

    pub fn try_hours(hours: i64) -> Result<Duration> {
        Duration::scaled_seconds(hours, SECONDS_PER_HOUR, "hours")
    }

    pub fn try_minutes(minutes: i64) -> Result<Duration> {
        Duration::scaled_seconds(minutes, SECONDS_PER_MINUTE, "minutes")
    }

    pub fn try_seconds(seconds: i64) -> Result<Duration> {
        Duration::scaled_seconds(seconds, 1, "seconds")
    }

    fn scaled_seconds(count: i64, unit: i64, operation: &str) -> Result<Duration> {
        match count.checked_mul(unit) {
            Some(secs) if secs != i64::MIN => Ok(Duration { secs, nanos: 0 }),
            _ => Err(Error::duration_overflow(operation)),
        }
    }

    /// Sums every field of `parts`.
    ///
    /// # Errors
    ///
    /// `DurationOverflow` if the total leaves `[Duration::MIN, Duration::MAX]`.
    pub fn from_parts(parts: DurationParts) -> Result<Duration> {
        let terms = [
            (parts.weeks, SECONDS_PER_WEEK as i128 * NANOS_PER_SECOND_I128),
            (parts.days, SECONDS_PER_DAY as i128 * NANOS_PER_SECOND_I128),
            (parts.hours, SECONDS_PER_HOUR as i128 * NANOS_PER_SECOND_I128),
            (parts.minutes, SECONDS_PER_MINUTE as i128 * NANOS_PER_SECOND_I128),
            (parts.seconds, NANOS_PER_SECOND_I128),
            (parts.milliseconds, NANOS_PER_MILLI as i128),
            (parts.microseconds, NANOS_PER_MICRO as i128),
            (parts.nanoseconds, 1),
        ];
        // Each term is below 2^113, so eight of them cannot overflow i128.
        let total: i128 = terms
            .iter()
            .map(|&(count, unit)| count as i128 * unit)
            .sum();
        Duration::from_total(total, "from_parts")
    }

    /// Converts a standard library duration.
    pub fn from_std(duration: std::time::Duration) -> Result<Duration> {
        let secs = i64::try_from(duration.as_secs())
            .map_err(|_| Error::duration_overflow("from_std"))?;
        Ok(Duration {
            secs,
            nanos: duration.subsec_nanos(),
        })
    }
}

// Projections
impl Duration {
    /// Whole weeks, truncated toward zero.
    pub fn num_weeks(&self) -> i64 {
        self.num_seconds() / SECONDS_PER_WEEK
    }

    /// Whole days, truncated toward zero.
    pub fn num_days(&self) -> i64 {
        self.num_seconds() / SECONDS_PER_DAY
    }

    /// Whole hours, truncated toward zero: 90 minutes is 1 hour, -90 minutes
    /// is -1 hour.
    pub fn num_hours(&self) -> i64 {
        self.num_seconds() / SECONDS_PER_HOUR
    }

    pub fn num_minutes(&self) -> i64 {
        self.num_seconds() / SECONDS_PER_MINUTE
    }

    /// Whole seconds, truncated toward zero.
    pub fn num_seconds(&self) -> i64 {
        if self.secs < 0 && self.nanos > 0 {
            self.secs + 1
        } else {
            self.secs
        }
    }

    /// Whole milliseconds.
    ///
    /// # Errors
    ///
    /// `DurationOverflow` when the count does not fit in `i64`.
    pub fn num_milliseconds(&self) -> Result<i64> {
        self.num_units(NANOS_PER_MILLI, "num_milliseconds")
    }

    pub fn num_microseconds(&self) -> Result<i64> {
        self.num_units(NANOS_PER_MICRO, "num_microseconds")
    }

    pub fn num_nanoseconds(&self) -> Result<i64> {
        self.num_units(1, "num_nanoseconds")
    }

    fn num_units(&self, nanos_per_unit: i64, operation: &str) -> Result<i64> {
        i64::try_from(self.total_nanos() / nanos_per_unit as i128)
            .map_err(|_| Error::duration_overflow(operation))
    }

    /// Nanoseconds beyond `num_seconds()`, carrying the sign of the duration.
    pub fn subsec_nanos(&self) -> i32 {
        if self.secs < 0 && self.nanos > 0 {
            self.nanos as i32 - NANOS_PER_SECOND as i32
        } else {
            self.nanos as i32
        }
    }

    pub fn is_zero(&self) -> bool {
        self.secs == 0 && self.nanos == 0
    }

    pub fn is_negative(&self) -> bool {
        self.secs < 0
    }

    /// Converts to a standard library duration.
    ///
    /// # Errors
    ///
    /// `OutOfRange` for negative durations.
    pub fn to_std(&self) -> Result<std::time::Duration> {
        if self.secs < 0 {
            return Err(Error::out_of_range(format!(
                "negative duration {self} as std::time::Duration"
            )));
        }
        Ok(std::time::Duration::new(self.secs as u64, self.nanos))
    }

    /// Breaks the magnitude into day/hour/minute/second/nanosecond fields.
    pub fn parts(&self) -> DurationSpecs {
        let magnitude = self.total_nanos().unsigned_abs();
        let total_secs = magnitude / NANOS_PER_SECOND as u128;
        DurationSpecs {
            days: (total_secs / SECONDS_PER_DAY as u128) as u64,
            hours: (total_secs % SECONDS_PER_DAY as u128 / SECONDS_PER_HOUR as u128) as u32,
            minutes: (total_secs % SECONDS_PER_HOUR as u128 / SECONDS_PER_MINUTE as u128) as u32,
            seconds: (total_secs % SECONDS_PER_MINUTE as u128) as u32,
            nanos: (magnitude % NANOS_PER_SECOND as u128) as u32,
            is_negative: self.is_negative(),
        }
    }
}

// Arithmetic
impl Duration {
    pub fn checked_add(self, rhs: Duration) -> Result<Duration> {
        Duration::from_total(self.total_nanos() + rhs.total_nanos(), "add")
    }

    pub fn checked_sub(self, rhs: Duration) -> Result<Duration> {
        Duration::from_total(self.total_nanos() - rhs.total_nanos(), "sub")
    }

    /// Total, since the range is symmetric.
    pub const fn negated(self) -> Duration {
        // `secs == i64::MIN` implies `nanos >= 1`, and `!secs` is `-secs - 1`.
        if self.nanos == 0 {
            Duration {
                secs: -self.secs,
                nanos: 0,
            }
        } else {
            Duration {
                secs: !self.secs,
                nanos: NANOS_PER_SECOND as u32 - self.nanos,
            }
        }
    }

    pub fn abs(self) -> Duration {
        if self.is_negative() {
            self.negated()
        } else {
            self
        }
    }

    pub fn checked_mul(self, rhs: i64) -> Result<Duration> {
        let total = self
            .total_nanos()
            .checked_mul(rhs as i128)
            .ok_or_else(|| Error::duration_overflow("mul"))?;
        Duration::from_total(total, "mul")
    }

    /// Divides, truncating toward zero.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a zero divisor.
    pub fn checked_div(self, rhs: i64) -> Result<Duration> {
        crate::verify_arg!(rhs, rhs != 0);
        Duration::from_total(self.total_nanos() / rhs as i128, "div")
    }
}

impl Add for Duration {
    type Output = Result<Duration>;

    fn add(self, rhs: Duration) -> Result<Duration> {
        self.checked_add(rhs)
    }
}

impl Sub for Duration {
    type Output = Result<Duration>;

    fn sub(self, rhs: Duration) -> Result<Duration> {
        self.checked_sub(rhs)
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        self.negated()
    }
}

impl Mul<i64> for Duration {
    type Output = Result<Duration>;

    fn mul(self, rhs: i64) -> Result<Duration> {
        self.checked_mul(rhs)
    }
}

impl Div<i64> for Duration {
    type Output = Result<Duration>;

    fn div(self, rhs: i64) -> Result<Duration> {
        self.checked_div(rhs)
    }
}

impl Bounded for Duration {
    fn min_value() -> Duration {
        Duration::MIN
    }

    fn max_value() -> Duration {
        Duration::MAX
    }
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = Error;

    fn try_from(duration: std::time::Duration) -> Result<Duration> {
        Duration::from_std(duration)
    }
}

/// Field breakdown of a duration's magnitude, see [`Duration::parts`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct DurationSpecs {
    pub days: u64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub nanos: u32,
    pub is_negative: bool,
}

/// `[-][d.]hh:mm:ss[.fffffffff]`
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let specs = self.parts();
        if specs.is_negative {
            f.write_str("-")?;
        }
        if specs.days > 0 {
            write!(f, "{}.", specs.days)?;
        }
        write!(
            f,
            "{:02}:{:02}:{:02}",
            specs.hours, specs.minutes, specs.seconds
        )?;
        if specs.nanos > 0 {
            write!(f, ".{:09}", specs.nanos)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::{Duration, DurationParts};
    use crate::ErrorKind;

    #[test]
    fn test_unit_constructors() {
        assert_eq!(Duration::hours(2).num_minutes(), 120);
        assert_eq!(Duration::weeks(1).num_days(), 7);
        assert_eq!(Duration::days(-3).num_hours(), -72);
        assert_eq!(Duration::milliseconds(-1500).num_seconds(), -1);
        assert_eq!(Duration::milliseconds(-1500).subsec_nanos(), -500_000_000);
        assert_eq!(Duration::microseconds(2_500_000).num_milliseconds().unwrap(), 2_500);
        assert_eq!(Duration::nanoseconds(-1).num_nanoseconds().unwrap(), -1);
        assert_eq!(Duration::nanoseconds(-1).num_seconds(), 0);
        assert!(Duration::try_days(i64::MAX).is_err());
        assert_eq!(Duration::try_days(400).unwrap(), Duration::days(400));
    }

    #[test]
    fn test_truncation_toward_zero() {
        assert_eq!(Duration::minutes(90).num_hours(), 1);
        assert_eq!(Duration::minutes(-90).num_hours(), -1);
        assert_eq!(Duration::hours(-47).num_days(), -1);
        assert_eq!(Duration::days(13).num_weeks(), 1);
    }

    #[test]
    fn test_from_parts() {
        let span = Duration::from_parts(DurationParts {
            days: 1,
            hours: 2,
            minutes: 30,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(span.num_hours(), 26);
        assert_eq!(span.num_minutes(), 26 * 60 + 30);
        let sum = (Duration::hours(2) + span).unwrap();
        assert_eq!(sum.num_hours(), 28);
        assert_eq!((span + Duration::hours(2)).unwrap(), sum);

        let err = Duration::from_parts(DurationParts {
            weeks: i64::MAX,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::DurationOverflow { .. }));
    }

    #[test]
    fn test_overflow() {
        let err = Duration::MAX.checked_add(Duration::nanoseconds(1)).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::DurationOverflow { .. }));
        assert!(Duration::MIN.checked_sub(Duration::nanoseconds(1)).is_err());
        assert_eq!(-Duration::MIN, Duration::MAX);
        assert_eq!(-Duration::MAX, Duration::MIN);
        assert_eq!(Duration::MIN.abs(), Duration::MAX);
        assert_eq!(Duration::MIN.total_nanos(), -Duration::MAX.total_nanos());
        assert_eq!(Duration::seconds(i64::MIN), Duration::MIN);
        assert!(Duration::try_seconds(i64::MIN).is_err());
        assert_eq!(Duration::try_seconds(-5).unwrap(), Duration::seconds(-5));
        assert!(Duration::from_parts(DurationParts {
            seconds: i64::MIN,
            ..Default::default()
        })
        .is_err());
        assert!(Duration::MAX.checked_mul(2).is_err());
        assert!(Duration::seconds(i64::MAX).num_nanoseconds().is_err());
        assert!(Duration::seconds(10).checked_div(0).is_err());
    }

    #[test]
    fn test_mul_div() {
        assert_eq!((Duration::minutes(20) * 3).unwrap(), Duration::hours(1));
        assert_eq!((Duration::hours(1) / 4).unwrap(), Duration::minutes(15));
        assert_eq!((Duration::seconds(1) / -3).unwrap(), Duration::nanoseconds(-333_333_333));
    }

    #[test]
    fn test_ordering_and_sign() {
        assert!(Duration::nanoseconds(-1) < Duration::ZERO);
        assert!(Duration::milliseconds(-1500) < Duration::seconds(-1));
        assert!(Duration::ZERO.is_zero());
        assert!(Duration::nanoseconds(-5).is_negative());
        assert_eq!(Duration::seconds(-5).abs(), Duration::seconds(5));
        assert_eq!(-Duration::milliseconds(1500), Duration::milliseconds(-1500));
        assert_eq!(-Duration::milliseconds(-1500), Duration::milliseconds(1500));
        assert_eq!(-Duration::ZERO, Duration::ZERO);
    }

    #[test]
    fn test_std_conversion() {
        let std = Duration::milliseconds(1500).to_std().unwrap();
        assert_eq!(std, std::time::Duration::from_millis(1500));
        assert_eq!(Duration::from_std(std).unwrap(), Duration::milliseconds(1500));
        assert!(Duration::seconds(-1).to_std().is_err());
        assert!(Duration::from_std(std::time::Duration::from_secs(u64::MAX)).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Duration::hours(2).to_string(), "02:00:00");
        assert_eq!(
            Duration::from_parts(DurationParts {
                days: 1,
                hours: 2,
                minutes: 30,
                seconds: 45,
                milliseconds: 500,
                ..Default::default()
            })
            .unwrap()
            .to_string(),
            "1.02:30:45.500000000"
        );
        assert_eq!(Duration::minutes(-90).to_string(), "-01:30:00");
        assert_eq!(Duration::ZERO.to_string(), "00:00:00");
    }
}
