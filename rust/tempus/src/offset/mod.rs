//! Offsets from UTC and the time zones built on them.
//!
//! A [`TimeZone`] maps an instant to a [`FixedOffset`]. Three are provided:
//! [`Utc`], [`FixedOffset`] itself, and [`Local`], which asks an injected
//! [`OffsetResolver`] for the offset in effect at each instant.

mod local;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::{
    DateTime, Duration, NaiveDateTime, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
    clock::{Clock, SystemClock, Timestamp},
    error::Error,
    result::Result,
};

pub use local::{HostOffsetResolver, Local};

/// Maps instants to the offset in effect.
pub trait TimeZone: Clone + fmt::Debug {
    /// The offset in effect at the UTC instant `utc`.
    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> Result<FixedOffset>;

    /// The offset to apply to the local civil time `local`.
    ///
    /// The default resolves in two passes: the offset at `local` read as UTC
    /// gives a first guess of the instant, and the offset at that guess is
    /// the answer. For a fixed offset both passes agree.
    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> Result<FixedOffset> {
        let guess = self.offset_from_utc_datetime(local)?;
        let utc = local.checked_sub_signed(guess.as_duration())?;
        self.offset_from_utc_datetime(&utc)
    }

    /// Label written after a date and time, such as `UTC` or `+05:00`.
    fn label(&self, offset: FixedOffset) -> Cow<'static, str> {
        Cow::Owned(offset.to_string())
    }

    fn from_utc_datetime(&self, utc: &NaiveDateTime) -> Result<DateTime<Self>> {
        let offset = self.offset_from_utc_datetime(utc)?;
        DateTime::from_parts(*utc, offset, self.clone())
    }

    /// Attaches this zone to a local civil time.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if the corresponding UTC instant is not representable,
    /// `OffsetResolution` if the zone cannot provide an offset.
    fn from_local_datetime(&self, local: &NaiveDateTime) -> Result<DateTime<Self>> {
        let offset = self.offset_from_local_datetime(local)?;
        let utc = local.checked_sub_signed(offset.as_duration())?;
        DateTime::from_parts(utc, offset, self.clone())
    }

    /// The instant `secs` seconds and `nanos` nanoseconds after the Unix
    /// epoch, in this zone.
    fn timestamp(&self, secs: i64, nanos: u32) -> Result<DateTime<Self>> {
        self.from_utc_datetime(&NaiveDateTime::from_timestamp(secs, nanos)?)
    }
}

/// An offset from UTC of less than 24 hours, in seconds east of Greenwich.
///
/// # Examples
///
/// ```
/// # use tempus::FixedOffset;
/// let ist = FixedOffset::east(5 * 3600 + 30 * 60).unwrap();
/// assert_eq!(ist.to_string(), "+05:30");
/// assert_eq!("+0530".parse::<FixedOffset>().unwrap(), ist);
/// assert!(FixedOffset::east(86_400).is_err());
/// ```
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FixedOffset {
    local_minus_utc: i32,
}

impl FixedOffset {
    pub const UTC: FixedOffset = FixedOffset { local_minus_utc: 0 };

    /// An offset `seconds` east of UTC.
    ///
    /// # Errors
    ///
    /// `InvalidOffset` unless `|seconds| < 86_400`.
    pub fn east(seconds: i32) -> Result<FixedOffset> {
        if (seconds as i64).abs() >= SECONDS_PER_DAY {
            return Err(Error::invalid_offset(seconds as i64));
        }
        Ok(FixedOffset {
            local_minus_utc: seconds,
        })
    }

    /// An offset `seconds` west of UTC.
    pub fn west(seconds: i32) -> Result<FixedOffset> {
        if (seconds as i64).abs() >= SECONDS_PER_DAY {
            return Err(Error::invalid_offset(-(seconds as i64)));
        }
        Ok(FixedOffset {
            local_minus_utc: -seconds,
        })
    }

    pub fn local_minus_utc(&self) -> i32 {
        self.local_minus_utc
    }

    pub fn utc_minus_local(&self) -> i32 {
        -self.local_minus_utc
    }

    pub fn as_duration(&self) -> Duration {
        Duration::seconds(self.local_minus_utc as i64)
    }

    /// Sign and the hour, minute and second fields of the magnitude.
    pub(crate) fn hms(&self) -> (char, u32, u32, u32) {
        let sign = if self.local_minus_utc < 0 { '-' } else { '+' };
        let secs = self.local_minus_utc.unsigned_abs();
        (
            sign,
            secs / SECONDS_PER_HOUR as u32,
            secs / SECONDS_PER_MINUTE as u32 % 60,
            secs % 60,
        )
    }
}

impl TimeZone for FixedOffset {
    fn offset_from_utc_datetime(&self, _utc: &NaiveDateTime) -> Result<FixedOffset> {
        Ok(*self)
    }

    fn offset_from_local_datetime(&self, _local: &NaiveDateTime) -> Result<FixedOffset> {
        Ok(*self)
    }
}

/// `+HH:MM`, or `+HH:MM:SS` when the offset has a seconds component.
impl fmt::Display for FixedOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, hours, minutes, seconds) = self.hms();
        write!(f, "{sign}{hours:02}:{minutes:02}")?;
        if seconds != 0 {
            write!(f, ":{seconds:02}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for FixedOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for FixedOffset {
    type Err = Error;

    /// Accepts `Z`, `±HH`, `±HHMM`, `±HH:MM` and `±HH:MM:SS`.
    fn from_str(s: &str) -> Result<FixedOffset> {
        if s.eq_ignore_ascii_case("z") {
            return Ok(FixedOffset::UTC);
        }
        let bytes = s.as_bytes();
        let sign = match bytes.first() {
            Some(b'+') => 1,
            Some(b'-') => -1,
            _ => return Err(Error::malformed(0, "offset must start with '+' or '-'")),
        };
        let mut fields = [0u32; 3];
        let mut count = 0;
        let mut pos = 1;
        while pos < bytes.len() {
            if count > 0 && bytes[pos] == b':' {
                pos += 1;
            }
            match bytes.get(pos..pos + 2) {
                Some(&[a, b]) if a.is_ascii_digit() && b.is_ascii_digit() && count < 3 => {
                    fields[count] = ((a - b'0') * 10 + (b - b'0')) as u32;
                    count += 1;
                    pos += 2;
                }
                _ => return Err(Error::malformed(pos, "expected two offset digits")),
            }
        }
        let [hours, minutes, seconds] = fields;
        if count == 0 || hours > 23 || minutes > 59 || seconds > 59 {
            return Err(Error::malformed(0, format!("invalid offset {s:?}")));
        }
        let total = (hours * 3600 + minutes * 60 + seconds) as i32;
        FixedOffset::east(sign * total)
    }
}

/// Coordinated Universal Time.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Utc;

impl Utc {
    /// The current instant read from the system clock.
    pub fn now() -> Result<DateTime<Utc>> {
        Utc::now_from(&SystemClock)
    }

    /// The current instant read from `clock`.
    pub fn now_from(clock: &dyn Clock) -> Result<DateTime<Utc>> {
        Ok(NaiveDateTime::from_unix(clock.now())?.and_utc())
    }
}

impl TimeZone for Utc {
    fn offset_from_utc_datetime(&self, _utc: &NaiveDateTime) -> Result<FixedOffset> {
        Ok(FixedOffset::UTC)
    }

    fn offset_from_local_datetime(&self, _local: &NaiveDateTime) -> Result<FixedOffset> {
        Ok(FixedOffset::UTC)
    }

    fn label(&self, _offset: FixedOffset) -> Cow<'static, str> {
        Cow::Borrowed("UTC")
    }
}

/// Answers which offset from UTC is in effect at an instant.
///
/// [`Local`] delegates to a resolver so the host zone database can be
/// replaced in tests or on platforms without one.
pub trait OffsetResolver: Send + Sync {
    fn offset_at(&self, instant: Timestamp) -> Result<FixedOffset>;
}

impl OffsetResolver for FixedOffset {
    fn offset_at(&self, _instant: Timestamp) -> Result<FixedOffset> {
        Ok(*self)
    }
}

impl<F> OffsetResolver for F
where
    F: Fn(Timestamp) -> Result<FixedOffset> + Send + Sync,
{
    fn offset_at(&self, instant: Timestamp) -> Result<FixedOffset> {
        self(instant)
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedOffset, TimeZone, Utc};
    use crate::{ErrorKind, FixedClock, NaiveDateTime};

    #[test]
    fn test_fixed_offset_bounds() {
        assert_eq!(FixedOffset::east(86_399).unwrap().local_minus_utc(), 86_399);
        assert_eq!(FixedOffset::west(86_399).unwrap().local_minus_utc(), -86_399);
        let err = FixedOffset::east(-86_400).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidOffset { seconds: -86_400 }));
        assert!(FixedOffset::west(i32::MIN).is_err());
    }

    #[test]
    fn test_fixed_offset_display() {
        assert_eq!(FixedOffset::UTC.to_string(), "+00:00");
        assert_eq!(FixedOffset::west(3 * 3600 + 30 * 60).unwrap().to_string(), "-03:30");
        assert_eq!(FixedOffset::east(3600 + 61).unwrap().to_string(), "+01:01:01");
        assert_eq!(FixedOffset::west(45).unwrap().to_string(), "-00:00:45");
    }

    #[test]
    fn test_fixed_offset_from_str() {
        let five = FixedOffset::east(5 * 3600).unwrap();
        assert_eq!("+05".parse::<FixedOffset>().unwrap(), five);
        assert_eq!("+0500".parse::<FixedOffset>().unwrap(), five);
        assert_eq!("+05:00".parse::<FixedOffset>().unwrap(), five);
        assert_eq!("z".parse::<FixedOffset>().unwrap(), FixedOffset::UTC);
        assert_eq!(
            "-01:01:01".parse::<FixedOffset>().unwrap().local_minus_utc(),
            -3661
        );
        for bad in ["", "05:00", "+5", "+24:00", "+05:60", "+05:00:00:00", "+05:"] {
            assert!(bad.parse::<FixedOffset>().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_local_resolution_fixed() {
        let offset = FixedOffset::east(-7 * 3600).unwrap();
        let local = NaiveDateTime::from_ymd_hms(2024, 7, 1, 12, 0, 0).unwrap();
        let dt = offset.from_local_datetime(&local).unwrap();
        assert_eq!(dt.naive_utc(), NaiveDateTime::from_ymd_hms(2024, 7, 1, 19, 0, 0).unwrap());
        assert_eq!(dt.naive_local(), local);
    }

    #[test]
    fn test_utc_now_from() {
        let now = Utc::now_from(&FixedClock::new(1_703_520_645, 5)).unwrap();
        assert_eq!(now.timestamp(), 1_703_520_645);
        assert_eq!(now.nanosecond(), 5);
        assert_eq!(Utc.label(FixedOffset::UTC), "UTC");
    }
}
