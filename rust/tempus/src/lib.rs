//! Calendar and clock types with exact proleptic Gregorian arithmetic.
//!
//! The crate provides naive (offset-free) dates and times, offset-aware
//! instants, a nanosecond [`Duration`], and a bidirectional text engine for
//! RFC 3339, RFC 2822 and strftime-style patterns.
//!
//! ```
//! # use tempus::{NaiveDate, Duration};
//! let date = NaiveDate::from_ymd(2024, 1, 1).unwrap();
//! let later = (date + Duration::days(100)).unwrap();
//! assert_eq!(later.to_string(), "2024-04-10");
//! ```

pub mod calendar;
pub mod clock;
pub mod date;
pub mod datetime;
pub mod duration;
pub mod error;
pub mod format;
pub mod month;
pub mod naive_datetime;
pub mod offset;
pub mod result;
pub mod time;
pub mod weekday;

#[cfg(feature = "serde")]
mod serde_impls;


pub use clock::{Clock, FixedClock, SystemClock, Timestamp};
pub use date::{IsoWeek, NaiveDate};
pub use datetime::DateTime;
pub use duration::{Duration, DurationParts, DurationSpecs};
pub use error::{Error, ErrorKind};
pub use format::{DateTimeFormat, SecondsFormat};
pub use month::Month;
pub use naive_datetime::NaiveDateTime;
pub use offset::{FixedOffset, Local, OffsetResolver, TimeZone, Utc};
pub use result::Result;
pub use time::NaiveTime;
pub use weekday::Weekday;

pub const NANOS_PER_MICRO: i64 = 1_000;
pub const NANOS_PER_MILLI: i64 = 1_000_000;
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub const MICROS_PER_SECOND: i64 = 1_000_000;
pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const SECONDS_PER_WEEK: i64 = 604_800;
pub const NANOS_PER_DAY: i64 = SECONDS_PER_DAY * NANOS_PER_SECOND;

pub const DAYS_PER_400_YEARS: i64 = 146_097;

/// Earliest representable year.
pub const MIN_YEAR: i32 = -262_143;
/// Latest representable year.
pub const MAX_YEAR: i32 = 262_142;

/// Zero-based index of Monday, the first day of the ISO week.
pub const MONDAY: u8 = 0;
pub const TUESDAY: u8 = 1;
pub const WEDNESDAY: u8 = 2;
pub const THURSDAY: u8 = 3;
pub const FRIDAY: u8 = 4;
pub const SATURDAY: u8 = 5;
pub const SUNDAY: u8 = 6;

/// One-based number of January.
pub const JANUARY: u8 = 1;
pub const FEBRUARY: u8 = 2;
pub const MARCH: u8 = 3;
pub const APRIL: u8 = 4;
pub const MAY: u8 = 5;
pub const JUNE: u8 = 6;
pub const JULY: u8 = 7;
pub const AUGUST: u8 = 8;
pub const SEPTEMBER: u8 = 9;
pub const OCTOBER: u8 = 10;
pub const NOVEMBER: u8 = 11;
pub const DECEMBER: u8 = 12;
