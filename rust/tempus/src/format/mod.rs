//! Text formatting and parsing.
//!
//! Three modes share one engine: RFC 3339, RFC 2822, and strftime-style
//! patterns. A pattern is compiled once into a list of [`Item`]s by a small
//! state machine; formatting writes each item in turn and parsing consumes
//! input item by item, so every specifier behaves the same in both
//! directions.
//!
//! # Pattern specifiers
//!
//! | Spec | Meaning | Example |
//! |---|---|---|
//! | `%Y` | year, at least 4 digits; signed outside 0..=9999 | `2024`, `+12345` |
//! | `%C` | year divided by 100 | `20` |
//! | `%y` | year modulo 100; parses 00-69 as 20xx, 70-99 as 19xx | `24` |
//! | `%G`, `%g` | ISO week-year, full and modulo 100 | `2025`, `25` |
//! | `%V` | ISO week number | `01` |
//! | `%m` | month | `07` |
//! | `%b`, `%h` | abbreviated month name | `Jul` |
//! | `%B` | full month name | `July` |
//! | `%d` | day of month | `05` |
//! | `%e` | day of month, space padded | ` 5` |
//! | `%j` | day of year | `187` |
//! | `%a` | abbreviated weekday name | `Fri` |
//! | `%A` | full weekday name | `Friday` |
//! | `%u` | weekday, Monday = 1 | `5` |
//! | `%w` | weekday, Sunday = 0 | `5` |
//! | `%H`, `%k` | hour 00-23, zero and space padded | `07`, ` 7` |
//! | `%I`, `%l` | hour 01-12, zero and space padded | `07`, ` 7` |
//! | `%p`, `%P` | `AM`/`PM`, `am`/`pm` | `PM` |
//! | `%M` | minute | `09` |
//! | `%S` | second | `05` |
//! | `%f` | nanoseconds, 9 digits | `026490000` |
//! | `%3f`, `%6f`, `%9f` | fraction with fixed digits | `026` |
//! | `%.f` | `.` and 3, 6 or 9 digits; empty when zero | `.026490` |
//! | `%.3f`, `%.6f`, `%.9f` | `.` and fixed digits | `.026` |
//! | `%z` | offset `+HHMM` | `+0930` |
//! | `%:z` | offset `+HH:MM` | `+09:30` |
//! | `%Z` | zone label; parses `UTC`, `GMT`, `Z` or `+HH:MM` | `UTC` |
//! | `%s` | seconds since the Unix epoch | `994518299` |
//! | `%D` | `%m/%d/%y` | `07/08/01` |
//! | `%F` | `%Y-%m-%d` | `2001-07-08` |
//! | `%T` | `%H:%M:%S` | `00:34:59` |
//! | `%R` | `%H:%M` | `00:34` |
//! | `%n`, `%t`, `%%` | newline, tab, percent sign | |
//!
//! Numeric specifiers accept a padding flag after `%`: `-` suppresses
//! padding, `_` pads with spaces, `0` pads with zeros. Offsets with a
//! non-zero seconds component are written with a trailing `SS` field.

mod items;
mod parse;
mod parsed;
mod rfc;
mod scan;

use std::borrow::Cow;
use std::fmt;
use std::io;

use smallvec::SmallVec;

use crate::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, error::Error, result::Result,
};

pub use items::{Item, Pad};
pub use rfc::{parse_from_rfc2822, parse_from_rfc3339};

pub(crate) use rfc::{write_rfc2822, write_rfc3339};

/// Fraction digits used by [`DateTime::to_rfc3339_opts`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SecondsFormat {
    /// No fraction.
    Secs,
    /// Always 3 digits.
    Millis,
    /// Always 6 digits.
    Micros,
    /// Always 9 digits.
    Nanos,
    /// 3, 6 or 9 digits as needed; no fraction when zero.
    AutoSi,
}

/// The components a value exposes to the formatter.
#[derive(Clone, Debug, Default)]
pub struct FormatFields {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub offset: Option<FixedOffset>,
    /// Zone label written by `%Z`; defaults to the offset.
    pub label: Option<Cow<'static, str>>,
}

/// A value that can be written through a [`DateTimeFormat`].
pub trait Formattable {
    fn format_fields(&self) -> FormatFields;
}

/// A compiled format pattern with a reusable output buffer.
///
/// # Examples
///
/// ```
/// # use tempus::{DateTimeFormat, NaiveDateTime};
/// let mut format = DateTimeFormat::new("%Y/%m/%d %I:%M %p").unwrap();
/// let dt = NaiveDateTime::from_ymd_hms(2024, 12, 25, 15, 30, 45).unwrap();
/// assert_eq!(format.render(&dt).unwrap(), "2024/12/25 03:30 PM");
///
/// let parsed = format.parse_naive_datetime("2024/12/25 03:30 PM").unwrap();
/// assert_eq!(parsed, NaiveDateTime::from_ymd_hms(2024, 12, 25, 15, 30, 0).unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct DateTimeFormat {
    items: Vec<Item>,
    buf: SmallVec<[u8; 256]>,
}

impl DateTimeFormat {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` for an unknown or incomplete specifier.
    pub fn new(pattern: &str) -> Result<DateTimeFormat> {
        Ok(DateTimeFormat::from_items(items::tokenize(pattern)?))
    }

    pub fn from_items(items: Vec<Item>) -> DateTimeFormat {
        DateTimeFormat {
            items,
            buf: SmallVec::new(),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Writes `value` to `w`.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` if the pattern needs a field the value does not carry,
    /// such as `%H` for a [`NaiveDate`]; `Io` if the writer fails.
    pub fn write<V, W>(&self, value: &V, w: &mut W) -> Result<()>
    where
        V: Formattable + ?Sized,
        W: io::Write,
    {
        let fields = value.format_fields();
        for item in &self.items {
            item.write(&fields, w)?;
        }
        Ok(())
    }

    /// Formats `value` into the internal buffer and returns the text.
    pub fn render<V: Formattable + ?Sized>(&mut self, value: &V) -> Result<&str> {
        let mut buf = std::mem::take(&mut self.buf);
        buf.clear();
        let written = self.write(value, &mut buf);
        self.buf = buf;
        written?;
        std::str::from_utf8(&self.buf)
            .map_err(|e| Error::invalid_format("pattern", e.to_string()))
    }

    pub fn parse_date(&self, s: &str) -> Result<NaiveDate> {
        parse::parse(s, &self.items)?.to_naive_date()
    }

    pub fn parse_time(&self, s: &str) -> Result<NaiveTime> {
        parse::parse(s, &self.items)?.to_naive_time()
    }

    pub fn parse_naive_datetime(&self, s: &str) -> Result<NaiveDateTime> {
        parse::parse(s, &self.items)?.to_naive_datetime()
    }

    /// Parses a value that must include an offset (`%z`, `%:z` or `%Z`).
    pub fn parse_datetime(&self, s: &str) -> Result<DateTime<FixedOffset>> {
        parse::parse(s, &self.items)?.to_datetime()
    }
}

/// Formats `value` with `pattern` in one step.
pub fn format_with_pattern<V: Formattable + ?Sized>(value: &V, pattern: &str) -> Result<String> {
    let format = DateTimeFormat::new(pattern)?;
    let mut out = Vec::with_capacity(pattern.len() + 16);
    format.write(value, &mut out)?;
    String::from_utf8(out).map_err(|e| Error::invalid_format(pattern, e.to_string()))
}

fn logged<T>(result: Result<T>, s: &str, pattern: &str) -> Result<T> {
    if let Err(e) = &result {
        log::debug!("failed to parse {s:?} with pattern {pattern:?}: {e}");
    }
    result
}

/// Parses a naive date and time; an offset in the input is ignored.
pub fn parse_datetime(s: &str, pattern: &str) -> Result<NaiveDateTime> {
    logged(
        DateTimeFormat::new(pattern).and_then(|f| f.parse_naive_datetime(s)),
        s,
        pattern,
    )
}

pub fn parse_date(s: &str, pattern: &str) -> Result<NaiveDate> {
    logged(
        DateTimeFormat::new(pattern).and_then(|f| f.parse_date(s)),
        s,
        pattern,
    )
}

pub fn parse_time(s: &str, pattern: &str) -> Result<NaiveTime> {
    logged(
        DateTimeFormat::new(pattern).and_then(|f| f.parse_time(s)),
        s,
        pattern,
    )
}

/// Parses an instant; the pattern must contain an offset specifier.
pub fn parse_zoned(s: &str, pattern: &str) -> Result<DateTime<FixedOffset>> {
    logged(
        DateTimeFormat::new(pattern).and_then(|f| f.parse_datetime(s)),
        s,
        pattern,
    )
}

/// `%Y` rendering: 4 digits within 0..=9999, otherwise signed.
pub(crate) struct YearText(pub i32);

impl fmt::Display for YearText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (0..=9999).contains(&self.0) {
            write!(f, "{:04}", self.0)
        } else {
            write!(f, "{:+05}", self.0)
        }
    }
}

/// `%.f` rendering: empty for zero, else `.` and 3, 6 or 9 digits.
pub(crate) struct AutoFraction(pub u32);

impl fmt::Display for AutoFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nanos = self.0;
        if nanos == 0 {
            Ok(())
        } else if nanos % 1_000_000 == 0 {
            write!(f, ".{:03}", nanos / 1_000_000)
        } else if nanos % 1_000 == 0 {
            write!(f, ".{:06}", nanos / 1_000)
        } else {
            write!(f, ".{nanos:09}")
        }
    }
}

pub(crate) fn write_year<W: fmt::Write + ?Sized>(w: &mut W, year: i32) -> fmt::Result {
    write!(w, "{}", YearText(year))
}

pub(crate) fn write_auto_fraction<W: fmt::Write + ?Sized>(w: &mut W, nanos: u32) -> fmt::Result {
    write!(w, "{}", AutoFraction(nanos))
}
