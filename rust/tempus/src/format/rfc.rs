//! RFC 3339 and RFC 2822 codecs.
//!
//! RFC 3339 output is `YYYY-MM-DDTHH:MM:SS[.fraction]±HH:MM`. Years outside
//! 0..=9999 are written with a sign and at least four digits, and an offset
//! with a seconds component is written as `±HH:MM:SS`; the parser accepts
//! both extensions so every value round-trips.
//!
//! RFC 2822 output is `Dow, DD Mon YYYY HH:MM:SS ±HHMM`. It carries whole
//! seconds only.

use std::fmt;

use tempus_ascii::AsciiBuilder;

use crate::{
    DateTime, FixedOffset, Month, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Weekday,
    error::Error,
    format::{AutoFraction, SecondsFormat, YearText, parse, scan::Scanner},
    result::Result,
};

struct Rfc3339<'a> {
    local: &'a NaiveDateTime,
    offset: FixedOffset,
    seconds: SecondsFormat,
    use_z: bool,
}

impl fmt::Display for Rfc3339<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = self.local;
        write!(
            f,
            "{}-{:02}-{:02}T{:02}:{:02}:{:02}",
            YearText(local.year()),
            local.month(),
            local.day(),
            local.hour(),
            local.minute(),
            local.second()
        )?;
        let nanos = local.nanosecond();
        match self.seconds {
            SecondsFormat::Secs => {}
            SecondsFormat::Millis => write!(f, ".{:03}", nanos / 1_000_000)?,
            SecondsFormat::Micros => write!(f, ".{:06}", nanos / 1_000)?,
            SecondsFormat::Nanos => write!(f, ".{nanos:09}")?,
            SecondsFormat::AutoSi => write!(f, "{}", AutoFraction(nanos))?,
        }
        if self.use_z && self.offset == FixedOffset::UTC {
            f.write_str("Z")
        } else {
            write!(f, "{}", self.offset)
        }
    }
}

pub(crate) fn write_rfc3339(
    local: &NaiveDateTime,
    offset: FixedOffset,
    seconds: SecondsFormat,
    use_z: bool,
) -> String {
    Rfc3339 {
        local,
        offset,
        seconds,
        use_z,
    }
    .to_string()
}

pub(crate) fn write_rfc2822(local: &NaiveDateTime, offset: FixedOffset) -> Result<String> {
    let year = local.year();
    if !(0..=9999).contains(&year) {
        return Err(Error::out_of_range(format!("year {year} in RFC 2822")));
    }
    let (sign, hours, minutes, seconds) = offset.hms();
    if seconds != 0 {
        return Err(Error::invalid_format(
            offset.to_string(),
            "RFC 2822 offsets have minute precision",
        ));
    }
    let mut buf = [0u8; 40];
    let mut b = AsciiBuilder::new(&mut buf);
    let io = |e| Error::io("RFC 2822", e);
    b.append_bytes(local.weekday().short_name().as_bytes()).map_err(io)?;
    b.append_bytes(b", ").map_err(io)?;
    b.append_padded(local.day() as u64, 2).map_err(io)?;
    b.append_char(b' ').map_err(io)?;
    b.append_bytes(local.date().month_of_year().short_name().as_bytes()).map_err(io)?;
    b.append_char(b' ').map_err(io)?;
    b.append_padded(year as u64, 4).map_err(io)?;
    b.append_char(b' ').map_err(io)?;
    b.append_padded(local.hour() as u64, 2).map_err(io)?;
    b.append_char(b':').map_err(io)?;
    b.append_padded(local.minute() as u64, 2).map_err(io)?;
    b.append_char(b':').map_err(io)?;
    b.append_padded(local.second() as u64, 2).map_err(io)?;
    b.append_char(b' ').map_err(io)?;
    b.append_char(sign as u8).map_err(io)?;
    b.append_padded(hours as u64, 2).map_err(io)?;
    b.append_padded(minutes as u64, 2).map_err(io)?;
    Ok(b.as_str().map_err(io)?.to_string())
}

fn logged<T>(result: Result<T>, s: &str, what: &str) -> Result<T> {
    if let Err(e) = &result {
        log::debug!("failed to parse {s:?} as {what}: {e}");
    }
    result
}

/// Parses `YYYY-MM-DDTHH:MM:SS[.fraction](Z|±HH:MM)`.
///
/// `T` may also be lowercase or a single space. Fraction digits beyond the
/// ninth are dropped. The parsed offset is kept as the value's offset.
///
/// # Errors
///
/// `MalformedInput` with the byte position of the first deviation.
///
/// # Examples
///
/// ```
/// # use tempus::DateTime;
/// let dt = DateTime::parse_from_rfc3339("2024-12-25T15:30:45.123-08:00").unwrap();
/// assert_eq!(dt.offset().local_minus_utc(), -8 * 3600);
/// assert_eq!(dt.nanosecond(), 123_000_000);
/// assert!(DateTime::parse_from_rfc3339("2024-12-25 15:30:45").is_err());
/// ```
pub fn parse_from_rfc3339(s: &str) -> Result<DateTime<FixedOffset>> {
    logged(rfc3339(s), s, "RFC 3339")
}

fn rfc3339(s: &str) -> Result<DateTime<FixedOffset>> {
    let mut sc = Scanner::new(s);

    let date_start = sc.pos();
    let year = if sc.eat(b'-') {
        -(sc.digits(4, 6, "year")? as i64)
    } else if sc.eat(b'+') {
        sc.digits(4, 6, "year")? as i64
    } else {
        sc.digits(4, 4, "year")? as i64
    };
    sc.expect(b'-')?;
    let month = sc.digits(2, 2, "month")? as u32;
    sc.expect(b'-')?;
    let day = sc.digits(2, 2, "day")? as u32;
    let date = NaiveDate::from_ymd(year as i32, month, day)
        .map_err(|e| sc.error_at(date_start, e.to_string()))?;

    if !(sc.eat(b'T') || sc.eat(b't') || sc.eat(b' ')) {
        return Err(sc.error("expected 'T' between date and time"));
    }

    let time_start = sc.pos();
    let hour = sc.digits(2, 2, "hour")? as u32;
    sc.expect(b':')?;
    let minute = sc.digits(2, 2, "minute")? as u32;
    sc.expect(b':')?;
    let second = sc.digits(2, 2, "second")? as u32;
    let nanos = if sc.eat(b'.') {
        sc.fraction(1, usize::MAX)?
    } else {
        0
    };
    let time = NaiveTime::from_hms_nano(hour, minute, second, nanos)
        .map_err(|e| sc.error_at(time_start, e.to_string()))?;

    let offset_start = sc.pos();
    let offset = if sc.eat(b'Z') || sc.eat(b'z') {
        0
    } else {
        parse::offset(&mut sc, true)?
    };
    sc.finish()?;

    let offset =
        FixedOffset::east(offset).map_err(|e| sc.error_at(offset_start, e.to_string()))?;
    offset
        .from_local_datetime(&date.and_time(time))
        .map_err(|e| sc.error_at(date_start, e.to_string()))
}

/// Parses `[Dow, ]D[D] Mon YYYY HH:MM[:SS] zone`.
///
/// Names are matched without regard to case. The zone is `±HHMM`, `GMT`,
/// `UT`, `UTC` or `Z`. A weekday, when present, must agree with the date.
///
/// # Examples
///
/// ```
/// # use tempus::DateTime;
/// let dt = DateTime::parse_from_rfc2822("Wed, 25 Dec 2024 15:30:45 +0000").unwrap();
/// assert_eq!(dt.to_rfc3339(), "2024-12-25T15:30:45+00:00");
/// assert!(DateTime::parse_from_rfc2822("Thu, 25 Dec 2024 15:30:45 +0000").is_err());
/// ```
pub fn parse_from_rfc2822(s: &str) -> Result<DateTime<FixedOffset>> {
    logged(rfc2822(s), s, "RFC 2822")
}

fn rfc2822(s: &str) -> Result<DateTime<FixedOffset>> {
    let mut sc = Scanner::new(s);

    let weekday = if sc.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
        let start = sc.pos();
        let word = sc.word();
        let weekday = Some(word)
            .filter(|w| w.len() == 3)
            .and_then(Weekday::from_name)
            .ok_or_else(|| sc.error_at(start, format!("unknown weekday {word:?}")))?;
        sc.expect(b',')?;
        space(&mut sc)?;
        Some((start, weekday))
    } else {
        None
    };

    let date_start = sc.pos();
    let day = sc.digits(1, 2, "day")? as u32;
    space(&mut sc)?;
    let month_start = sc.pos();
    let word = sc.word();
    let month = Some(word)
        .filter(|w| w.len() == 3)
        .and_then(Month::from_name)
        .ok_or_else(|| sc.error_at(month_start, format!("unknown month {word:?}")))?;
    space(&mut sc)?;
    let year = sc.digits(4, 4, "year")? as i32;
    let date = NaiveDate::from_ymd(year, month.number_from_month(), day)
        .map_err(|e| sc.error_at(date_start, e.to_string()))?;
    if let Some((start, weekday)) = weekday {
        if weekday != date.weekday() {
            return Err(sc.error_at(
                start,
                format!("{weekday} does not match {date}, a {}", date.weekday()),
            ));
        }
    }
    space(&mut sc)?;

    let hour = sc.digits(2, 2, "hour")? as u32;
    sc.expect(b':')?;
    let minute = sc.digits(2, 2, "minute")? as u32;
    let second = if sc.eat(b':') {
        sc.digits(2, 2, "second")? as u32
    } else {
        0
    };
    let time = NaiveTime::from_hms(hour, minute, second)
        .map_err(|e| sc.error_at(date_start, e.to_string()))?;
    space(&mut sc)?;

    let zone_start = sc.pos();
    let sign = match sc.peek() {
        Some(b'+') => Some(1),
        Some(b'-') => Some(-1),
        _ => None,
    };
    let offset = if let Some(sign) = sign {
        sc.eat(b'+');
        sc.eat(b'-');
        let hhmm = sc.digits(4, 4, "offset")? as i64;
        let (hours, minutes) = (hhmm / 100, hhmm % 100);
        if hours > 23 || minutes > 59 {
            return Err(sc.error_at(zone_start, format!("offset {hhmm:04} out of range")));
        }
        sign * (hours * 3600 + minutes * 60)
    } else {
        let word = sc.word();
        if ["GMT", "UT", "UTC", "Z"]
            .iter()
            .any(|zone| zone.eq_ignore_ascii_case(word))
        {
            0
        } else {
            return Err(sc.error_at(zone_start, format!("unknown zone {word:?}")));
        }
    };
    sc.finish()?;

    let offset = FixedOffset::east(offset as i32)
        .map_err(|e| sc.error_at(zone_start, e.to_string()))?;
    offset
        .from_local_datetime(&date.and_time(time))
        .map_err(|e| sc.error_at(date_start, e.to_string()))
}

/// Tokens are separated by exactly one space.
fn space(sc: &mut Scanner) -> Result<()> {
    sc.expect(b' ')
}

#[cfg(test)]
mod tests {
    use super::{parse_from_rfc2822, parse_from_rfc3339, write_rfc2822, write_rfc3339};
    use crate::{ErrorKind, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, nano: u32) -> NaiveDateTime {
        NaiveDate::from_ymd(y, mo, d)
            .unwrap()
            .and_hms_nano(h, mi, s, nano)
            .unwrap()
    }

    fn position(err: &crate::Error) -> usize {
        match err.kind() {
            ErrorKind::MalformedInput { position, .. } => *position,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_write_rfc3339_seconds_formats() {
        let local = dt(2024, 12, 25, 15, 30, 45, 123_456_000);
        let utc = FixedOffset::UTC;
        let cases = [
            (SecondsFormat::Secs, "2024-12-25T15:30:45+00:00"),
            (SecondsFormat::Millis, "2024-12-25T15:30:45.123+00:00"),
            (SecondsFormat::Micros, "2024-12-25T15:30:45.123456+00:00"),
            (SecondsFormat::Nanos, "2024-12-25T15:30:45.123456000+00:00"),
            (SecondsFormat::AutoSi, "2024-12-25T15:30:45.123456+00:00"),
        ];
        for (format, expected) in cases {
            assert_eq!(write_rfc3339(&local, utc, format, false), expected);
        }
        assert_eq!(
            write_rfc3339(&local, utc, SecondsFormat::Secs, true),
            "2024-12-25T15:30:45Z"
        );
        let east = FixedOffset::east(5 * 3600).unwrap();
        assert_eq!(
            write_rfc3339(&local, east, SecondsFormat::Secs, true),
            "2024-12-25T15:30:45+05:00"
        );
    }

    #[test]
    fn test_rfc3339_extended_years() {
        let local = dt(-1, 1, 1, 0, 0, 0, 0);
        let text = write_rfc3339(&local, FixedOffset::UTC, SecondsFormat::AutoSi, true);
        assert_eq!(text, "-0001-01-01T00:00:00Z");
        assert_eq!(parse_from_rfc3339(&text).unwrap().naive_local(), local);

        let local = dt(12345, 6, 7, 8, 9, 10, 0);
        let text = write_rfc3339(&local, FixedOffset::UTC, SecondsFormat::AutoSi, true);
        assert_eq!(text, "+12345-06-07T08:09:10Z");
        assert_eq!(parse_from_rfc3339(&text).unwrap().naive_local(), local);
    }

    #[test]
    fn test_parse_rfc3339_variants() {
        let a = parse_from_rfc3339("2024-12-25T15:30:45Z").unwrap();
        let b = parse_from_rfc3339("2024-12-25t15:30:45z").unwrap();
        let c = parse_from_rfc3339("2024-12-25 16:30:45+01:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(c.offset().local_minus_utc(), 3600);

        let long = parse_from_rfc3339("2024-12-25T15:30:45.1234567891Z").unwrap();
        assert_eq!(long.nanosecond(), 123_456_789);

        let odd = parse_from_rfc3339("2024-12-25T15:30:45+05:30:15").unwrap();
        assert_eq!(odd.offset().local_minus_utc(), 5 * 3600 + 30 * 60 + 15);
    }

    #[test]
    fn test_parse_rfc3339_errors() {
        let cases = [
            ("2024-13-01T00:00:00Z", 0),
            ("2024-02-30T00:00:00Z", 0),
            ("2024-12-25T24:00:00Z", 11),
            ("2024-12-25T23:59:60Z", 11),
            ("2024-12-25X15:30:45Z", 10),
            ("2024-12-25T15:30:45", 19),
            ("2024-12-25T15:30:45+0500", 22),
            ("2024-12-25T15:30:45Z ", 20),
            ("24-12-25T15:30:45Z", 0),
            ("2024-12-25T15:30:45.Z", 20),
            ("", 0),
        ];
        for (input, expected) in cases {
            let err = parse_from_rfc3339(input).unwrap_err();
            assert_eq!(position(&err), expected, "{input}");
        }
    }

    #[test]
    fn test_write_rfc2822() {
        let local = dt(2024, 12, 25, 15, 30, 45, 999);
        let text = write_rfc2822(&local, FixedOffset::west(8 * 3600).unwrap()).unwrap();
        assert_eq!(text, "Wed, 25 Dec 2024 15:30:45 -0800");
        let local = dt(2024, 3, 5, 1, 2, 3, 0);
        assert_eq!(
            write_rfc2822(&local, FixedOffset::UTC).unwrap(),
            "Tue, 05 Mar 2024 01:02:03 +0000"
        );

        let far = dt(10000, 1, 1, 0, 0, 0, 0);
        let err = write_rfc2822(&far, FixedOffset::UTC).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OutOfRange { .. }));
        let err = write_rfc2822(&local, FixedOffset::east(30).unwrap()).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidFormat { .. }));
    }

    #[test]
    fn test_parse_rfc2822_variants() {
        let full = parse_from_rfc2822("Wed, 25 Dec 2024 15:30:45 +0000").unwrap();
        let cases = [
            "25 Dec 2024 15:30:45 GMT",
            "wed, 25 dec 2024 15:30:45 UT",
            "Wed, 25 DEC 2024 15:30:45 utc",
            "Wed, 25 Dec 2024 16:30:45 +0100",
            "Wed, 25 Dec 2024 15:30:45 Z",
        ];
        for input in cases {
            assert_eq!(parse_from_rfc2822(input).unwrap(), full, "{input}");
        }
        let short = parse_from_rfc2822("Tue, 5 Mar 2024 01:02 -0330").unwrap();
        assert_eq!(short.to_rfc3339(), "2024-03-05T01:02:00-03:30");
    }

    #[test]
    fn test_parse_rfc2822_errors() {
        let cases = [
            ("Thu, 25 Dec 2024 15:30:45 +0000", 0),
            ("Wednesday, 25 Dec 2024 15:30:45 +0000", 0),
            ("Wed, 25 December 2024 15:30:45 +0000", 8),
            ("Wed, 32 Dec 2024 15:30:45 +0000", 5),
            ("Wed, 25 Dec 2024 15:30:45 EST", 26),
            ("Wed, 25 Dec 2024 15:30:45 +2400", 26),
            ("Wed, 25 Dec 2024 15:30:45", 25),
            ("Wed 25 Dec 2024 15:30:45 +0000", 3),
            ("Wed,  25 Dec 2024 15:30:45 +0000", 5),
            ("Wed,\t25 Dec 2024 15:30:45 +0000", 4),
            ("Wed, 25 Dec 2024\t15:30:45 +0000", 16),
            ("Wed, 25 Dec 2024 15:30:45  +0000", 26),
            ("Wed, 25 Dec 2024 15:30:45 +0000 ", 31),
        ];
        for (input, expected) in cases {
            let err = parse_from_rfc2822(input).unwrap_err();
            assert_eq!(position(&err), expected, "{input}");
        }
    }
}
