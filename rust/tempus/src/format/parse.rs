use crate::{
    Month, Weekday,
    format::{
        Item, Pad,
        parsed::{Parsed, set},
        scan::Scanner,
    },
    result::Result,
};

/// Matches `input` against `items` and collects the fields it names.
///
/// Fails with `MalformedInput` at the first deviation, reporting the byte
/// position where the offending token starts.
pub(crate) fn parse(input: &str, items: &[Item]) -> Result<Parsed> {
    let mut s = Scanner::new(input);
    let mut parsed = Parsed {
        end: input.len(),
        ..Default::default()
    };
    for item in items {
        parse_item(&mut s, item, &mut parsed)?;
    }
    s.finish()?;
    Ok(parsed)
}

/// Reads an unsigned field within `min..=max`, skipping leading spaces for
/// space-padded items.
fn number(
    s: &mut Scanner,
    pad: Pad,
    digits: usize,
    range: (u32, u32),
    what: &str,
) -> Result<u32> {
    if pad == Pad::Space {
        s.skip_spaces();
    }
    let start = s.pos();
    let value = s.digits(1, digits, what)?;
    let (min, max) = range;
    if value < min as u64 || value > max as u64 {
        return Err(s.error_at(start, format!("{what} {value} out of range {min}..={max}")));
    }
    Ok(value as u32)
}

/// Reads a year: up to 4 digits, or a sign followed by up to 6.
fn year(s: &mut Scanner, pad: Pad) -> Result<i32> {
    if pad == Pad::Space {
        s.skip_spaces();
    }
    let sign = if s.eat(b'-') {
        Some(-1)
    } else if s.eat(b'+') {
        Some(1)
    } else {
        None
    };
    match sign {
        Some(sign) => Ok(sign * s.digits(1, 6, "year")? as i32),
        None => Ok(s.digits(1, 4, "year")? as i32),
    }
}

fn assign<T: PartialEq + Copy>(
    s: &Scanner,
    start: usize,
    slot: &mut Option<T>,
    value: T,
    what: &str,
) -> Result<()> {
    if set(slot, value) {
        Ok(())
    } else {
        Err(s.error_at(start, format!("conflicting values for {what}")))
    }
}

fn parse_item(s: &mut Scanner, item: &Item, p: &mut Parsed) -> Result<()> {
    let start = s.pos();
    match item {
        Item::Literal(text) => {
            // Whitespace in the pattern matches any non-empty run of whitespace.
            if text.trim().is_empty() && s.skip_whitespace() > 0 {
                return Ok(());
            }
            s.expect_str(text)?;
        }
        Item::Year(pad) => {
            let value = year(s, *pad)?;
            assign(s, start, &mut p.year, value, "year")?;
        }
        Item::Century(pad) => {
            let value = number(s, *pad, 2, (0, 99), "century")? as i32;
            assign(s, start, &mut p.year_div_100, value, "century")?;
        }
        Item::YearMod100(pad) => {
            let value = number(s, *pad, 2, (0, 99), "year")? as i32;
            assign(s, start, &mut p.year_mod_100, value, "year")?;
        }
        Item::IsoYear(pad) => {
            let value = year(s, *pad)?;
            assign(s, start, &mut p.iso_year, value, "ISO year")?;
        }
        Item::IsoYearMod100(pad) => {
            let value = number(s, *pad, 2, (0, 99), "ISO year")? as i32;
            assign(s, start, &mut p.iso_year_mod_100, value, "ISO year")?;
        }
        Item::IsoWeek(pad) => {
            let value = number(s, *pad, 2, (1, 53), "ISO week")?;
            assign(s, start, &mut p.iso_week, value, "ISO week")?;
        }
        Item::Month(pad) => {
            let value = number(s, *pad, 2, (1, 12), "month")?;
            assign(s, start, &mut p.month, value, "month")?;
        }
        Item::MonthShort | Item::MonthLong => {
            let word = s.word();
            let month = Month::from_name(word)
                .ok_or_else(|| s.error_at(start, format!("unknown month name {word:?}")))?;
            assign(s, start, &mut p.month, month.number_from_month(), "month")?;
        }
        Item::Day(pad) => {
            let value = number(s, *pad, 2, (1, 31), "day")?;
            assign(s, start, &mut p.day, value, "day")?;
        }
        Item::Ordinal(pad) => {
            let value = number(s, *pad, 3, (1, 366), "day of year")?;
            assign(s, start, &mut p.ordinal, value, "day of year")?;
        }
        Item::WeekdayShort | Item::WeekdayLong => {
            let word = s.word();
            let weekday = Weekday::from_name(word)
                .ok_or_else(|| s.error_at(start, format!("unknown weekday name {word:?}")))?;
            assign(s, start, &mut p.weekday, weekday, "weekday")?;
        }
        Item::WeekdayFromMonday => {
            let value = number(s, Pad::None, 1, (1, 7), "weekday")?;
            let weekday = Weekday::from_monday0_unchecked((value - 1) as u8);
            assign(s, start, &mut p.weekday, weekday, "weekday")?;
        }
        Item::WeekdayFromSunday => {
            let value = number(s, Pad::None, 1, (0, 6), "weekday")?;
            let weekday = Weekday::from_monday0_unchecked(((value + 6) % 7) as u8);
            assign(s, start, &mut p.weekday, weekday, "weekday")?;
        }
        Item::Hour(pad) => {
            let value = number(s, *pad, 2, (0, 23), "hour")?;
            assign(s, start, &mut p.hour_div_12, value / 12, "hour")?;
            assign(s, start, &mut p.hour_mod_12, value % 12, "hour")?;
        }
        Item::Hour12(pad) => {
            let value = number(s, *pad, 2, (1, 12), "hour")?;
            assign(s, start, &mut p.hour_mod_12, value % 12, "hour")?;
        }
        Item::Minute(pad) => {
            let value = number(s, *pad, 2, (0, 59), "minute")?;
            assign(s, start, &mut p.minute, value, "minute")?;
        }
        Item::Second(pad) => {
            let value = number(s, *pad, 2, (0, 59), "second")?;
            assign(s, start, &mut p.second, value, "second")?;
        }
        Item::AmPm { .. } => {
            let half = if s.eat_ignore_case("am") {
                0
            } else if s.eat_ignore_case("pm") {
                1
            } else {
                return Err(s.error("expected AM or PM"));
            };
            assign(s, start, &mut p.hour_div_12, half, "AM/PM")?;
        }
        Item::Nanosecond => {
            let value = s.fraction(1, 9)?;
            assign(s, start, &mut p.nanosecond, value, "fraction")?;
        }
        Item::Fraction(digits) => {
            let digits = *digits as usize;
            let value = s.fraction(digits, digits)?;
            assign(s, start, &mut p.nanosecond, value, "fraction")?;
        }
        Item::DotFraction(None) => {
            if s.eat(b'.') {
                let value = s.fraction(1, 9)?;
                assign(s, start, &mut p.nanosecond, value, "fraction")?;
            }
        }
        Item::DotFraction(Some(digits)) => {
            s.expect(b'.')?;
            let digits = *digits as usize;
            let value = s.fraction(digits, digits)?;
            assign(s, start, &mut p.nanosecond, value, "fraction")?;
        }
        Item::Offset { colon } => {
            let value = offset(s, *colon)?;
            assign(s, start, &mut p.offset, value, "offset")?;
        }
        Item::ZoneLabel => {
            let value = if s.eat_ignore_case("utc") || s.eat_ignore_case("gmt") || s.eat(b'Z') {
                0
            } else {
                offset(s, true)?
            };
            assign(s, start, &mut p.offset, value, "offset")?;
        }
        Item::Timestamp => {
            let negative = s.eat(b'-');
            let magnitude = s.digits(1, 19, "timestamp")?;
            let value = i64::try_from(magnitude)
                .ok()
                .map(|v| if negative { -v } else { v })
                .ok_or_else(|| s.error_at(start, "timestamp overflows i64"))?;
            assign(s, start, &mut p.timestamp, value, "timestamp")?;
        }
    }
    Ok(())
}

/// `±HH[:]MM` with an optional `[:]SS`, in seconds east of UTC.
pub(crate) fn offset(s: &mut Scanner, colon: bool) -> Result<i32> {
    let start = s.pos();
    let sign = if s.eat(b'+') {
        1
    } else if s.eat(b'-') {
        -1
    } else {
        return Err(s.error("expected '+' or '-' before offset"));
    };
    let hours = s.digits(2, 2, "offset hours")?;
    if colon {
        s.expect(b':')?;
    }
    let minutes = s.digits(2, 2, "offset minutes")?;
    let mut seconds = 0;
    if colon {
        if s.eat(b':') {
            seconds = s.digits(2, 2, "offset seconds")?;
        }
    } else if s.peek().is_some_and(|b| b.is_ascii_digit()) {
        seconds = s.digits(2, 2, "offset seconds")?;
    }
    if hours > 23 || minutes > 59 || seconds > 59 {
        return Err(s.error_at(start, "offset field out of range"));
    }
    Ok(sign * (hours * 3600 + minutes * 60 + seconds) as i32)
}
