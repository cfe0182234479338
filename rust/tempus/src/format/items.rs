use std::io::Write;

use tempus_ascii::AsciiBuilder;

use crate::{
    FixedOffset, NaiveDate, NaiveDateTime, NaiveTime,
    error::Error,
    format::{AutoFraction, FormatFields, YearText},
    result::Result,
};

/// Padding of a numeric field.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Pad {
    Zero,
    Space,
    None,
}

/// One compiled element of a format pattern.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Item {
    Literal(String),
    /// `%Y`
    Year(Pad),
    /// `%C`
    Century(Pad),
    /// `%y`
    YearMod100(Pad),
    /// `%G`
    IsoYear(Pad),
    /// `%g`
    IsoYearMod100(Pad),
    /// `%V`
    IsoWeek(Pad),
    /// `%m`
    Month(Pad),
    /// `%b`, `%h`
    MonthShort,
    /// `%B`
    MonthLong,
    /// `%d`, `%e`
    Day(Pad),
    /// `%j`
    Ordinal(Pad),
    /// `%a`
    WeekdayShort,
    /// `%A`
    WeekdayLong,
    /// `%u`
    WeekdayFromMonday,
    /// `%w`
    WeekdayFromSunday,
    /// `%H`, `%k`
    Hour(Pad),
    /// `%I`, `%l`
    Hour12(Pad),
    /// `%M`
    Minute(Pad),
    /// `%S`
    Second(Pad),
    /// `%p`, `%P`
    AmPm { upper: bool },
    /// `%f`
    Nanosecond,
    /// `%3f`, `%6f`, `%9f`
    Fraction(u8),
    /// `%.f` when `None`, else `%.3f`, `%.6f`, `%.9f`.
    DotFraction(Option<u8>),
    /// `%z`, `%:z`
    Offset { colon: bool },
    /// `%Z`
    ZoneLabel,
    /// `%s`
    Timestamp,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum State {
    Text,
    Percent,
    Flag(Pad),
    Colon,
    Dot,
    DotDigits(u8),
    Digits(u8),
}

/// Compiles a pattern into items.
///
/// # Errors
///
/// `InvalidFormat` naming the offending specifier.
pub(crate) fn tokenize(pattern: &str) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    let mut literal = String::new();
    let mut state = State::Text;
    let mut start = 0;

    for (pos, ch) in pattern.char_indices() {
        let spec = &pattern[start..pos + ch.len_utf8()];
        state = match state {
            State::Text if ch == '%' => {
                start = pos;
                State::Percent
            }
            State::Text => {
                literal.push(ch);
                State::Text
            }
            State::Percent => match ch {
                '-' => State::Flag(Pad::None),
                '_' => State::Flag(Pad::Space),
                '0' => State::Flag(Pad::Zero),
                ':' => State::Colon,
                '.' => State::Dot,
                '3' | '6' | '9' => State::Digits(ch as u8 - b'0'),
                _ => {
                    emit(&mut literal, specifier(ch, None, spec)?, &mut items);
                    State::Text
                }
            },
            State::Flag(pad) => {
                emit(&mut literal, specifier(ch, Some(pad), spec)?, &mut items);
                State::Text
            }
            State::Colon if ch == 'z' => {
                emit(&mut literal, vec![Item::Offset { colon: true }], &mut items);
                State::Text
            }
            State::Dot => match ch {
                'f' => {
                    emit(&mut literal, vec![Item::DotFraction(None)], &mut items);
                    State::Text
                }
                '3' | '6' | '9' => State::DotDigits(ch as u8 - b'0'),
                _ => return Err(unknown(spec)),
            },
            State::DotDigits(digits) if ch == 'f' => {
                emit(&mut literal, vec![Item::DotFraction(Some(digits))], &mut items);
                State::Text
            }
            State::Digits(digits) if ch == 'f' => {
                emit(&mut literal, vec![Item::Fraction(digits)], &mut items);
                State::Text
            }
            State::Colon | State::DotDigits(_) | State::Digits(_) => {
                return Err(unknown(spec));
            }
        };
    }
    if state != State::Text {
        return Err(Error::invalid_format(
            &pattern[start..],
            "incomplete specifier at end of pattern",
        ));
    }
    emit(&mut literal, Vec::new(), &mut items);
    Ok(items)
}

fn emit(literal: &mut String, new: Vec<Item>, items: &mut Vec<Item>) {
    if !literal.is_empty() {
        items.push(Item::Literal(std::mem::take(literal)));
    }
    items.extend(new);
}

fn unknown(spec: &str) -> Error {
    Error::invalid_format(spec, "unknown specifier")
}

fn specifier(ch: char, pad: Option<Pad>, spec: &str) -> Result<Vec<Item>> {
    let numeric = |default: Pad, make: fn(Pad) -> Item| Ok(vec![make(pad.unwrap_or(default))]);
    match ch {
        'Y' => return numeric(Pad::Zero, Item::Year),
        'C' => return numeric(Pad::Zero, Item::Century),
        'y' => return numeric(Pad::Zero, Item::YearMod100),
        'G' => return numeric(Pad::Zero, Item::IsoYear),
        'g' => return numeric(Pad::Zero, Item::IsoYearMod100),
        'V' => return numeric(Pad::Zero, Item::IsoWeek),
        'm' => return numeric(Pad::Zero, Item::Month),
        'd' => return numeric(Pad::Zero, Item::Day),
        'e' => return numeric(Pad::Space, Item::Day),
        'j' => return numeric(Pad::Zero, Item::Ordinal),
        'H' => return numeric(Pad::Zero, Item::Hour),
        'k' => return numeric(Pad::Space, Item::Hour),
        'I' => return numeric(Pad::Zero, Item::Hour12),
        'l' => return numeric(Pad::Space, Item::Hour12),
        'M' => return numeric(Pad::Zero, Item::Minute),
        'S' => return numeric(Pad::Zero, Item::Second),
        _ => {}
    }
    if pad.is_some() {
        return Err(Error::invalid_format(
            spec,
            "padding flags apply to numeric specifiers only",
        ));
    }
    let lit = |s: &str| Item::Literal(s.to_string());
    let items = match ch {
        'b' | 'h' => vec![Item::MonthShort],
        'B' => vec![Item::MonthLong],
        'a' => vec![Item::WeekdayShort],
        'A' => vec![Item::WeekdayLong],
        'u' => vec![Item::WeekdayFromMonday],
        'w' => vec![Item::WeekdayFromSunday],
        'p' => vec![Item::AmPm { upper: true }],
        'P' => vec![Item::AmPm { upper: false }],
        'f' => vec![Item::Nanosecond],
        'z' => vec![Item::Offset { colon: false }],
        'Z' => vec![Item::ZoneLabel],
        's' => vec![Item::Timestamp],
        'D' => vec![
            Item::Month(Pad::Zero),
            lit("/"),
            Item::Day(Pad::Zero),
            lit("/"),
            Item::YearMod100(Pad::Zero),
        ],
        'F' => vec![
            Item::Year(Pad::Zero),
            lit("-"),
            Item::Month(Pad::Zero),
            lit("-"),
            Item::Day(Pad::Zero),
        ],
        'T' => vec![
            Item::Hour(Pad::Zero),
            lit(":"),
            Item::Minute(Pad::Zero),
            lit(":"),
            Item::Second(Pad::Zero),
        ],
        'R' => vec![Item::Hour(Pad::Zero), lit(":"), Item::Minute(Pad::Zero)],
        'n' => vec![lit("\n")],
        't' => vec![lit("\t")],
        '%' => vec![lit("%")],
        _ => return Err(unknown(spec)),
    };
    Ok(items)
}

impl Item {
    pub fn write<W>(&self, fields: &FormatFields, w: &mut W) -> Result<()>
    where
        W: Write,
    {
        match self {
            Item::Literal(text) => w.write_all(text.as_bytes())?,
            Item::Year(Pad::Zero) => write!(w, "{}", YearText(date(fields, self)?.year()))?,
            Item::Year(pad) => write_num(w, date(fields, self)?.year() as i64, 4, *pad)?,
            Item::Century(pad) => {
                let year = date(fields, self)?.year();
                write_num(w, year.div_euclid(100) as i64, 2, *pad)?
            }
            Item::YearMod100(pad) => {
                let year = date(fields, self)?.year();
                write_num(w, year.rem_euclid(100) as i64, 2, *pad)?
            }
            Item::IsoYear(Pad::Zero) => {
                write!(w, "{}", YearText(date(fields, self)?.iso_week().year()))?
            }
            Item::IsoYear(pad) => {
                write_num(w, date(fields, self)?.iso_week().year() as i64, 4, *pad)?
            }
            Item::IsoYearMod100(pad) => {
                let year = date(fields, self)?.iso_week().year();
                write_num(w, year.rem_euclid(100) as i64, 2, *pad)?
            }
            Item::IsoWeek(pad) => {
                write_num(w, date(fields, self)?.iso_week().week() as i64, 2, *pad)?
            }
            Item::Month(pad) => write_num(w, date(fields, self)?.month() as i64, 2, *pad)?,
            Item::MonthShort => {
                w.write_all(date(fields, self)?.month_of_year().short_name().as_bytes())?
            }
            Item::MonthLong => {
                w.write_all(date(fields, self)?.month_of_year().name().as_bytes())?
            }
            Item::Day(pad) => write_num(w, date(fields, self)?.day() as i64, 2, *pad)?,
            Item::Ordinal(pad) => write_num(w, date(fields, self)?.ordinal() as i64, 3, *pad)?,
            Item::WeekdayShort => {
                w.write_all(date(fields, self)?.weekday().short_name().as_bytes())?
            }
            Item::WeekdayLong => w.write_all(date(fields, self)?.weekday().name().as_bytes())?,
            Item::WeekdayFromMonday => {
                write!(w, "{}", date(fields, self)?.weekday().number_from_monday())?
            }
            Item::WeekdayFromSunday => {
                write!(w, "{}", date(fields, self)?.weekday().num_days_from_sunday())?
            }
            Item::Hour(pad) => write_num(w, time(fields, self)?.hour() as i64, 2, *pad)?,
            Item::Hour12(pad) => write_num(w, time(fields, self)?.hour12().1 as i64, 2, *pad)?,
            Item::Minute(pad) => write_num(w, time(fields, self)?.minute() as i64, 2, *pad)?,
            Item::Second(pad) => write_num(w, time(fields, self)?.second() as i64, 2, *pad)?,
            Item::AmPm { upper } => {
                let text = match (time(fields, self)?.hour12().0, upper) {
                    (false, true) => "AM",
                    (true, true) => "PM",
                    (false, false) => "am",
                    (true, false) => "pm",
                };
                w.write_all(text.as_bytes())?
            }
            Item::Nanosecond => write!(w, "{:09}", time(fields, self)?.nanosecond())?,
            Item::Fraction(digits) => write_fraction(w, time(fields, self)?.nanosecond(), *digits)?,
            Item::DotFraction(None) => {
                write!(w, "{}", AutoFraction(time(fields, self)?.nanosecond()))?
            }
            Item::DotFraction(Some(digits)) => {
                let nanos = time(fields, self)?.nanosecond();
                w.write_all(b".")?;
                write_fraction(w, nanos, *digits)?
            }
            Item::Offset { colon } => write_offset(w, offset(fields, self)?, *colon)?,
            Item::ZoneLabel => match (&fields.label, fields.offset) {
                (Some(label), _) => w.write_all(label.as_bytes())?,
                (None, Some(offset)) => write!(w, "{offset}")?,
                (None, None) => return Err(missing(self, "a zone")),
            },
            Item::Timestamp => {
                let local = NaiveDateTime::new(date(fields, self)?, time(fields, self)?);
                let offset = fields.offset.unwrap_or(FixedOffset::UTC);
                let secs = local.timestamp() - offset.local_minus_utc() as i64;
                let mut buf = [0u8; 24];
                let mut builder = AsciiBuilder::new(&mut buf);
                builder.append_i64(secs)?;
                w.write_all(builder.as_bytes())?
            }
        }
        Ok(())
    }
}

fn missing(item: &Item, what: &str) -> Error {
    Error::invalid_format(format!("{item:?}"), format!("value has no {what}"))
}

fn date(fields: &FormatFields, item: &Item) -> Result<NaiveDate> {
    fields.date.ok_or_else(|| missing(item, "date"))
}

fn time(fields: &FormatFields, item: &Item) -> Result<NaiveTime> {
    fields.time.ok_or_else(|| missing(item, "time"))
}

fn offset(fields: &FormatFields, item: &Item) -> Result<FixedOffset> {
    fields.offset.ok_or_else(|| missing(item, "offset"))
}

fn write_num<W: Write>(w: &mut W, value: i64, width: usize, pad: Pad) -> std::io::Result<()> {
    match pad {
        Pad::Zero => write!(w, "{value:0width$}"),
        Pad::Space => write!(w, "{value:>width$}"),
        Pad::None => write!(w, "{value}"),
    }
}

fn write_fraction<W: Write>(w: &mut W, nanos: u32, digits: u8) -> std::io::Result<()> {
    let digits = digits.min(9) as usize;
    let scaled = nanos / 10u32.pow(9 - digits as u32);
    write!(w, "{scaled:0digits$}")
}

pub(crate) fn write_offset<W: Write>(
    w: &mut W,
    offset: FixedOffset,
    colon: bool,
) -> std::io::Result<()> {
    let (sign, hours, minutes, seconds) = offset.hms();
    let sep = if colon { ":" } else { "" };
    write!(w, "{sign}{hours:02}{sep}{minutes:02}")?;
    if seconds != 0 {
        write!(w, "{sep}{seconds:02}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Item, Pad, tokenize};
    use crate::ErrorKind;

    #[test]
    fn test_tokenize_basic() {
        let items = tokenize("%Y-%m-%d at %H:%M").unwrap();
        assert_eq!(
            items,
            vec![
                Item::Year(Pad::Zero),
                Item::Literal("-".into()),
                Item::Month(Pad::Zero),
                Item::Literal("-".into()),
                Item::Day(Pad::Zero),
                Item::Literal(" at ".into()),
                Item::Hour(Pad::Zero),
                Item::Literal(":".into()),
                Item::Minute(Pad::Zero),
            ]
        );
    }

    #[test]
    fn test_tokenize_flags_and_fractions() {
        assert_eq!(
            tokenize("%-d%_m%0e%.f%.3f%6f%:z").unwrap(),
            vec![
                Item::Day(Pad::None),
                Item::Month(Pad::Space),
                Item::Day(Pad::Zero),
                Item::DotFraction(None),
                Item::DotFraction(Some(3)),
                Item::Fraction(6),
                Item::Offset { colon: true },
            ]
        );
        assert_eq!(
            tokenize("100%% %n").unwrap(),
            vec![
                Item::Literal("100".into()),
                Item::Literal("%".into()),
                Item::Literal(" ".into()),
                Item::Literal("\n".into()),
            ]
        );
    }

    #[test]
    fn test_tokenize_composites() {
        assert_eq!(tokenize("%F").unwrap(), tokenize("%Y-%m-%d").unwrap());
        assert_eq!(tokenize("%T").unwrap(), tokenize("%H:%M:%S").unwrap());
        assert_eq!(tokenize("%D").unwrap(), tokenize("%m/%d/%y").unwrap());
        assert_eq!(tokenize("%R").unwrap(), tokenize("%H:%M").unwrap());
        assert_eq!(tokenize("").unwrap(), Vec::<Item>::new());
        assert_eq!(tokenize("día").unwrap(), vec![Item::Literal("día".into())]);
    }

    #[test]
    fn test_tokenize_errors() {
        for (pattern, element) in [
            ("%Q", "%Q"),
            ("%Y-%", "%"),
            ("%-a", "%-a"),
            ("%:y", "%:y"),
            ("%.4f", "%.4"),
            ("%3d", "%3d"),
            ("%_", "%_"),
        ] {
            let err = tokenize(pattern).unwrap_err();
            match err.kind() {
                ErrorKind::InvalidFormat { element: e, .. } => assert_eq!(e, element, "{pattern}"),
                other => panic!("unexpected {other:?} for {pattern}"),
            }
        }
    }
}
