//! Serde support.
//!
//! Dates and times serialize as the strings their `Display` (or, for
//! [`NaiveDateTime`], `Debug`) implementations produce, instants as RFC 3339,
//! and [`Duration`] as `{ "secs": i64, "nanos": u32 }` with the nanoseconds
//! always non-negative.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
    ser::SerializeStruct,
};

use crate::{
    DateTime, Duration, Error, FixedOffset, NANOS_PER_SECOND, NaiveDate, NaiveDateTime,
    NaiveTime, TimeZone, Utc,
};

struct FromStrVisitor<T> {
    expecting: &'static str,
    _marker: PhantomData<T>,
}

impl<T> Visitor<'_> for FromStrVisitor<T>
where
    T: FromStr<Err = Error>,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expecting)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        v.parse().map_err(E::custom)
    }
}

fn deserialize_from_str<'de, D, T>(d: D, expecting: &'static str) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = Error>,
{
    d.deserialize_str(FromStrVisitor {
        expecting,
        _marker: PhantomData,
    })
}

macro_rules! string_serde {
    ($ty:ty, $expecting:literal) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(d: D) -> Result<$ty, D::Error> {
                deserialize_from_str(d, $expecting)
            }
        }
    };
}

string_serde!(NaiveDate, "a date formatted as YYYY-MM-DD");
string_serde!(NaiveTime, "a time formatted as HH:MM:SS[.fraction]");
string_serde!(FixedOffset, "an offset formatted as +HH:MM");

impl Serialize for NaiveDateTime {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&format_args!("{self:?}"))
    }
}

impl<'de> Deserialize<'de> for NaiveDateTime {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        deserialize_from_str(d, "a date and time formatted as YYYY-MM-DDTHH:MM:SS")
    }
}

impl<Tz: TimeZone> Serialize for DateTime<Tz> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for DateTime<FixedOffset> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<DateTime<FixedOffset>, D::Error> {
        deserialize_from_str(d, "an RFC 3339 timestamp")
    }
}

impl<'de> Deserialize<'de> for DateTime<Utc> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        deserialize_from_str(d, "an RFC 3339 timestamp")
    }
}

impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let (secs, nanos) = self.as_secs_nanos();
        let mut st = s.serialize_struct("Duration", 2)?;
        st.serialize_field("secs", &secs)?;
        st.serialize_field("nanos", &nanos)?;
        st.end()
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            secs: i64,
            nanos: u32,
        }

        let raw = Raw::deserialize(d)?;
        if raw.nanos as i64 >= NANOS_PER_SECOND {
            return Err(de::Error::invalid_value(
                de::Unexpected::Unsigned(raw.nanos as u64),
                &"nanos below 1_000_000_000",
            ));
        }
        if raw.secs == i64::MIN && raw.nanos == 0 {
            return Err(de::Error::custom("duration below Duration::MIN"));
        }
        Ok(Duration::from_secs_nanos(raw.secs, raw.nanos as i64))
    }
}

#[cfg(test)]
mod tests {
    use crate::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

    #[test]
    fn test_naive_values_as_strings() {
        let date = NaiveDate::from_ymd(2024, 12, 25).unwrap();
        let time = NaiveTime::from_hms_milli(15, 30, 45, 250).unwrap();
        let dt = date.and_time(time);
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-12-25\"");
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"15:30:45.250\"");
        assert_eq!(serde_json::to_string(&dt).unwrap(), "\"2024-12-25T15:30:45.250\"");

        assert_eq!(serde_json::from_str::<NaiveDate>("\"2024-12-25\"").unwrap(), date);
        assert_eq!(serde_json::from_str::<NaiveTime>("\"15:30:45.25\"").unwrap(), time);
        assert_eq!(
            serde_json::from_str::<NaiveDateTime>("\"2024-12-25 15:30:45.250\"").unwrap(),
            dt
        );
        assert!(serde_json::from_str::<NaiveDate>("\"2024-02-30\"").is_err());
        assert!(serde_json::from_str::<NaiveDate>("20241225").is_err());
    }

    #[test]
    fn test_instants_as_rfc3339() {
        let dt = DateTime::parse_from_rfc3339("2024-12-25T15:30:45+05:00").unwrap();
        let json = serde_json::to_string(&dt).unwrap();
        assert_eq!(json, "\"2024-12-25T15:30:45+05:00\"");
        let back: DateTime<FixedOffset> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.offset(), dt.offset());
        let utc: DateTime<Utc> = serde_json::from_str(&json).unwrap();
        assert_eq!(utc, dt);
        assert_eq!(utc.hour(), 10);
    }

    #[test]
    fn test_duration_as_struct() {
        let d = Duration::milliseconds(-1_500);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"secs":-2,"nanos":500000000}"#);
        assert_eq!(serde_json::from_str::<Duration>(&json).unwrap(), d);
        assert!(serde_json::from_str::<Duration>(r#"{"secs":0,"nanos":1000000000}"#).is_err());
        let min = serde_json::to_string(&Duration::MIN).unwrap();
        assert_eq!(min, format!(r#"{{"secs":{},"nanos":1}}"#, i64::MIN));
        assert_eq!(serde_json::from_str::<Duration>(&min).unwrap(), Duration::MIN);
        let below = format!(r#"{{"secs":{},"nanos":0}}"#, i64::MIN);
        assert!(serde_json::from_str::<Duration>(&below).is_err());
    }

    #[test]
    fn test_offset_and_enums() {
        let offset = FixedOffset::west(3600).unwrap();
        assert_eq!(serde_json::to_string(&offset).unwrap(), "\"-01:00\"");
        assert_eq!(serde_json::from_str::<FixedOffset>("\"-0100\"").unwrap(), offset);
        assert_eq!(serde_json::to_string(&crate::Weekday::Fri).unwrap(), "\"Fri\"");
        assert_eq!(
            serde_json::from_str::<crate::Month>("\"March\"").unwrap(),
            crate::Month::March
        );
    }
}
