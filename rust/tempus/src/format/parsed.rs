use crate::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Weekday,
    error::Error,
    result::Result,
};

/// Fields collected while parsing, before they are resolved into a value.
///
/// Every field may be set more than once (for example `%H` and `%I` in one
/// pattern); the values must agree.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Parsed {
    pub year: Option<i32>,
    pub year_div_100: Option<i32>,
    pub year_mod_100: Option<i32>,
    pub iso_year: Option<i32>,
    pub iso_year_mod_100: Option<i32>,
    pub iso_week: Option<u32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub ordinal: Option<u32>,
    pub weekday: Option<Weekday>,
    /// 0 for AM, 1 for PM.
    pub hour_div_12: Option<u32>,
    pub hour_mod_12: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub nanosecond: Option<u32>,
    pub timestamp: Option<i64>,
    pub offset: Option<i32>,
    /// Input length, reported as the position of resolution errors.
    pub end: usize,
}

/// Stores `value` in `slot`, failing if a different value is already there.
pub(crate) fn set<T: PartialEq + Copy>(slot: &mut Option<T>, value: T) -> bool {
    match slot {
        Some(old) if *old != value => false,
        _ => {
            *slot = Some(value);
            true
        }
    }
}

/// Two-digit years below 70 belong to the 21st century.
fn pivot_year(year_mod_100: i32) -> i32 {
    if year_mod_100 < 70 {
        2000 + year_mod_100
    } else {
        1900 + year_mod_100
    }
}

fn combine_year(
    full: Option<i32>,
    century: Option<i32>,
    mod_100: Option<i32>,
) -> std::result::Result<Option<i32>, &'static str> {
    match (full, century, mod_100) {
        (Some(year), _, _) => {
            if century.is_some_and(|c| c != year.div_euclid(100))
                || mod_100.is_some_and(|m| m != year.rem_euclid(100))
            {
                return Err("year fields disagree");
            }
            Ok(Some(year))
        }
        (None, Some(century), Some(m)) => Ok(Some(century * 100 + m)),
        (None, None, Some(m)) => Ok(Some(pivot_year(m))),
        (None, Some(_), None) => Err("century without a year within it"),
        (None, None, None) => Ok(None),
    }
}

impl Parsed {
    fn error(&self, reason: impl Into<String>) -> Error {
        Error::malformed(self.end, reason)
    }

    fn resolve_year(&self) -> Result<Option<i32>> {
        combine_year(self.year, self.year_div_100, self.year_mod_100).map_err(|e| self.error(e))
    }

    fn resolve_iso_year(&self) -> Result<Option<i32>> {
        combine_year(self.iso_year, None, self.iso_year_mod_100).map_err(|e| self.error(e))
    }

    fn resolve_offset(&self) -> Result<Option<FixedOffset>> {
        self.offset
            .map(|secs| FixedOffset::east(secs).map_err(|e| self.error(e.to_string())))
            .transpose()
    }

    fn has_date_fields(&self) -> bool {
        self.year.is_some()
            || self.year_div_100.is_some()
            || self.year_mod_100.is_some()
            || self.iso_year.is_some()
            || self.iso_year_mod_100.is_some()
            || self.iso_week.is_some()
            || self.month.is_some()
            || self.day.is_some()
            || self.ordinal.is_some()
            || self.weekday.is_some()
    }

    fn has_time_fields(&self) -> bool {
        self.hour_div_12.is_some()
            || self.hour_mod_12.is_some()
            || self.minute.is_some()
            || self.second.is_some()
            || self.nanosecond.is_some()
    }

    /// Builds a date from year-month-day, year-ordinal or ISO week fields,
    /// then checks every other date field against it.
    pub fn to_naive_date(&self) -> Result<NaiveDate> {
        if let Some(local) = self.timestamp_local()? {
            self.verify_date(local.date())?;
            return Ok(local.date());
        }
        let year = self.resolve_year()?;
        let iso_year = self.resolve_iso_year()?;
        let date = match (year, self.month, self.day, self.ordinal) {
            (Some(year), Some(month), Some(day), _) => NaiveDate::from_ymd(year, month, day),
            (Some(year), _, _, Some(ordinal)) => NaiveDate::from_yo(year, ordinal),
            _ => match (iso_year, self.iso_week, self.weekday) {
                (Some(iso_year), Some(week), Some(weekday)) => {
                    NaiveDate::from_isoywd(iso_year, week, weekday)
                }
                _ => return Err(self.error("not enough fields to determine a date")),
            },
        }
        .map_err(|e| self.error(e.to_string()))?;
        self.verify_date(date)?;
        Ok(date)
    }

    fn verify_date(&self, date: NaiveDate) -> Result<()> {
        let iso = date.iso_week();
        let consistent = self.resolve_year()?.is_none_or(|y| y == date.year())
            && self.month.is_none_or(|m| m == date.month())
            && self.day.is_none_or(|d| d == date.day())
            && self.ordinal.is_none_or(|o| o == date.ordinal())
            && self.weekday.is_none_or(|w| w == date.weekday())
            && self.resolve_iso_year()?.is_none_or(|y| y == iso.year())
            && self.iso_week.is_none_or(|w| w == iso.week());
        if consistent {
            Ok(())
        } else {
            Err(self.error(format!("fields disagree with the date {date}")))
        }
    }

    /// Builds a time of day; seconds and the fraction default to zero.
    pub fn to_naive_time(&self) -> Result<NaiveTime> {
        if let Some(local) = self.timestamp_local()? {
            self.verify_time(local.time())?;
            return Ok(local.time());
        }
        let hour = match (self.hour_div_12, self.hour_mod_12) {
            (Some(half), Some(hour)) => half * 12 + hour,
            (None, Some(_)) => return Err(self.error("12-hour clock without AM/PM")),
            (Some(_), None) => return Err(self.error("AM/PM without an hour")),
            (None, None) => return Err(self.error("missing hour")),
        };
        let minute = self.minute.ok_or_else(|| self.error("missing minute"))?;
        NaiveTime::from_hms_nano(
            hour,
            minute,
            self.second.unwrap_or(0),
            self.nanosecond.unwrap_or(0),
        )
        .map_err(|e| self.error(e.to_string()))
    }

    fn verify_time(&self, time: NaiveTime) -> Result<()> {
        let consistent = self.hour_div_12.is_none_or(|h| h == time.hour() / 12)
            && self.hour_mod_12.is_none_or(|h| h == time.hour() % 12)
            && self.minute.is_none_or(|m| m == time.minute())
            && self.second.is_none_or(|s| s == time.second())
            && self.nanosecond.is_none_or(|n| n == time.nanosecond());
        if consistent {
            Ok(())
        } else {
            Err(self.error(format!("fields disagree with the time {time}")))
        }
    }

    /// Local civil time of a `%s` timestamp, shifted by any parsed offset.
    fn timestamp_local(&self) -> Result<Option<NaiveDateTime>> {
        let Some(secs) = self.timestamp else {
            return Ok(None);
        };
        let utc = NaiveDateTime::from_timestamp(secs, self.nanosecond.unwrap_or(0))
            .map_err(|e| self.error(e.to_string()))?;
        let offset = self.resolve_offset()?.unwrap_or(FixedOffset::UTC);
        let local = utc
            .checked_add_signed(offset.as_duration())
            .map_err(|e| self.error(e.to_string()))?;
        Ok(Some(local))
    }

    pub fn to_naive_datetime(&self) -> Result<NaiveDateTime> {
        if let Some(local) = self.timestamp_local()? {
            if self.has_date_fields() {
                self.verify_date(local.date())?;
            }
            if self.has_time_fields() {
                self.verify_time(local.time())?;
            }
            return Ok(local);
        }
        Ok(NaiveDateTime::new(self.to_naive_date()?, self.to_naive_time()?))
    }

    /// Resolves an instant; an offset (or a `%s` timestamp) is required.
    pub fn to_datetime(&self) -> Result<DateTime<FixedOffset>> {
        let offset = match (self.resolve_offset()?, self.timestamp) {
            (Some(offset), _) => offset,
            (None, Some(_)) => FixedOffset::UTC,
            (None, None) => return Err(self.error("missing offset")),
        };
        let local = self.to_naive_datetime()?;
        offset
            .from_local_datetime(&local)
            .map_err(|e| self.error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{Parsed, combine_year, set};
    use crate::{NaiveDate, Weekday};

    #[test]
    fn test_set_conflicts() {
        let mut slot = None;
        assert!(set(&mut slot, 3));
        assert!(set(&mut slot, 3));
        assert!(!set(&mut slot, 4));
        assert_eq!(slot, Some(3));
    }

    #[test]
    fn test_combine_year() {
        assert_eq!(combine_year(None, None, Some(69)), Ok(Some(2069)));
        assert_eq!(combine_year(None, None, Some(70)), Ok(Some(1970)));
        assert_eq!(combine_year(None, Some(18), Some(5)), Ok(Some(1805)));
        assert_eq!(combine_year(Some(2024), Some(20), Some(24)), Ok(Some(2024)));
        assert!(combine_year(Some(2024), None, Some(23)).is_err());
        assert!(combine_year(None, Some(20), None).is_err());
    }

    #[test]
    fn test_resolve_iso_week_date() {
        let parsed = Parsed {
            iso_year: Some(2020),
            iso_week: Some(53),
            weekday: Some(Weekday::Sun),
            ..Default::default()
        };
        assert_eq!(
            parsed.to_naive_date().unwrap(),
            NaiveDate::from_ymd(2021, 1, 3).unwrap()
        );
    }

    #[test]
    fn test_resolve_checks_weekday() {
        let mut parsed = Parsed {
            year: Some(2024),
            month: Some(12),
            day: Some(25),
            weekday: Some(Weekday::Wed),
            ..Default::default()
        };
        assert!(parsed.to_naive_date().is_ok());
        parsed.weekday = Some(Weekday::Thu);
        assert!(parsed.to_naive_date().unwrap_err().is_malformed());
    }

    #[test]
    fn test_resolve_ordinal_and_timestamp() {
        let parsed = Parsed {
            year: Some(2024),
            ordinal: Some(360),
            ..Default::default()
        };
        assert_eq!(parsed.to_naive_date().unwrap().to_string(), "2024-12-25");

        let parsed = Parsed {
            timestamp: Some(1_703_520_645),
            offset: Some(3600),
            ..Default::default()
        };
        let dt = parsed.to_datetime().unwrap();
        assert_eq!(dt.timestamp(), 1_703_520_645);
        assert_eq!(dt.to_string(), "2023-12-25 17:10:45 +01:00");
    }

    #[test]
    fn test_resolve_time_requires_meridiem() {
        let parsed = Parsed {
            hour_mod_12: Some(3),
            minute: Some(0),
            ..Default::default()
        };
        assert!(parsed.to_naive_time().is_err());
        let parsed = Parsed {
            hour_div_12: Some(1),
            ..parsed
        };
        assert_eq!(parsed.to_naive_time().unwrap().to_string(), "15:00:00");
    }
}
