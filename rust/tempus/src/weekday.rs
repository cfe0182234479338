use std::fmt;
use std::str::FromStr;

use crate::{error::Error, result::Result, verify_arg};

/// Day of the week.
///
/// Numbering is always explicit: use the `*_from_monday` or `*_from_sunday`
/// views rather than casting the variant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

/// Monday-first order; index is `num_days_from_monday`.
const MONDAY_FIRST: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Sunday-first order; index is `num_days_from_sunday`.
const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

const NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const SHORT_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

impl Weekday {
    /// All weekdays, Monday first.
    pub const ALL: [Weekday; 7] = MONDAY_FIRST;

    /// Days since Monday: `Mon` is 0, `Sun` is 6.
    pub const fn num_days_from_monday(self) -> u32 {
        match self {
            Weekday::Mon => 0,
            Weekday::Tue => 1,
            Weekday::Wed => 2,
            Weekday::Thu => 3,
            Weekday::Fri => 4,
            Weekday::Sat => 5,
            Weekday::Sun => 6,
        }
    }

    /// Days since Sunday: `Sun` is 0, `Sat` is 6.
    pub const fn num_days_from_sunday(self) -> u32 {
        match self {
            Weekday::Sun => 0,
            Weekday::Mon => 1,
            Weekday::Tue => 2,
            Weekday::Wed => 3,
            Weekday::Thu => 4,
            Weekday::Fri => 5,
            Weekday::Sat => 6,
        }
    }

    /// ISO 8601 number: `Mon` is 1, `Sun` is 7.
    pub const fn number_from_monday(self) -> u32 {
        self.num_days_from_monday() + 1
    }

    /// `Sun` is 1, `Sat` is 7.
    pub const fn number_from_sunday(self) -> u32 {
        self.num_days_from_sunday() + 1
    }

    pub fn try_from_monday0(index: u8) -> Result<Weekday> {
        verify_arg!(index, index < 7);
        Ok(MONDAY_FIRST[index as usize])
    }

    pub fn try_from_sunday0(index: u8) -> Result<Weekday> {
        verify_arg!(index, index < 7);
        Ok(SUNDAY_FIRST[index as usize])
    }

    pub(crate) fn from_monday0_unchecked(index: u8) -> Weekday {
        MONDAY_FIRST[index as usize % 7]
    }

    /// The next day, wrapping from Sunday to Monday.
    pub fn succ(self) -> Weekday {
        MONDAY_FIRST[(self.num_days_from_monday() as usize + 1) % 7]
    }

    /// The previous day, wrapping from Monday to Sunday.
    pub fn pred(self) -> Weekday {
        MONDAY_FIRST[(self.num_days_from_monday() as usize + 6) % 7]
    }

    /// Number of days from `self` forward to `other`, in `0..7`.
    pub fn days_until(self, other: Weekday) -> u32 {
        (other.num_days_from_monday() + 7 - self.num_days_from_monday()) % 7
    }

    pub fn name(self) -> &'static str {
        NAMES[self.num_days_from_monday() as usize]
    }

    pub fn short_name(self) -> &'static str {
        SHORT_NAMES[self.num_days_from_monday() as usize]
    }

    pub(crate) fn from_name(name: &str) -> Option<Weekday> {
        MONDAY_FIRST.iter().copied().find(|day| {
            day.name().eq_ignore_ascii_case(name) || day.short_name().eq_ignore_ascii_case(name)
        })
    }
}

impl TryFrom<u8> for Weekday {
    type Error = Error;

    /// Zero-based, Monday first.
    fn try_from(index: u8) -> Result<Weekday> {
        Weekday::try_from_monday0(index)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for Weekday {
    type Err = Error;

    fn from_str(s: &str) -> Result<Weekday> {
        Weekday::from_name(s)
            .ok_or_else(|| Error::malformed(0, format!("'{s}' is not a weekday name")))
    }
}

#[cfg(test)]
mod tests {
    use super::Weekday;
    use crate::{MONDAY, SUNDAY};

    #[test]
    fn test_numbering_views() {
        assert_eq!(Weekday::Mon.num_days_from_monday(), MONDAY as u32);
        assert_eq!(Weekday::Sun.num_days_from_monday(), SUNDAY as u32);
        assert_eq!(Weekday::Sun.num_days_from_sunday(), 0);
        assert_eq!(Weekday::Sat.num_days_from_sunday(), 6);
        assert_eq!(Weekday::Mon.number_from_monday(), 1);
        assert_eq!(Weekday::Sun.number_from_monday(), 7);
        assert_eq!(Weekday::Sun.number_from_sunday(), 1);
        assert_eq!(Weekday::Mon.number_from_sunday(), 2);
    }

    #[test]
    fn test_index_conversions() {
        for (i, day) in Weekday::ALL.iter().enumerate() {
            assert_eq!(Weekday::try_from(i as u8).unwrap(), *day);
            assert_eq!(
                Weekday::try_from_sunday0(day.num_days_from_sunday() as u8).unwrap(),
                *day
            );
        }
        assert!(Weekday::try_from(7).is_err());
        assert!(Weekday::try_from_sunday0(7).is_err());
    }

    #[test]
    fn test_cyclic_succ_pred() {
        assert_eq!(Weekday::Sun.succ(), Weekday::Mon);
        assert_eq!(Weekday::Mon.pred(), Weekday::Sun);
        for day in Weekday::ALL {
            assert_eq!(day.succ().pred(), day);
        }
        assert_eq!(Weekday::Fri.days_until(Weekday::Mon), 3);
        assert_eq!(Weekday::Mon.days_until(Weekday::Mon), 0);
    }

    #[test]
    fn test_names() {
        assert_eq!(Weekday::Wed.to_string(), "Wed");
        assert_eq!(Weekday::Wed.name(), "Wednesday");
        assert_eq!("thursday".parse::<Weekday>().unwrap(), Weekday::Thu);
        assert_eq!("SAT".parse::<Weekday>().unwrap(), Weekday::Sat);
        assert!("Funday".parse::<Weekday>().is_err());
    }
}
