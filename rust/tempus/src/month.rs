use std::fmt;
use std::str::FromStr;

use crate::{calendar, error::Error, result::Result, verify_arg};

/// Month of the Gregorian year, numbered from 1.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// Index is `month0`.
const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

const NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const SHORT_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Month {
    pub const ALL: [Month; 12] = MONTHS;

    /// `January` is 1, `December` is 12.
    pub const fn number_from_month(self) -> u32 {
        match self {
            Month::January => 1,
            Month::February => 2,
            Month::March => 3,
            Month::April => 4,
            Month::May => 5,
            Month::June => 6,
            Month::July => 7,
            Month::August => 8,
            Month::September => 9,
            Month::October => 10,
            Month::November => 11,
            Month::December => 12,
        }
    }

    /// `January` is 0, `December` is 11.
    pub const fn month0(self) -> u32 {
        self.number_from_month() - 1
    }

    pub fn try_from_number(number: u8) -> Result<Month> {
        verify_arg!(number, (1..=12).contains(&number));
        Ok(MONTHS[number as usize - 1])
    }

    pub fn try_from_month0(index: u8) -> Result<Month> {
        verify_arg!(index, index < 12);
        Ok(MONTHS[index as usize])
    }

    /// The next month, wrapping from December to January.
    pub fn succ(self) -> Month {
        MONTHS[(self.month0() as usize + 1) % 12]
    }

    /// The previous month, wrapping from January to December.
    pub fn pred(self) -> Month {
        MONTHS[(self.month0() as usize + 11) % 12]
    }

    /// Length of this month in `year`.
    pub fn num_days(self, year: i32) -> u32 {
        calendar::days_in_month(year, self.number_from_month())
    }

    pub fn name(self) -> &'static str {
        NAMES[self.month0() as usize]
    }

    pub fn short_name(self) -> &'static str {
        SHORT_NAMES[self.month0() as usize]
    }

    pub(crate) fn from_name(name: &str) -> Option<Month> {
        MONTHS.iter().copied().find(|month| {
            month.name().eq_ignore_ascii_case(name)
                || month.short_name().eq_ignore_ascii_case(name)
        })
    }
}

impl TryFrom<u8> for Month {
    type Error = Error;

    fn try_from(number: u8) -> Result<Month> {
        Month::try_from_number(number)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Month> {
        Month::from_name(s).ok_or_else(|| Error::malformed(0, format!("'{s}' is not a month name")))
    }
}

#[cfg(test)]
mod tests {
    use super::Month;
    use crate::{DECEMBER, ErrorKind, JANUARY};

    #[test]
    fn test_numbering() {
        assert_eq!(Month::January.number_from_month(), JANUARY as u32);
        assert_eq!(Month::December.number_from_month(), DECEMBER as u32);
        assert_eq!(Month::March.month0(), 2);
        assert_eq!(Month::try_from(1).unwrap(), Month::January);
        assert_eq!(Month::try_from(12).unwrap(), Month::December);
        assert_eq!(Month::try_from_month0(11).unwrap(), Month::December);
        let err = Month::try_from(13).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
        assert!(Month::try_from(0).is_err());
    }

    #[test]
    fn test_cyclic() {
        assert_eq!(Month::December.succ(), Month::January);
        assert_eq!(Month::January.pred(), Month::December);
        for month in Month::ALL {
            assert_eq!(month.pred().succ(), month);
        }
    }

    #[test]
    fn test_num_days() {
        assert_eq!(Month::February.num_days(2024), 29);
        assert_eq!(Month::February.num_days(2023), 28);
        assert_eq!(Month::September.num_days(2023), 30);
    }

    #[test]
    fn test_names() {
        assert_eq!(Month::May.to_string(), "May");
        assert_eq!(Month::September.short_name(), "Sep");
        assert_eq!("sep".parse::<Month>().unwrap(), Month::September);
        assert_eq!("DECEMBER".parse::<Month>().unwrap(), Month::December);
        assert!("Smarch".parse::<Month>().is_err());
    }
}
