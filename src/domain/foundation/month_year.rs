//! Calendar month value object and its `MM-YYYY` wire codec.

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Wire layout of a month-year, e.g. `03-2025`.
pub const MONTH_YEAR_FORMAT: &str = "MM-YYYY";

/// A calendar month, stored as the first day of that month.
///
/// Parses from and formats to `MM-YYYY`: two month digits (`01`..`12`),
/// a dash and four year digits. Any day-of-month carried by a stored
/// date is discarded when converting back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear(NaiveDate);

impl MonthYear {
    /// Creates a month-year from its components.
    pub fn new(month: u32, year: i32) -> Result<Self, ValidationError> {
        if !(1..=9999).contains(&year) {
            return Err(ValidationError::invalid_format(
                "date",
                format!("year {} is out of range", year),
            ));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| {
                ValidationError::invalid_format("date", format!("month {} is out of range", month))
            })
    }

    /// Parses a wire string, naming `field` in the error.
    pub fn parse_field(field: &str, value: &str) -> Result<Self, ValidationError> {
        value.parse::<MonthYear>().map_err(|_| {
            ValidationError::invalid_format(
                field,
                format!("expected {}, got '{}'", MONTH_YEAR_FORMAT, value),
            )
        })
    }

    /// Builds from a stored date, normalising the day to 1.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// The storage representation (first day of the month).
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month(), self.year())
    }
}

impl FromStr for MonthYear {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes[2] == b'-'
            && bytes[..2].iter().all(u8::is_ascii_digit)
            && bytes[3..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(ValidationError::invalid_format(
                "date",
                format!("expected {}, got '{}'", MONTH_YEAR_FORMAT, s),
            ));
        }

        let month: u32 = s[..2]
            .parse()
            .map_err(|_| ValidationError::invalid_format("date", "month is not a number"))?;
        let year: i32 = s[3..]
            .parse()
            .map_err(|_| ValidationError::invalid_format("date", "year is not a number"))?;

        Self::new(month, year)
    }
}

impl Serialize for MonthYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
