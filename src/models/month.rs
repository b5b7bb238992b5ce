//! Month key
//!
//! A year+month pair identifying a budgeting period, written as "YYYY-MM".

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month with no day component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month, validating the month number and year range
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(MonthParseError::InvalidFormat(format!("{}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// The month a date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Get the current month
    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.next()
            .start_date()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Get the next month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Get the previous month
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Parse a "YYYY-MM" string
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;
        if year.len() != 4 || month.len() != 2 {
            return Err(MonthParseError::InvalidFormat(s.to_string()));
        }
        let year: i32 = year
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        Self::new(year, month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Month {
    type Error = MonthParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => {
                write!(f, "Invalid month '{}', expected YYYY-MM", s)
            }
            MonthParseError::InvalidMonth(m) => write!(f, "Invalid month number: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}

impl From<MonthParseError> for crate::error::LedgerError {
    fn from(err: MonthParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_bounds() {
        let feb = Month::new(2024, 2).unwrap();
        assert_eq!(feb.start_date(), date(2024, 2, 1));
        assert_eq!(feb.end_date(), date(2024, 2, 29));

        let dec = Month::new(2025, 12).unwrap();
        assert_eq!(dec.end_date(), date(2025, 12, 31));
    }

    #[test]
    fn test_navigation() {
        let dec = Month::new(2024, 12).unwrap();
        assert_eq!(dec.next(), Month::new(2025, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);
    }

    #[test]
    fn test_contains() {
        let jan = Month::new(2025, 1).unwrap();
        assert!(jan.contains(date(2025, 1, 1)));
        assert!(jan.contains(date(2025, 1, 31)));
        assert!(!jan.contains(date(2025, 2, 1)));
        assert!(!jan.contains(date(2024, 1, 15)));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Month::parse("2025-03").unwrap(), Month::new(2025, 3).unwrap());
        assert_eq!(Month::parse("2025-13"), Err(MonthParseError::InvalidMonth(13)));
        assert!(Month::parse("2025-3").is_err());
        assert!(Month::parse("March").is_err());
        assert!(Month::parse("2025-03-01").is_err());
    }

    #[test]
    fn test_display_and_order() {
        let a = Month::new(2024, 12).unwrap();
        let b = Month::new(2025, 1).unwrap();
        assert_eq!(a.to_string(), "2024-12");
        assert!(a < b);
    }

    #[test]
    fn test_serialization() {
        let month = Month::new(2025, 1).unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"2025-01\"");
        let deserialized: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(month, deserialized);
        assert!(serde_json::from_str::<Month>("\"2025-00\"").is_err());
    }
}
