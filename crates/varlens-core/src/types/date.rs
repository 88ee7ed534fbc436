//! Trading date type.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A calendar date on which a price observation exists.
///
/// Newtype wrapper around `chrono::NaiveDate`. Dates order chronologically,
/// which is the row order of every historical price matrix.
///
/// # Example
///
/// ```rust
/// use varlens_core::types::Date;
///
/// let date = Date::parse("2024-03-15").unwrap();
/// assert_eq!(date.year(), 2024);
/// assert_eq!(date.to_string(), "2024-03-15");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// Timestamps such as `2024-03-15 00:00:00` are accepted and truncated
    /// to the date part, since vendor CSV exports often carry them.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        let date_part = s.split([' ', 'T']).next().unwrap_or(s);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns today's date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Creates a date from the number of days since 0001-01-01 (day 1).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the ordinal is out of range.
    pub fn from_day_ordinal(days: i32) -> CoreResult<Self> {
        NaiveDate::from_num_days_from_ce_opt(days)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("day ordinal {days} out of range")))
    }

    /// Returns the number of days since 0001-01-01 (day 1).
    ///
    /// Ordinals sort in date order, so they serve as storage keys.
    #[must_use]
    pub fn day_ordinal(&self) -> i32 {
        self.0.num_days_from_ce()
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_days(&self, days: i64) -> CoreResult<Self> {
        chrono::Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{self} + {days} days out of range")))
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let date = Date::parse("2023-01-03").unwrap();
        assert_eq!(date.year(), 2023);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 3);
        assert_eq!(date.to_string(), "2023-01-03");
    }

    #[test]
    fn test_parse_timestamp_suffix() {
        let date = Date::parse("2023-01-03 00:00:00").unwrap();
        assert_eq!(date, Date::from_ymd(2023, 1, 3).unwrap());

        let date = Date::parse("2023-01-03T16:00:00Z").unwrap();
        assert_eq!(date, Date::from_ymd(2023, 1, 3).unwrap());
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2023, 2, 30).is_err());
        assert!(Date::parse("03/01/2023").is_err());
        assert!(Date::parse("").is_err());
    }

    #[test]
    fn test_ordering() {
        let a = Date::from_ymd(2023, 1, 2).unwrap();
        let b = Date::from_ymd(2023, 1, 3).unwrap();
        assert!(a < b);
        assert_eq!(a.add_days(1).unwrap(), b);
        assert!(a.add_days(i64::MAX).is_err());
    }

    #[test]
    fn test_day_ordinal_roundtrip_preserves_order() {
        let a = Date::from_ymd(1999, 12, 31).unwrap();
        let b = Date::from_ymd(2000, 1, 1).unwrap();
        assert_eq!(b.day_ordinal() - a.day_ordinal(), 1);
        assert_eq!(Date::from_day_ordinal(b.day_ordinal()).unwrap(), b);
    }

    #[test]
    fn test_serde_transparent() {
        let date = Date::from_ymd(2024, 6, 28).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2024-06-28\"");
    }
}
