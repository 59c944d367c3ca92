//! Time types for trade records.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - Lenient parsing for the date layouts found in spreadsheet exports
//!
//! # Examples
//!
//! ```
//! use risk_core::types::time::Date;
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::parse_lenient("2024-01-11 00:00:00").unwrap();
//! assert_eq!(end - start, 10);
//! ```

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Date-only layouts accepted by [`Date::parse_lenient`], tried in order.
///
/// Slash and dash forms with the year last are read day-first.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Date-time layouts accepted by [`Date::parse_lenient`]; the time part is dropped.
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Ordering follows the calendar, so a `BTreeMap<Date, _>` iterates
/// in ascending date order.
///
/// # Examples
///
/// ```
/// use risk_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
/// assert_eq!(date.month(), 6);
/// assert_eq!(date.day(), 15);
///
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Returns
    /// `Ok(Date)` if the date is valid, `Err(DateError::InvalidDate)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use risk_core::types::time::Date;
    ///
    /// assert!(Date::from_ymd(2024, 2, 29).is_ok());
    /// assert!(Date::from_ymd(2024, 2, 30).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use risk_core::types::time::Date;
    ///
    /// let date = Date::parse("2024-06-15").unwrap();
    /// assert_eq!(date.year(), 2024);
    ///
    /// assert!(Date::parse("15/06/2024").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Parses a date from any of the layouts commonly produced by
    /// spreadsheet exports.
    ///
    /// Accepts ISO dates, ISO date-times (time discarded), `YYYY/MM/DD`,
    /// and the day-first forms `DD/MM/YYYY` and `DD-MM-YYYY`.
    ///
    /// # Examples
    ///
    /// ```
    /// use risk_core::types::time::Date;
    ///
    /// let expected = Date::from_ymd(2024, 3, 4).unwrap();
    /// assert_eq!(Date::parse_lenient("2024-03-04").unwrap(), expected);
    /// assert_eq!(Date::parse_lenient("2024-03-04 00:00:00").unwrap(), expected);
    /// assert_eq!(Date::parse_lenient("04/03/2024").unwrap(), expected);
    /// assert!(Date::parse_lenient("yesterday").is_err());
    /// ```
    pub fn parse_lenient(s: &str) -> Result<Self, DateError> {
        let trimmed = s.trim();

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(Date(date));
            }
        }

        for format in DATE_TIME_FORMATS {
            if let Ok(date_time) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Date(date_time.date()));
            }
        }

        Err(DateError::ParseError(format!(
            "unrecognised date layout: '{}'",
            trimmed
        )))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    /// Parses a date with [`Date::parse_lenient`].
    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse_lenient(s)
    }
}

impl fmt::Display for Date {
    /// Formats the date as ISO 8601 (YYYY-MM-DD).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
