//! Monthly period representation
//!
//! Budgets are keyed by (month, year) and summaries select expenses by the
//! month their timestamp falls in.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month in a specific year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    /// Create a period; the month is not range-checked here
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Get the current month
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self::containing(today)
    }

    /// Get the period containing a date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Check if a timestamp falls within this period
    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        timestamp.year() == self.year && timestamp.month() == self.month
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Optional month/year filter used by summaries and listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodFilter {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl PeriodFilter {
    /// Match everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter by either, both, or neither of month and year
    pub fn new(month: Option<u32>, year: Option<i32>) -> Self {
        Self { month, year }
    }

    /// Check if a timestamp passes the filter
    pub fn matches(&self, timestamp: &NaiveDateTime) -> bool {
        self.month.map_or(true, |m| timestamp.month() == m)
            && self.year.map_or(true, |y| timestamp.year() == y)
    }

    /// Human-readable description of the filtered range
    pub fn describe(&self) -> String {
        match (self.month, self.year) {
            (Some(month), Some(year)) => format!("for {}", MonthPeriod::new(year, month)),
            (None, Some(year)) => format!("for {}", year),
            (Some(month), None) => format!("for month {}", month),
            (None, None) => "(all time)".to_string(),
        }
    }
}

impl From<MonthPeriod> for PeriodFilter {
    fn from(period: MonthPeriod) -> Self {
        Self {
            month: Some(period.month),
            year: Some(period.year),
        }
    }
}
