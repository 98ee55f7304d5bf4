//! Reporting period codes.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use super::error::ReportError;

/// A calendar reporting period within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// Quarter 1..=4.
    Quarter(u32),
    /// Month 1..=12.
    Month(u32),
    /// Full calendar year.
    Year,
}

impl Period {
    /// Parses `Q1`-`Q4`, `M1`-`M12` or `YEAR` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidPeriod` for anything else.
    pub fn parse(code: &str) -> Result<Self, ReportError> {
        let invalid = || ReportError::InvalidPeriod(code.to_string());
        let upper = code.trim().to_uppercase();

        if upper == "YEAR" {
            return Ok(Self::Year);
        }

        let (kind, number) = upper.split_at_checked(1).ok_or_else(invalid)?;
        let number: u32 = number.parse().map_err(|_| invalid())?;
        match kind {
            "Q" if (1..=4).contains(&number) => Ok(Self::Quarter(number)),
            "M" if (1..=12).contains(&number) => Ok(Self::Month(number)),
            _ => Err(invalid()),
        }
    }

    /// Last calendar day of the period in `year`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidYear` if the date is out of range.
    pub fn end_date(self, year: i32) -> Result<NaiveDate, ReportError> {
        let last_month = match self {
            Self::Quarter(q) => q * 3,
            Self::Month(m) => m,
            Self::Year => 12,
        };
        last_day_of_month(year, last_month).ok_or(ReportError::InvalidYear(year))
    }

    /// First calendar day of the period in `year`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidYear` if the date is out of range.
    pub fn start_date(self, year: i32) -> Result<NaiveDate, ReportError> {
        let first_month = match self {
            Self::Quarter(q) => q * 3 - 2,
            Self::Month(m) => m,
            Self::Year => 1,
        };
        NaiveDate::from_ymd_opt(year, first_month, 1).ok_or(ReportError::InvalidYear(year))
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

impl FromStr for Period {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quarter(q) => write!(f, "Q{q}"),
            Self::Month(m) => write!(f, "M{m}"),
            Self::Year => f.write_str("YEAR"),
        }
    }
}
