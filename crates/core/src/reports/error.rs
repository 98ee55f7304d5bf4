//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Unrecognized period code.
    #[error("Invalid period: {0}. Expected Q1-Q4, M1-M12 or YEAR")]
    InvalidPeriod(String),

    /// Year outside the supported calendar range.
    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPeriod(_) => "INVALID_PERIOD",
            Self::InvalidYear(_) => "INVALID_YEAR",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        400
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ReportError::InvalidPeriod("Q5".into()).to_string(),
            "Invalid period: Q5. Expected Q1-Q4, M1-M12 or YEAR"
        );
        let err = ReportError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        };
        assert_eq!(err.error_code(), "INVALID_DATE_RANGE");
        assert_eq!(err.http_status_code(), 400);
    }
}
