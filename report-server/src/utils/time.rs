//! Time helpers
//!
//! Date parsing and validation happen at the API handler layer; the
//! reporting layer only ever sees a well-formed [`Period`].

use chrono::NaiveDate;

use shared::error::{AppError, AppResult};

use crate::reporting::Period;

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse and validate a reporting period from query-string dates
pub fn parse_period(start: &str, end: &str) -> AppResult<Period> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if start > end {
        return Err(AppError::validation(format!(
            "Start date {} is after end date {}",
            start, end
        )));
    }
    Ok(Period::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period() {
        let period = parse_period("2026-03-01", "2026-03-07").unwrap();
        assert_eq!(period.len_days(), 7);
    }

    #[test]
    fn test_invalid_date_rejected() {
        assert!(parse_date("03/01/2026").is_err());
        assert!(parse_date("2026-13-01").is_err());
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(parse_period("2026-03-07", "2026-03-01").is_err());
    }
}
