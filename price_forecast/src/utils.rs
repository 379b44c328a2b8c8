//! Utility functions for the price_forecast crate

/// Round a price to two decimal places
pub fn round_to_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// Date parsing for the formats accepted at the ingestion boundary
pub mod date_parser {
    use crate::error::{ForecastError, Result};
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

    /// Parse `YYYY-MM-DD`, `MM/DD/YYYY`, `YYYY-MM-DDTHH:MM:SS` or RFC 3339
    /// timestamps; any time of day is discarded
    pub fn parse_date(input: &str) -> Result<NaiveDate> {
        let input = input.trim();

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(input, format) {
                return Ok(date);
            }
        }

        for format in DATETIME_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(input, format) {
                return Ok(datetime.date());
            }
        }

        if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
            return Ok(datetime.date_naive());
        }

        Err(ForecastError::MalformedInput(format!(
            "Unrecognized date: {}",
            input
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_round_to_cents() {
        assert_eq!(round_to_cents(101.23456), 101.23);
        assert_eq!(round_to_cents(12.346), 12.35);
    }

    #[test]
    fn test_date_parser_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();

        assert_eq!(date_parser::parse_date("2023-01-15").unwrap(), expected);
        assert_eq!(date_parser::parse_date("01/15/2023").unwrap(), expected);
        assert_eq!(date_parser::parse_date("2023-01-15T14:30:45").unwrap(), expected);
        assert_eq!(
            date_parser::parse_date("2023-01-15T00:00:00.000Z").unwrap(),
            expected
        );
        assert!(date_parser::parse_date("not-a-date").is_err());
    }
}
