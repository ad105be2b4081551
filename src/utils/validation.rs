use crate::utils::error::{Result, TravelError};
use chrono::{NaiveDate, NaiveTime};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(TravelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(TravelError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(TravelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TravelError::validation(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(TravelError::validation(
            field_name,
            value.to_string(),
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(TravelError::validation(
            field_name,
            value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_date(field_name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| TravelError::validation(field_name, value, "Expected a date as YYYY-MM-DD"))
}

/// Parses a 24-hour `HH:MM` time.
pub fn parse_time(field_name: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| TravelError::validation(field_name, value, "Expected a time as HH:MM"))
}

/// Airport or city code, trimmed and uppercased. Anything non-empty is accepted.
pub fn parse_location_code(field_name: &str, value: &str) -> Result<String> {
    validate_non_empty_string(field_name, value)?;
    Ok(value.trim().to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("amadeus.base_url", "https://test.api.amadeus.com").is_ok());
        assert!(validate_url("amadeus.base_url", "http://localhost:3000").is_ok());
        assert!(validate_url("amadeus.base_url", "").is_err());
        assert!(validate_url("amadeus.base_url", "invalid-url").is_err());
        assert!(validate_url("amadeus.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("adults", 2, 1).is_ok());
        assert!(validate_positive_number("adults", 0, 1).is_err());
    }

    #[test]
    fn test_parse_date_and_time() {
        assert_eq!(
            parse_date("departure_date", "2025-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        assert!(parse_date("departure_date", "06/01/2025").is_err());
        assert!(parse_time("time", "19:30").is_ok());
        assert!(parse_time("time", "7pm").is_err());
    }

    #[test]
    fn test_parse_location_code() {
        assert_eq!(parse_location_code("origin", " jfk ").unwrap(), "JFK");
        assert_eq!(parse_location_code("origin", "Paris").unwrap(), "PARIS");
        assert!(parse_location_code("origin", "   ").is_err());
    }
}
