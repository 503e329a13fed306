use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::errors::{Result, ValidationError};

/// Parses a decimal stored as TEXT, falling back to zero on corrupt data so a
/// single bad row cannot poison a whole listing.
pub fn parse_decimal_string_tolerant(value_str: &str, field_name: &str) -> Decimal {
    match value_str.parse::<Decimal>() {
        Ok(d) => d,
        Err(e) => {
            log::error!(
                "Failed to parse {} '{}' as Decimal (err: {}). Falling back to ZERO.",
                field_name,
                value_str,
                e
            );
            Decimal::ZERO
        }
    }
}

/// Parses an ISO 8601/RFC3339 timestamp or a plain `YYYY-MM-DD` date into a
/// naive UTC timestamp. Date-only inputs resolve to midnight.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }
    Err(ValidationError::DateParse(format!(
        "'{}' is not ISO 8601/RFC3339 or YYYY-MM-DD",
        value
    ))
    .into())
}
