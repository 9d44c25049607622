//! Date helpers for the ISO 8601 formats the API expects.

use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, SecondsFormat, Utc};

use crate::error::{PixResult, ValidationError};

/// Date range used by list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub inicio: String,
    pub fim: String,
}

/// Format a timestamp as ISO 8601 UTC with milliseconds (`2024-01-01T00:00:00.000Z`).
pub fn to_iso_string(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Range ending now and starting `start_days_ago` days earlier.
///
/// Offsets that leave the representable date range are rejected.
pub fn create_date_range(start_days_ago: i64) -> PixResult<DateRange> {
    let fim = Utc::now();
    let inicio = ChronoDuration::try_days(start_days_ago)
        .and_then(|offset| fim.checked_sub_signed(offset))
        .ok_or_else(|| {
            ValidationError::new(
                "start_days_ago",
                format!("{} days is outside the supported date range", start_days_ago),
            )
        })?;

    Ok(DateRange {
        inicio: to_iso_string(&inicio),
        fim: to_iso_string(&fim),
    })
}

/// Range covering the last 30 days.
pub fn default_date_range() -> PixResult<DateRange> {
    create_date_range(30)
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (taken as UTC midnight).
pub fn parse_date(input: &str) -> PixResult<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(ValidationError::new("date", format!("Invalid date string: {}", input)).into())
}

/// Format as `YYYY-MM-DD`, the shape used by cobv due dates.
pub fn format_date_only(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}
