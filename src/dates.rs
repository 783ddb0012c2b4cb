//! Due-date normalization across the wire boundary.
//!
//! Clients send due dates as strings in a handful of shapes; internally a
//! due date is always a naive UTC timestamp. Parsing tries three strategies
//! in order, first success wins:
//!
//!   1. Full ISO-8601 with offset (a trailing `Z` is rewritten to `+00:00`
//!      first), converted to UTC.
//!   2. Plain `YYYY-MM-DD`, interpreted as midnight.
//!   3. ISO-8601 datetime without an offset, taken as-is.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::ApiError;

pub fn parse_due_date(raw: &str) -> Result<NaiveDateTime, ApiError> {
    let with_offset = raw.replace('Z', "+00:00");
    if let Ok(dt) = DateTime::parse_from_rfc3339(&with_offset) {
        return Ok(dt.naive_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Ok(dt);
    }

    Err(ApiError::InvalidDueDate)
}

/// Internal timestamp → wire string. ISO-8601, no timezone suffix; the
/// fractional part is omitted when zero.
pub fn to_wire(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_date_is_midnight() {
        let ts = parse_due_date("2024-01-30").unwrap();
        assert_eq!(to_wire(ts), "2024-01-30T00:00:00");
    }

    #[test]
    fn trailing_z_means_utc() {
        let ts = parse_due_date("2024-01-30T10:00:00Z").unwrap();
        assert_eq!(to_wire(ts), "2024-01-30T10:00:00");
    }

    #[test]
    fn explicit_offset_is_converted_to_utc() {
        let ts = parse_due_date("2024-01-30T10:00:00+02:00").unwrap();
        assert_eq!(to_wire(ts), "2024-01-30T08:00:00");
    }

    #[test]
    fn naive_datetime_is_taken_as_is() {
        let ts = parse_due_date("2024-01-30T10:30:15").unwrap();
        assert_eq!(to_wire(ts), "2024-01-30T10:30:15");
    }

    #[test]
    fn fractional_seconds_survive() {
        let ts = parse_due_date("2024-01-30T10:00:00.250Z").unwrap();
        assert_eq!(to_wire(ts), "2024-01-30T10:00:00.250");
    }

    #[test]
    fn garbage_is_rejected() {
        for raw in ["not-a-date", "30/01/2024", "2024-13-01", "", "2024-01-30T25:00:00"] {
            assert!(
                matches!(parse_due_date(raw), Err(ApiError::InvalidDueDate)),
                "expected rejection for {raw:?}"
            );
        }
    }
}
