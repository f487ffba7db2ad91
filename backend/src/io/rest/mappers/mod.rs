//! Domain <-> API DTO conversion.
//!
//! Dates travel as strings in the DTOs; parsing them is the only fallible
//! step and fails with [`ApiError::BadRequest`].

pub mod event_mapper;
pub mod inventory_mapper;
pub mod member_mapper;
pub mod transaction_mapper;

use chrono::{DateTime, NaiveDate, Utc};

use super::error::ApiError;
use crate::domain::datetime;

pub use event_mapper::EventMapper;
pub use inventory_mapper::InventoryMapper;
pub use member_mapper::MemberMapper;
pub use transaction_mapper::TransactionMapper;

/// `YYYY-MM-DD`, or a full timestamp reduced to the date written in its offset.
pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    datetime::parse_date(value)
        .ok_or_else(|| ApiError::BadRequest(format!("{field}: invalid date '{value}'")))
}

/// RFC 3339; zone-less timestamps and plain dates are read as UTC.
pub(crate) fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, ApiError> {
    datetime::parse_timestamp(value)
        .ok_or_else(|| ApiError::BadRequest(format!("{field}: invalid timestamp '{value}'")))
}

pub(crate) fn parse_amount(field: &str, value: f64) -> Result<f64, ApiError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ApiError::BadRequest(format!("{field}: must be a finite number")))
    }
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    datetime::format_date(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 11, 1, 19, 30, 0).unwrap();

        assert_eq!(parse_timestamp("date", "2026-11-01T19:30:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("date", "2026-11-01T16:30:00-03:00").unwrap(), expected);
        assert_eq!(parse_timestamp("date", "2026-11-01T19:30").unwrap(), expected);
        assert_eq!(parse_timestamp("date", "2026-11-01T19:30:00.000").unwrap(), expected);
        assert_eq!(
            parse_timestamp("date", "2026-11-01").unwrap(),
            Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_errors_are_bad_requests() {
        let err = parse_date("date", "01/11/2026").unwrap_err();
        assert_eq!(err.to_string(), "date: invalid date '01/11/2026'");

        assert!(matches!(parse_timestamp("joined_at", "ontem"), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_amount("amount", f64::NAN), Err(ApiError::BadRequest(_))));
    }
}
