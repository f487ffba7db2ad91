//! Date and timestamp text accepted from Supabase rows and API requests.
//!
//! Timestamps are RFC 3339, or zone-less `YYYY-MM-DDTHH:MM[:SS[.fff]]` read as
//! UTC, or a plain date read as UTC midnight. Dates are `YYYY-MM-DD` or any
//! accepted timestamp, which keeps the calendar date written in its own offset.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    parse_naive(value)
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| parse_naive(value).map(|naive| naive.date()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2026, 11, 1, 19, 30, 0).unwrap();

        for value in [
            "2026-11-01T19:30:00Z",
            "2026-11-01T16:30:00-03:00",
            "2026-11-01T19:30:00",
            "2026-11-01T19:30:00.000",
            "2026-11-01T19:30",
        ] {
            assert_eq!(parse_timestamp(value), Some(expected), "{value}");
        }

        assert_eq!(
            parse_timestamp("2026-11-01"),
            Some(Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("domingo"), None);
    }

    #[test]
    fn test_date_keeps_the_written_calendar_day() {
        let last_of_october = NaiveDate::from_ymd_opt(2026, 10, 31);

        assert_eq!(parse_date("2026-10-31"), last_of_october);
        // 23:30 at -03:00 is already November in UTC
        assert_eq!(parse_date("2026-10-31T23:30:00-03:00"), last_of_october);
        assert_eq!(parse_date("2026-10-31T23:30:00.000"), last_of_october);
        assert_eq!(parse_date("31/10/2026"), None);
    }
}
