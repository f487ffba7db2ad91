//! Row <-> domain conversion.
//!
//! `to_domain` validates and may fail with [`RemoteError::Schema`]; the
//! outbound conversions (`to_insert_row`, `to_patch_row`) are infallible.

pub mod event_mapper;
pub mod inventory_mapper;
pub mod member_mapper;
pub mod transaction_mapper;

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use shared::UnknownVariant;

use super::error::schema_error;
use super::{Collection, RemoteError};
use crate::domain::datetime;

pub use event_mapper::EventMapper;
pub use inventory_mapper::InventoryMapper;
pub use member_mapper::MemberMapper;
pub use transaction_mapper::TransactionMapper;

/// Parses a `timestamptz` (RFC 3339) or a zone-less `timestamp`, read as UTC.
pub(crate) fn parse_timestamp(
    collection: Collection,
    field: &str,
    value: &str,
) -> Result<DateTime<Utc>, RemoteError> {
    datetime::parse_timestamp(value)
        .ok_or_else(|| schema_error(collection, format!("{field}: invalid timestamp '{value}'")))
}

/// Parses a `date` column; a full timestamp keeps the date written in its own offset.
pub(crate) fn parse_date(
    collection: Collection,
    field: &str,
    value: &str,
) -> Result<NaiveDate, RemoteError> {
    datetime::parse_date(value)
        .ok_or_else(|| schema_error(collection, format!("{field}: invalid date '{value}'")))
}

pub(crate) fn parse_enum<T>(collection: Collection, value: &str) -> Result<T, RemoteError>
where
    T: FromStr<Err = UnknownVariant>,
{
    value
        .parse::<T>()
        .map_err(|err| schema_error(collection, err.to_string()))
}

pub(crate) fn parse_count(
    collection: Collection,
    field: &str,
    value: i64,
) -> Result<u32, RemoteError> {
    u32::try_from(value)
        .map_err(|_| schema_error(collection, format!("{field}: {value} is not a valid count")))
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    datetime::format_date(date)
}

pub(crate) fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339()
}
