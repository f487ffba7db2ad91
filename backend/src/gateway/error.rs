//! Gateway error types.

use thiserror::Error;

use super::Collection;

/// Failures talking to the remote backend or understanding its answers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RemoteError {
    /// Network, TLS or timeout failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend rejected our API key or access token.
    #[error("unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// The backend answered with an error we have no better category for.
    #[error("query on {collection} failed ({status}): {message}")]
    Query {
        collection: Collection,
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// `update-by-id` matched no record.
    #[error("no {collection} record with id '{id}'")]
    NotFound { collection: Collection, id: String },

    /// A row did not match the expected record shape.
    #[error("malformed {collection} record: {reason}")]
    Schema { collection: Collection, reason: String },
}

/// The backend refused a record because it violates a column constraint
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{collection} record rejected: {message}")]
pub struct ValidationError {
    pub collection: Collection,
    /// SQLSTATE or PostgREST error code, when the backend sent one
    pub code: Option<String>,
    pub message: String,
}

/// Any error a gateway operation can return
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl GatewayError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::Remote(RemoteError::NotFound { .. }))
    }
}

pub(crate) fn schema_error(collection: Collection, reason: impl Into<String>) -> RemoteError {
    RemoteError::Schema {
        collection,
        reason: reason.into(),
    }
}
