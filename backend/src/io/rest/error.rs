//! Error type of the REST handlers and its HTTP mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::ErrorResponse;
use thiserror::Error;
use tracing::{error, warn};

use crate::gateway::{GatewayError, RemoteError};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed JSON body or unparsable field
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Gateway(GatewayError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Gateway(GatewayError::Remote(RemoteError::NotFound { .. })) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Gateway(GatewayError::Remote(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
