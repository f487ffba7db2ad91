//! # REST API for the Dashboard
//!
//! Read the current dashboard view and trigger a reload.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::info;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/refresh", post(refresh_dashboard))
}

/// Current load status, stats and chart series
pub async fn get_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/dashboard");
    Json(state.dashboard.view().await)
}

/// Run a load cycle now; the view is returned either way, with 502 if the cycle failed
pub async fn refresh_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/dashboard/refresh");

    let status = match state.dashboard.refresh().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(state.dashboard.view().await))
}
