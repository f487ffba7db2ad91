//! # Church Dashboard Backend
//!
//! Serves the data behind the church management dashboard: members, finance
//! transactions, inventory and events stored in Supabase, plus the metrics
//! and chart series derived from them.
//!
//! ## Architecture
//!
//! ```text
//! UI (browser)
//!     ↓  JSON over HTTP
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (DashboardService, aggregation)
//!     ↓
//! Gateway Layer (Supabase / in-memory)
//! ```
//!
//! [`initialize_backend`] wires the layers together from a
//! [`DashboardConfig`] and runs the first load cycle; [`create_router`] builds
//! the axum application around the resulting [`AppState`].

pub mod config;
pub mod domain;
pub mod gateway;
pub mod io;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::{ConfigError, DashboardConfig, ServerConfig, SupabaseConfig};
use crate::domain::DashboardService;
use crate::gateway::{InMemoryGateway, RemoteError, RemoteGateway, SupabaseGateway};

/// State shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<DashboardService>,
}

impl AppState {
    pub fn new(dashboard: DashboardService) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
        }
    }
}

/// Supabase when configured, otherwise an empty in-memory store
pub fn build_gateway(config: &SupabaseConfig) -> Result<Arc<dyn RemoteGateway>, RemoteError> {
    if !config.is_configured() {
        warn!("Supabase is not configured; serving from an in-memory store");
        return Ok(Arc::new(InMemoryGateway::new()));
    }

    let mut gateway = SupabaseGateway::new(&config.url, &config.anon_key, config.timeout())?
        .with_schema(config.schema.clone());
    if let Some(token) = config.access_token() {
        gateway = gateway.with_access_token(token);
    }

    info!(url = %config.url, schema = %config.schema, "Using Supabase gateway");
    Ok(Arc::new(gateway))
}

/// Build the application state and run the first load cycle.
///
/// A failed first load is not fatal: the dashboard starts in the `error`
/// state and can be reloaded through the API.
pub async fn initialize_backend(config: &DashboardConfig) -> Result<AppState> {
    info!("Setting up gateway");
    let gateway = build_gateway(&config.supabase)?;

    info!("Setting up dashboard service");
    let dashboard = DashboardService::new(gateway, config.display.locale)
        .with_utc_offset(config.display.utc_offset()?);
    let app_state = AppState::new(dashboard);

    info!("Loading dashboard data");
    if let Err(e) = app_state.dashboard.refresh().await {
        warn!("Initial dashboard load failed: {}", e);
    }

    Ok(app_state)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, server: &ServerConfig) -> Result<Router, ConfigError> {
    let origin = server
        .allowed_origin
        .parse::<HeaderValue>()
        .map_err(|e| ConfigError::InvalidValue {
            field: "server.allowed_origin".to_string(),
            reason: e.to_string(),
        })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .nest("/api", io::rest::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
