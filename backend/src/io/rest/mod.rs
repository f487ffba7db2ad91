//! # REST API Interface Layer
//!
//! HTTP endpoints consumed by the dashboard UI. Handlers translate between
//! the JSON DTOs in `shared` and the domain types, call the
//! [`DashboardService`](crate::domain::DashboardService), and turn errors into
//! status codes:
//!
//! | Error                         | Status |
//! |-------------------------------|--------|
//! | malformed body, bad date      | 400    |
//! | record rejected by backend    | 422    |
//! | unknown id                    | 404    |
//! | any other backend failure     | 502    |
//!
//! List endpoints serve the records of the last load cycle; they never hit
//! the backend themselves.

pub mod dashboard_apis;
pub mod error;
pub mod event_apis;
pub mod inventory_apis;
pub mod mappers;
pub mod member_apis;
pub mod transaction_apis;

use axum::Router;

use crate::AppState;

pub use error::ApiError;

/// All API routes, to be nested under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/dashboard", dashboard_apis::router())
        .nest("/members", member_apis::router())
        .nest("/transactions", transaction_apis::router())
        .nest("/inventory", inventory_apis::router())
        .nest("/events", event_apis::router())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::ServerConfig;
    use crate::domain::{DashboardService, DisplayLocale};
    use crate::gateway::{Collection, InMemoryGateway};
    use crate::{create_router, AppState};

    fn app(gateway: Arc<InMemoryGateway>) -> Router {
        let state = AppState::new(DashboardService::new(gateway, DisplayLocale::PtBr));
        create_router(state, &ServerConfig::default()).unwrap()
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_dashboard_starts_idle() {
        let app = app(Arc::new(InMemoryGateway::new()));

        let (status, body) = send(&app, get("/api/dashboard")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "idle");
        assert_eq!(body["snapshot"]["stats"]["total_members"], 0);
    }

    #[tokio::test]
    async fn test_created_transaction_shows_up_in_dashboard() {
        let app = app(Arc::new(InMemoryGateway::new()));

        let (status, created) = send(
            &app,
            json_request(
                Method::POST,
                "/api/transactions",
                json!({ "amount": 500.0, "type": "tithe", "date": "2026-10-05", "description": "Dízimo" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["type"], "tithe");
        assert_eq!(created["date"], "2026-10-05");

        let (_, dashboard) = send(&app, get("/api/dashboard")).await;
        assert_eq!(dashboard["status"], "ready");
        assert_eq!(dashboard["snapshot"]["stats"]["total_income"], 500.0);
        assert_eq!(dashboard["snapshot"]["finance"]["tithes_total"], 500.0);

        let (_, listed) = send(&app, get("/api/transactions")).await;
        assert_eq!(listed["transactions"][0]["id"], created["id"]);
    }

    #[tokio::test]
    async fn test_member_create_and_update() {
        let app = app(Arc::new(InMemoryGateway::new()));

        let (status, created) = send(
            &app,
            json_request(
                Method::POST,
                "/api/members",
                json!({ "name": "Rute", "status": "visitor", "joined_at": "2026-10-12" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let uri = format!("/api/members/{}", created["id"].as_str().unwrap());
        let (status, updated) =
            send(&app, json_request(Method::PATCH, &uri, json!({ "status": "active" }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "active");
        assert_eq!(updated["name"], "Rute");

        let (_, listed) = send(&app, get("/api/members")).await;
        assert_eq!(listed["members"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_null_clears_optional_member_field() {
        let app = app(Arc::new(InMemoryGateway::new()));

        let (_, created) = send(
            &app,
            json_request(
                Method::POST,
                "/api/members",
                json!({ "name": "Ana", "email": "ana@example.com", "phone": "11 9999-0000", "status": "active" }),
            ),
        )
        .await;
        assert_eq!(created["email"], "ana@example.com");

        let uri = format!("/api/members/{}", created["id"].as_str().unwrap());
        let (status, updated) =
            send(&app, json_request(Method::PATCH, &uri, json!({ "email": null }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["email"], Value::Null);
        assert_eq!(updated["phone"], "11 9999-0000");
    }

    #[tokio::test]
    async fn test_bad_date_is_bad_request() {
        let app = app(Arc::new(InMemoryGateway::new()));

        let (status, body) = send(
            &app,
            json_request(
                Method::POST,
                "/api/events",
                json!({ "title": "Culto", "date": "domingo", "location": "Templo", "category": "Culto" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "date: invalid timestamp 'domingo'");
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = app(Arc::new(InMemoryGateway::new()));

        let (status, body) = send(
            &app,
            json_request(Method::POST, "/api/inventory", json!({ "name": "Cadeira" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_blank_name_is_unprocessable() {
        let app = app(Arc::new(InMemoryGateway::new()));

        let (status, body) = send(
            &app,
            json_request(Method::POST, "/api/members", json!({ "name": "", "status": "active" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "members record rejected: name must not be blank");
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let app = app(Arc::new(InMemoryGateway::new()));

        let (status, _) = send(
            &app,
            json_request(Method::PATCH, "/api/events/does-not-exist", json!({ "attendance": 40 })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_failed_refresh_is_bad_gateway_with_view() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.set_failing(Collection::InventoryItems, true);
        let app = app(gateway);

        let (status, body) = send(
            &app,
            Request::builder()
                .method(Method::POST)
                .uri("/api/dashboard/refresh")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "query on inventory_items failed (503): inventory_items is unavailable");
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let app = app(Arc::new(InMemoryGateway::new()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/dashboard")
                    .header(header::ORIGIN, "http://localhost:8080")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:8080"
        );
    }
}
