//! # REST API for Events

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use shared::{CreateEventRequest, Event, EventListResponse, UpdateEventRequest};
use tracing::info;

use super::error::ApiError;
use super::mappers::EventMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", patch(update_event))
}

pub async fn list_events(State(state): State<AppState>) -> Json<EventListResponse> {
    info!("GET /api/events");

    let events = state
        .dashboard
        .events()
        .await
        .into_iter()
        .map(EventMapper::to_dto)
        .collect();
    Json(EventListResponse { events })
}

pub async fn create_event(
    State(state): State<AppState>,
    body: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let Json(request) = body?;
    info!("POST /api/events - request: {:?}", request);

    let new_event = EventMapper::to_new(request)?;
    let created = state.dashboard.create_event(new_event).await?;
    Ok((StatusCode::CREATED, Json(EventMapper::to_dto(created))))
}

pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateEventRequest>, JsonRejection>,
) -> Result<Json<Event>, ApiError> {
    let Json(request) = body?;
    info!("PATCH /api/events/{} - request: {:?}", id, request);

    let changes = EventMapper::to_update(request)?;
    let updated = state.dashboard.update_event(&id, changes).await?;
    Ok(Json(EventMapper::to_dto(updated)))
}
