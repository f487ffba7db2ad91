//! # REST API for Inventory

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use shared::{
    CreateInventoryItemRequest, InventoryItem, InventoryListResponse, UpdateInventoryItemRequest,
};
use tracing::info;

use super::error::ApiError;
use super::mappers::InventoryMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventory).post(create_inventory_item))
        .route("/:id", patch(update_inventory_item))
}

pub async fn list_inventory(State(state): State<AppState>) -> Json<InventoryListResponse> {
    info!("GET /api/inventory");

    let items = state
        .dashboard
        .inventory()
        .await
        .into_iter()
        .map(InventoryMapper::to_dto)
        .collect();
    Json(InventoryListResponse { items })
}

pub async fn create_inventory_item(
    State(state): State<AppState>,
    body: Result<Json<CreateInventoryItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<InventoryItem>), ApiError> {
    let Json(request) = body?;
    info!("POST /api/inventory - request: {:?}", request);

    let new_item = InventoryMapper::to_new(request)?;
    let created = state.dashboard.create_inventory_item(new_item).await?;
    Ok((StatusCode::CREATED, Json(InventoryMapper::to_dto(created))))
}

pub async fn update_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateInventoryItemRequest>, JsonRejection>,
) -> Result<Json<InventoryItem>, ApiError> {
    let Json(request) = body?;
    info!("PATCH /api/inventory/{} - request: {:?}", id, request);

    let changes = InventoryMapper::to_update(request)?;
    let updated = state.dashboard.update_inventory_item(&id, changes).await?;
    Ok(Json(InventoryMapper::to_dto(updated)))
}
