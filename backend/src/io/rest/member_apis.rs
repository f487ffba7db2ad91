//! # REST API for Members

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use shared::{CreateMemberRequest, Member, MemberListResponse, UpdateMemberRequest};
use tracing::info;

use super::error::ApiError;
use super::mappers::MemberMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members).post(create_member))
        .route("/:id", patch(update_member))
}

/// Members from the last load cycle, newest first
pub async fn list_members(State(state): State<AppState>) -> Json<MemberListResponse> {
    info!("GET /api/members");

    let members = state
        .dashboard
        .members()
        .await
        .into_iter()
        .map(MemberMapper::to_dto)
        .collect();
    Json(MemberListResponse { members })
}

pub async fn create_member(
    State(state): State<AppState>,
    body: Result<Json<CreateMemberRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Member>), ApiError> {
    let Json(request) = body?;
    info!("POST /api/members - request: {:?}", request);

    let new_member = MemberMapper::to_new(request)?;
    let created = state.dashboard.create_member(new_member).await?;
    Ok((StatusCode::CREATED, Json(MemberMapper::to_dto(created))))
}

pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateMemberRequest>, JsonRejection>,
) -> Result<Json<Member>, ApiError> {
    let Json(request) = body?;
    info!("PATCH /api/members/{} - request: {:?}", id, request);

    let changes = MemberMapper::to_update(request)?;
    let updated = state.dashboard.update_member(&id, changes).await?;
    Ok(Json(MemberMapper::to_dto(updated)))
}
