//! # REST API for Finance Transactions

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use shared::{
    CreateTransactionRequest, Transaction, TransactionListResponse, UpdateTransactionRequest,
};
use tracing::info;

use super::error::ApiError;
use super::mappers::TransactionMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route("/:id", patch(update_transaction))
}

pub async fn list_transactions(State(state): State<AppState>) -> Json<TransactionListResponse> {
    info!("GET /api/transactions");

    let transactions = state
        .dashboard
        .transactions()
        .await
        .into_iter()
        .map(TransactionMapper::to_dto)
        .collect();
    Json(TransactionListResponse { transactions })
}

pub async fn create_transaction(
    State(state): State<AppState>,
    body: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let Json(request) = body?;
    info!("POST /api/transactions - request: {:?}", request);

    let new_transaction = TransactionMapper::to_new(request)?;
    let created = state.dashboard.create_transaction(new_transaction).await?;
    Ok((StatusCode::CREATED, Json(TransactionMapper::to_dto(created))))
}

pub async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTransactionRequest>, JsonRejection>,
) -> Result<Json<Transaction>, ApiError> {
    let Json(request) = body?;
    info!("PATCH /api/transactions/{} - request: {:?}", id, request);

    let changes = TransactionMapper::to_update(request)?;
    let updated = state.dashboard.update_transaction(&id, changes).await?;
    Ok(Json(TransactionMapper::to_dto(updated)))
}
