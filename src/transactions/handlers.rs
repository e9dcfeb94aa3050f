use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use super::repo_types::{Transaction, TransactionFields};
use crate::{
    auth::{dto::SuccessResponse, extractors::AuthUser},
    error::AppError,
    extract::{ApiJson, ApiPath},
    state::AppState,
};

pub fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route(
            "/transactions/:id",
            put(update_transaction).delete(delete_transaction),
        )
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_transactions(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Transaction>>, AppError> {
    Ok(Json(state.store.list_transactions(user.id).await?))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn create_transaction(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(payload): ApiJson<TransactionFields>,
) -> Result<Json<Transaction>, AppError> {
    let txn = Transaction::new(user.id, payload, OffsetDateTime::now_utc());
    state.store.insert_transaction(&txn).await?;
    info!(transaction_id = %txn.id, kind = %txn.kind, "transaction created");
    Ok(Json(txn))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn update_transaction(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<TransactionFields>,
) -> Result<Json<Transaction>, AppError> {
    let txn = state
        .store
        .update_transaction(user.id, id, &payload)
        .await?
        .ok_or(AppError::NotFound("Transaction"))?;
    info!(transaction_id = %id, "transaction updated");
    Ok(Json(txn))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_transaction(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.store.delete_transaction(user.id, id).await? {
        return Err(AppError::NotFound("Transaction"));
    }
    info!(transaction_id = %id, "transaction deleted");
    Ok(Json(SuccessResponse::ok()))
}
