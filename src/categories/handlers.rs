use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{dto::CreateCategoryRequest, repo_types::Category, services::new_category};
use crate::{
    auth::{dto::SuccessResponse, extractors::AuthUser},
    error::AppError,
    extract::{ApiJson, ApiPath},
    state::AppState,
};

pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/:id", delete(delete_category))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_categories(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(state.store.list_categories(user.id).await?))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn create_category(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(payload): ApiJson<CreateCategoryRequest>,
) -> Result<Json<Category>, AppError> {
    let category = new_category(user.id, payload, OffsetDateTime::now_utc())?;
    state.store.insert_category(&category).await?;
    info!(category_id = %category.id, "category created");
    Ok(Json(category))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_category(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.store.delete_category(user.id, id).await? {
        return Err(AppError::NotFound("Category"));
    }
    info!(category_id = %id, "category deleted");
    Ok(Json(SuccessResponse::ok()))
}
