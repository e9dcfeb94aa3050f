use axum::{
    extract::State,
    routing::{delete, get, put},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{AddAmountQuery, CreateGoalRequest},
    repo_types::Goal,
    services::{contribute, new_goal, validate_contribution},
};
use crate::{
    auth::{dto::SuccessResponse, extractors::AuthUser},
    error::AppError,
    extract::{ApiJson, ApiPath, ApiQuery},
    state::AppState,
};

pub fn goal_routes() -> Router<AppState> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/:id", delete(delete_goal))
        .route("/goals/:id/add-amount", put(add_amount))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_goals(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Goal>>, AppError> {
    Ok(Json(state.store.list_goals(user.id).await?))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn create_goal(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(payload): ApiJson<CreateGoalRequest>,
) -> Result<Json<Goal>, AppError> {
    let goal = new_goal(user.id, payload, OffsetDateTime::now_utc())?;
    state.store.insert_goal(&goal).await?;
    info!(goal_id = %goal.id, "goal created");
    Ok(Json(goal))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn add_amount(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<AddAmountQuery>,
) -> Result<Json<Goal>, AppError> {
    let amount = validate_contribution(query.amount)?;
    let goal = contribute(state.store.as_ref(), user.id, id, amount).await?;
    Ok(Json(goal))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_goal(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.store.delete_goal(user.id, id).await? {
        return Err(AppError::NotFound("Goal"));
    }
    info!(goal_id = %id, "goal deleted");
    Ok(Json(SuccessResponse::ok()))
}
