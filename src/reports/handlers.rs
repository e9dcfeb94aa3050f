use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{dto::MonthlyReport, services::monthly_report};
use crate::{
    auth::extractors::AuthUser,
    error::AppError,
    extract::ApiPath,
    state::AppState,
};

pub fn report_routes() -> Router<AppState> {
    Router::new().route("/reports/monthly/:year/:month", get(get_monthly_report))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_monthly_report(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath((year, month)): ApiPath<(i32, u8)>,
) -> Result<Json<MonthlyReport>, AppError> {
    let report = monthly_report(state.store.as_ref(), user.id, year, month).await?;
    Ok(Json(report))
}
