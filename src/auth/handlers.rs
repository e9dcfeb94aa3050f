use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use time::{Duration, OffsetDateTime};
use tracing::{error, info, instrument};

use crate::{
    auth::{
        dto::{CallbackQuery, CallbackResponse, SuccessResponse},
        extractors::AuthUser,
        repo_types::User,
        services::{clear_session_cookie, complete_login, presented_token, session_cookie},
    },
    config::AuthConfig,
    error::AppError,
    extract::ApiQuery,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login))
        .route("/auth/callback", post(callback))
        .route("/auth/logout", post(logout))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(get_me))
}

/// Provider login page with our frontend as the `redirect` target.
pub fn login_redirect_url(cfg: &AuthConfig) -> anyhow::Result<String> {
    let url = url::Url::parse_with_params(&cfg.login_url, &[("redirect", &cfg.redirect_url)])?;
    Ok(url.into())
}

#[instrument(skip(state))]
pub async fn login(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let target = login_redirect_url(&state.config.auth).map_err(|e| {
        error!(error = %e, "invalid AUTH_LOGIN_URL");
        AppError::Internal(e)
    })?;
    Ok(Redirect::to(&target))
}

#[instrument(skip(state, query))]
pub async fn callback(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CallbackQuery>,
) -> Result<impl IntoResponse, AppError> {
    let session_id = query
        .session_id
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::Validation("session_id is required".into()))?;

    let ttl = Duration::days(state.config.auth.session_ttl_days);
    let (user, session) = complete_login(
        state.store.as_ref(),
        state.identity.as_ref(),
        &session_id,
        ttl,
        OffsetDateTime::now_utc(),
    )
    .await?;

    info!(user_id = %user.id, "user logged in");
    Ok((
        AppendHeaders([(header::SET_COOKIE, session_cookie(&session.session_token, ttl))]),
        Json(CallbackResponse {
            success: true,
            user,
        }),
    ))
}

/// Drops every session carrying the presented token. Succeeds without one.
#[instrument(skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = presented_token(&headers) {
        let removed = state.store.delete_sessions_by_token(&token).await?;
        info!(removed, "sessions deleted");
    }
    Ok((
        AppendHeaders([(header::SET_COOKIE, clear_session_cookie())]),
        Json(SuccessResponse::ok()),
    ))
}

#[instrument(skip(user), fields(user_id = %user.id))]
pub async fn get_me(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_redirect_encodes_callback() {
        let cfg = AuthConfig {
            login_url: "https://auth.example.com/".into(),
            redirect_url: "http://localhost:3000/profile?x=1".into(),
            session_data_url: "unused".into(),
            timeout_secs: 1,
            session_ttl_days: 7,
        };
        let url = login_redirect_url(&cfg).unwrap();
        assert_eq!(
            url,
            "https://auth.example.com/?redirect=http%3A%2F%2Flocalhost%3A3000%2Fprofile%3Fx%3D1"
        );
    }
}
