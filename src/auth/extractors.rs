use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use time::OffsetDateTime;

use super::{repo_types::User, services};
use crate::{error::AppError, state::AppState};

/// Resolves the session cookie (or bearer token) to the calling user.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = services::presented_token(&parts.headers);
        let user = services::authenticate(
            state.store.as_ref(),
            token.as_deref(),
            OffsetDateTime::now_utc(),
        )
        .await?;
        Ok(AuthUser(user))
    }
}
