use axum::http::{header, HeaderMap};
use rand::{distributions::Alphanumeric, Rng};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    auth::{
        identity::IdentityProvider,
        repo_types::{Session, User},
    },
    categories::services::default_categories,
    error::AuthError,
    store::Store,
};

pub const SESSION_COOKIE: &str = "session_token";
const GENERATED_TOKEN_LEN: usize = 48;

/// Session token presented by a request: the cookie wins over the bearer header.
pub fn presented_token(headers: &HeaderMap) -> Option<String> {
    cookie_token(headers).or_else(|| bearer_token(headers))
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|v| !v.is_empty())
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth
        .strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))?
        .trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Resolves a presented session token to its user.
///
/// Read-only: expiry is never extended.
pub async fn authenticate(
    store: &dyn Store,
    token: Option<&str>,
    now: OffsetDateTime,
) -> Result<User, AuthError> {
    let token = token.ok_or(AuthError::Unauthenticated)?;

    let session = store
        .find_session_by_token(token)
        .await?
        .ok_or(AuthError::InvalidSession)?;

    if session.is_expired(now) {
        debug!(session_id = %session.id, "session expired");
        return Err(AuthError::SessionExpired);
    }

    store
        .find_user_by_id(session.user_id)
        .await?
        .ok_or(AuthError::UserNotFound)
}

/// Exchanges a provider session id for a local user and a fresh session.
///
/// First-time users get the default category set.
#[instrument(skip(store, identity, session_id))]
pub async fn complete_login(
    store: &dyn Store,
    identity: &dyn IdentityProvider,
    session_id: &str,
    ttl: Duration,
    now: OffsetDateTime,
) -> Result<(User, Session), AuthError> {
    let data = identity.session_data(session_id).await?;

    let user = match store.find_user_by_email(&data.email).await? {
        Some(user) => user,
        None => {
            let user = User {
                id: Uuid::new_v4(),
                email: data.email.clone(),
                name: data.name.clone(),
                picture: data.picture.clone(),
                created_at: now,
            };
            store.insert_user(&user).await?;
            for category in default_categories(user.id, now) {
                store.insert_category(&category).await?;
            }
            info!(user_id = %user.id, email = %user.email, "user created");
            user
        }
    };

    let session = Session {
        id: Uuid::new_v4(),
        user_id: user.id,
        session_token: data.session_token.unwrap_or_else(generate_token),
        expires_at: now + ttl,
        created_at: now,
    };
    store.insert_session(&session).await?;
    info!(user_id = %user.id, expires_at = %session.expires_at, "session created");

    Ok((user, session))
}

pub fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_TOKEN_LEN)
        .map(char::from)
        .collect()
}

pub fn session_cookie(token: &str, ttl: Duration) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Max-Age={}; Path=/; HttpOnly; Secure; SameSite=None",
        ttl.whole_seconds()
    )
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Max-Age=0; Path=/; HttpOnly; Secure; SameSite=None")
}
