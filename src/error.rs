use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Failures of the session gate and the login flow.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Invalid session")]
    InvalidSession,

    #[error("Session expired")]
    SessionExpired,

    #[error("User not found")]
    UserNotFound,

    #[error("Auth failed: {0}")]
    Upstream(String),

    #[error("session store unavailable")]
    Store(#[from] anyhow::Error),
}

/// Error type returned by every handler.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    /// Request body, query or path that failed to deserialize.
    #[error("{1}")]
    Rejected(StatusCode, String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Auth(AuthError::Upstream(_)) => StatusCode::BAD_REQUEST,
            AppError::Auth(AuthError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Rejected(status, _) => *status,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            AppError::Auth(AuthError::Store(e)) | AppError::Internal(e) => {
                error!(error = ?e, "request failed");
                "Internal server error".to_string()
            }
            AppError::Auth(e) => {
                warn!(reason = %e, "authentication rejected");
                e.to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Rejected(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_failures_are_all_unauthorized() {
        for e in [
            AuthError::Unauthenticated,
            AuthError::InvalidSession,
            AuthError::SessionExpired,
            AuthError::UserNotFound,
        ] {
            assert_eq!(AppError::from(e).status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn upstream_failure_is_bad_request_with_detail() {
        let err = AppError::from(AuthError::Upstream("401 Unauthorized: nope".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Auth failed: 401 Unauthorized: nope");
    }

    #[test]
    fn store_failures_hide_details() {
        let err = AppError::from(AuthError::Store(anyhow::anyhow!("connection refused")));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err = AppError::Internal(anyhow::anyhow!("boom"));
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn rejection_keeps_status_and_text() {
        let err = AppError::Rejected(StatusCode::BAD_REQUEST, "Invalid URL".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Invalid URL");
    }

    #[test]
    fn not_found_names_the_record() {
        let err = AppError::NotFound("Goal");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Goal not found");
    }
}
