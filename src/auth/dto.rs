use serde::{Deserialize, Serialize};

use crate::auth::repo_types::User;

/// Identity returned by the provider for a one-time session id.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionData {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub session_token: Option<String>,
}

/// Query string of `POST /auth/callback`.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub session_id: Option<String>,
}

/// Response of a completed login.
#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub success: bool,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
