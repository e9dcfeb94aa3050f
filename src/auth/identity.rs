use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{auth::dto::SessionData, error::AuthError};

pub const SESSION_ID_HEADER: &str = "X-Session-ID";

/// External service that turns a one-time login id into a verified identity.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn session_data(&self, session_id: &str) -> Result<SessionData, AuthError>;
}

#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    session_data_url: String,
}

impl HttpIdentityProvider {
    pub fn new(session_data_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .context("build identity provider client")?;
        Ok(Self {
            client,
            session_data_url: session_data_url.to_string(),
        })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn session_data(&self, session_id: &str) -> Result<SessionData, AuthError> {
        let res = self
            .client
            .get(&self.session_data_url)
            .header(SESSION_ID_HEADER, session_id)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "identity provider unreachable");
                AuthError::Upstream(e.to_string())
            })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(%status, "identity provider rejected session id");
            return Err(AuthError::Upstream(format!("{status}: {body}")));
        }

        let data = res
            .json::<SessionData>()
            .await
            .map_err(|e| AuthError::Upstream(format!("malformed session data: {e}")))?;
        debug!(email = %data.email, "identity provider accepted session id");
        Ok(data)
    }
}
