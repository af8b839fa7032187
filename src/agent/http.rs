//! HTTP implementation of the agent backend, behind an OAuth
//! client-credentials token endpoint.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::AgentConfig;
use crate::error::{RelayError, Result};

use super::{AgentBackend, AgentReply};

/// Renew the bearer token this long before it actually expires.
const TOKEN_RENEWAL_MARGIN: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Deserialize)]
struct CreateSessionResponse {
    session_id: String,
}

#[derive(Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Agent backend reached over REST with bearer auth.
pub struct HttpAgentBackend {
    client: Client,
    config: AgentConfig,
    token: Mutex<Option<CachedToken>>,
}

impl HttpAgentBackend {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            token: Mutex::new(None),
        }
    }

    /// Fetch or reuse the client-credentials bearer token.
    async fn bearer_token(&self) -> Result<String> {
        if self.config.client_id.is_empty() || self.config.client_secret.is_empty() {
            return Err(RelayError::Config(
                "agent client credentials are not configured".to_string(),
            ));
        }

        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        let response = self
            .client
            .post(&self.config.auth_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| RelayError::AgentAuth(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RelayError::AgentAuth(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| RelayError::AgentAuth(format!("bad token response: {e}")))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_RENEWAL_MARGIN);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        tracing::debug!(expires_in = token.expires_in, "Agent bearer token refreshed");
        Ok(token.access_token)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

/// Statuses the backend uses to signal an invalid or expired session.
pub fn is_session_invalid(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::NOT_FOUND
            | StatusCode::GONE
    )
}

#[async_trait]
impl AgentBackend for HttpAgentBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn create_session(&self) -> Result<String> {
        let token = self.bearer_token().await?;

        let response = self
            .client
            .post(self.endpoint("sessions"))
            .bearer_auth(token)
            .json(&serde_json::json!({ "agent_id": self.config.agent_id }))
            .send()
            .await
            .map_err(|e| RelayError::AgentBackend(format!("session create: {e}")))?;

        if !response.status().is_success() {
            return Err(RelayError::AgentBackend(format!(
                "session create returned {}",
                response.status()
            )));
        }

        let created: CreateSessionResponse = response
            .json()
            .await
            .map_err(|e| RelayError::AgentBackend(format!("bad session response: {e}")))?;

        tracing::info!(session = %created.session_id, "Agent session created");
        Ok(created.session_id)
    }

    async fn send_message(
        &self,
        session_handle: &str,
        sequence: u64,
        text: &str,
    ) -> Result<AgentReply> {
        let token = self.bearer_token().await?;
        let timeout = Duration::from_secs(self.config.send_timeout_secs);

        let result = self
            .client
            .post(self.endpoint(&format!("sessions/{session_handle}/messages")))
            .bearer_auth(token)
            .timeout(timeout)
            .json(&serde_json::json!({
                "sequence": sequence,
                "type": "utterance",
                "text": text,
            }))
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Err(RelayError::Timeout(self.config.send_timeout_secs))
            }
            Err(e) => return Err(RelayError::AgentBackend(format!("message send: {e}"))),
        };

        let status = response.status();
        if is_session_invalid(status) {
            return Err(RelayError::AgentSession(format!(
                "backend returned {status}"
            )));
        }
        if !status.is_success() {
            return Err(RelayError::AgentBackend(format!(
                "backend returned {status}"
            )));
        }

        response.json::<AgentReply>().await.map_err(|e| {
            if e.is_timeout() {
                RelayError::Timeout(self.config.send_timeout_secs)
            } else {
                RelayError::AgentBackend(format!("bad reply body: {e}"))
            }
        })
    }
}
