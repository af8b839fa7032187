//! Video platform client: create and end avatar conversations.
//!
//! The platform relays transcribed speech back into the chat endpoint, so
//! a conversation is created with the relay's chat URL as its callback.

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::api::types::VideoConversation;
use crate::config::VideoConfig;
use crate::error::{RelayError, Result};

pub struct VideoClient {
    client: Client,
    config: VideoConfig,
}

#[derive(Debug, Deserialize)]
struct CreateConversationResponse {
    conversation_id: String,
    conversation_url: String,
}

impl VideoClient {
    pub fn new(config: VideoConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Create a conversation wired to the given chat callback URL.
    pub async fn create_conversation(&self, callback_url: &str) -> Result<VideoConversation> {
        if self.config.api_key.is_empty() {
            return Err(RelayError::Config(
                "video platform API key is not configured".to_string(),
            ));
        }

        let response = self
            .client
            .post(self.endpoint("conversations"))
            .header("x-api-key", &self.config.api_key)
            .json(&serde_json::json!({
                "replica_id": self.config.replica_id,
                "persona_id": self.config.persona_id,
                "callback_url": callback_url,
            }))
            .send()
            .await
            .map_err(|e| RelayError::Video(format!("conversation create: {e}")))?;

        if !response.status().is_success() {
            return Err(RelayError::Video(format!(
                "conversation create returned {}",
                response.status()
            )));
        }

        let created: CreateConversationResponse = response
            .json()
            .await
            .map_err(|e| RelayError::Video(format!("bad conversation response: {e}")))?;

        tracing::info!(conversation = %created.conversation_id, "Video conversation created");

        Ok(VideoConversation {
            conversation_id: created.conversation_id,
            conversation_url: created.conversation_url,
        })
    }

    /// End a conversation. Ending one the platform no longer knows is
    /// treated as success.
    pub async fn end_conversation(&self, conversation_id: &str) -> Result<()> {
        if self.config.api_key.is_empty() {
            return Err(RelayError::Config(
                "video platform API key is not configured".to_string(),
            ));
        }

        let response = self
            .client
            .post(self.endpoint(&format!("conversations/{conversation_id}/end")))
            .header("x-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| RelayError::Video(format!("conversation end: {e}")))?;

        let status = response.status();
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(RelayError::Video(format!(
                "conversation end returned {status}"
            )));
        }

        tracing::info!(conversation = %conversation_id, "Video conversation ended");
        Ok(())
    }
}
