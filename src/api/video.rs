use axum::extract::{Path, State};
use axum::Json;

use crate::api::types::VideoConversation;
use crate::error::Result;
use crate::server::state::AppState;

/// POST /v1/video/conversations - start an avatar conversation whose
/// speech relays through the chat endpoint.
pub async fn create_handler(State(state): State<AppState>) -> Result<Json<VideoConversation>> {
    let callback_url = if state.config.video.callback_url.is_empty() {
        format!("http://{}/v1/chat/completions", state.config.bind_address())
    } else {
        state.config.video.callback_url.clone()
    };

    let conversation = state.video.create_conversation(&callback_url).await?;
    Ok(Json(conversation))
}

/// DELETE /v1/video/conversations/:id - end an avatar conversation.
pub async fn end_handler(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    state.video.end_conversation(&conversation_id).await?;
    Ok(Json(serde_json::json!({
        "status": "ended",
        "conversation_id": conversation_id,
    })))
}
