use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::sse;
use crate::api::types::{
    ChatChoice, ChatCompletionMessage, ChatCompletionRequest, ChatCompletionResponse, Usage,
};
use crate::relay::replies;
use crate::server::state::AppState;
use crate::text;

/// POST /v1/chat/completions - one conversational turn.
///
/// Every outcome, including backend failures, is a 200-level completion
/// carrying speakable text; the caller is a voice agent that cannot
/// handle error statuses gracefully.
pub async fn handler(
    State(state): State<AppState>,
    Json(request): Json<ChatCompletionRequest>,
) -> Response {
    let user_id = request
        .user_id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| replies::DEFAULT_USER_ID.to_string());
    let model = request
        .model
        .clone()
        .unwrap_or_else(|| state.config.agent.profile.clone());
    let streaming = request.stream.unwrap_or(false);

    let reply = match latest_user_utterance(&request.messages) {
        None => replies::GREETING.to_string(),
        Some(utterance) => state.engine.handle_turn(&user_id, utterance).await,
    };
    let content = text::reply::sanitize(&reply);

    let id = format!("chatcmpl-{}", uuid::Uuid::new_v4());
    let created = chrono::Utc::now().timestamp();

    if streaming {
        sse::sse_response(sse::completion_frames(&id, &model, created, &content)).into_response()
    } else {
        Json(build_completion(id, model, created, content, &request.messages)).into_response()
    }
}

/// Shape one reply as a complete chat-completion object. Usage counts are
/// raw character lengths; the widget only displays them.
fn build_completion(
    id: String,
    model: String,
    created: i64,
    content: String,
    prompt: &[ChatCompletionMessage],
) -> ChatCompletionResponse {
    let prompt_tokens: u32 = prompt.iter().map(|m| m.content.chars().count() as u32).sum();
    let completion_tokens = content.chars().count() as u32;

    ChatCompletionResponse {
        id,
        object: "chat.completion".to_string(),
        created,
        model,
        choices: vec![ChatChoice {
            index: 0,
            message: ChatCompletionMessage {
                role: "assistant".to_string(),
                content,
            },
            finish_reason: Some("stop".to_string()),
        }],
        usage: Usage {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        },
    }
}

/// The utterance to relay: the most recent user-role message.
fn latest_user_utterance(messages: &[ChatCompletionMessage]) -> Option<&str> {
    messages
        .iter()
        .rev()
        .find(|m| m.role == "user")
        .map(|m| m.content.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(role: &str, content: &str) -> ChatCompletionMessage {
        ChatCompletionMessage {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_latest_user_utterance_picks_newest() {
        let messages = vec![
            msg("user", "first"),
            msg("assistant", "reply"),
            msg("user", "second"),
        ];
        assert_eq!(latest_user_utterance(&messages), Some("second"));
    }

    #[test]
    fn test_latest_user_utterance_empty() {
        assert_eq!(latest_user_utterance(&[]), None);
        assert_eq!(
            latest_user_utterance(&[msg("system", "prompt")]),
            None
        );
    }

    #[test]
    fn test_completion_has_one_choice_and_char_usage() {
        let prompt = vec![msg("user", "four")];
        let response = build_completion(
            "chatcmpl-1".to_string(),
            "concierge".to_string(),
            1700000000,
            "seven ch".to_string(),
            &prompt,
        );

        assert_eq!(response.choices.len(), 1);
        assert_eq!(response.choices[0].message.role, "assistant");
        assert_eq!(response.choices[0].finish_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.prompt_tokens, 4);
        assert_eq!(response.usage.completion_tokens, 8);
        assert_eq!(response.usage.total_tokens, 12);
    }
}
