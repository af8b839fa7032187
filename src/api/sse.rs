//! The streaming reply envelope.
//!
//! The video platform consumes replies as a server-sent-event stream in
//! the chat-completion chunk dialect. Replies are short spoken sentences,
//! so the whole sanitized reply travels in one content frame rather than
//! token chunks: a role announcement, then the content, then stop, then
//! `[DONE]`.

use std::convert::Infallible;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;

use crate::api::types::{ChatChunkChoice, ChatCompletionChunk, ChatDelta};

/// The standard SSE termination marker.
pub const SSE_DONE: &str = "[DONE]";

/// Build the three data frames for one complete reply.
pub fn completion_frames(id: &str, model: &str, created: i64, content: &str) -> Vec<String> {
    let chunk = |delta: ChatDelta, finish_reason: Option<String>| ChatCompletionChunk {
        id: id.to_string(),
        object: "chat.completion.chunk".to_string(),
        created,
        model: model.to_string(),
        choices: vec![ChatChunkChoice {
            index: 0,
            delta,
            finish_reason,
        }],
    };

    let frames = [
        chunk(
            ChatDelta {
                role: Some("assistant".to_string()),
                content: Some(String::new()),
            },
            None,
        ),
        chunk(
            ChatDelta {
                role: None,
                content: Some(content.to_string()),
            },
            None,
        ),
        chunk(
            ChatDelta {
                role: None,
                content: None,
            },
            Some("stop".to_string()),
        ),
    ];

    frames
        .iter()
        .filter_map(|frame| serde_json::to_string(frame).ok())
        .collect()
}

/// Create an SSE response from prepared data frames, appending `[DONE]`.
pub fn sse_response(frames: Vec<String>) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let event_stream = futures::stream::iter(
        frames
            .into_iter()
            .chain(std::iter::once(SSE_DONE.to_string()))
            .map(|data| Ok(Event::default().data(data))),
    );

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_three_frames() {
        let frames = completion_frames("chatcmpl-1", "concierge", 1700000000, "Table booked.");
        assert_eq!(frames.len(), 3);
    }

    #[test]
    fn test_frame_shapes() {
        let frames = completion_frames("chatcmpl-1", "concierge", 1700000000, "Table booked.");

        let role: ChatCompletionChunk = serde_json::from_str(&frames[0]).unwrap();
        assert_eq!(role.choices[0].delta.role.as_deref(), Some("assistant"));
        assert_eq!(role.choices[0].delta.content.as_deref(), Some(""));
        assert!(role.choices[0].finish_reason.is_none());

        let content: ChatCompletionChunk = serde_json::from_str(&frames[1]).unwrap();
        assert_eq!(
            content.choices[0].delta.content.as_deref(),
            Some("Table booked.")
        );

        let stop: ChatCompletionChunk = serde_json::from_str(&frames[2]).unwrap();
        assert!(stop.choices[0].delta.content.is_none());
        assert_eq!(stop.choices[0].finish_reason.as_deref(), Some("stop"));
    }

    #[test]
    fn test_reply_is_not_token_chunked() {
        let long = "word ".repeat(200);
        let frames = completion_frames("chatcmpl-1", "concierge", 0, long.trim());
        assert_eq!(frames.len(), 3);
        assert!(frames[1].contains("word word"));
    }
}
