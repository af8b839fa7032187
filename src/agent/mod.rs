//! External conversational agent backend.
//!
//! The backend actually answers reservation questions; the relay only
//! correlates sessions and forwards utterances. `AgentBackend` is the
//! seam: the HTTP implementation lives in `http.rs`, and tests script
//! their own.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use http::HttpAgentBackend;

/// One message in a backend reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMessage {
    pub kind: AgentMessageKind,
    #[serde(default)]
    pub text: String,
}

/// Message kinds the backend emits. Unknown kinds map to `Other` so new
/// backend features do not break deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentMessageKind {
    FinalAnswer,
    ActionFailure,
    HumanHandoff,
    #[serde(other)]
    Other,
}

/// The backend's reply to one forwarded utterance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentReply {
    #[serde(default)]
    pub messages: Vec<AgentMessage>,
}

/// What the relay should do with a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// Speak this text
    Answer(String),
    /// Terminal escalation: drop the cached session, speak any
    /// accompanying text
    Handoff(Option<String>),
    /// The backend failed the action and said nothing usable
    FailureWithoutText,
}

impl AgentReply {
    /// Pick the user-facing outcome: an explicit human handoff is
    /// terminal; otherwise the first final answer, then the first
    /// non-failure message with text; a silent failure ends up apologized
    /// for by the caller.
    pub fn outcome(&self) -> ReplyOutcome {
        if self
            .messages
            .iter()
            .any(|m| m.kind == AgentMessageKind::HumanHandoff)
        {
            let text = self
                .messages
                .iter()
                .find(|m| m.kind == AgentMessageKind::HumanHandoff && !m.text.trim().is_empty())
                .or_else(|| {
                    self.messages
                        .iter()
                        .find(|m| m.kind != AgentMessageKind::ActionFailure && !m.text.trim().is_empty())
                })
                .map(|m| m.text.clone());
            return ReplyOutcome::Handoff(text);
        }

        if let Some(m) = self
            .messages
            .iter()
            .find(|m| m.kind == AgentMessageKind::FinalAnswer && !m.text.trim().is_empty())
        {
            return ReplyOutcome::Answer(m.text.clone());
        }

        if let Some(m) = self
            .messages
            .iter()
            .find(|m| m.kind != AgentMessageKind::ActionFailure && !m.text.trim().is_empty())
        {
            return ReplyOutcome::Answer(m.text.clone());
        }

        ReplyOutcome::FailureWithoutText
    }
}

/// Trait for the conversational agent backend.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Create a new conversation session, returning its opaque handle
    async fn create_session(&self) -> Result<String>;

    /// Forward one utterance under the given session and sequence number
    async fn send_message(
        &self,
        session_handle: &str,
        sequence: u64,
        text: &str,
    ) -> Result<AgentReply>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(kind: AgentMessageKind, text: &str) -> AgentMessage {
        AgentMessage {
            kind,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_final_answer_wins() {
        let reply = AgentReply {
            messages: vec![
                msg(AgentMessageKind::Other, "thinking..."),
                msg(AgentMessageKind::FinalAnswer, "Your table is booked."),
            ],
        };
        assert_eq!(
            reply.outcome(),
            ReplyOutcome::Answer("Your table is booked.".into())
        );
    }

    #[test]
    fn test_fallback_to_non_failure_text() {
        let reply = AgentReply {
            messages: vec![
                msg(AgentMessageKind::ActionFailure, "lookup failed"),
                msg(AgentMessageKind::Other, "One moment please."),
            ],
        };
        assert_eq!(
            reply.outcome(),
            ReplyOutcome::Answer("One moment please.".into())
        );
    }

    #[test]
    fn test_handoff_is_terminal_and_keeps_text() {
        let reply = AgentReply {
            messages: vec![
                msg(AgentMessageKind::FinalAnswer, "ignored"),
                msg(AgentMessageKind::HumanHandoff, "Connecting you now."),
            ],
        };
        assert_eq!(
            reply.outcome(),
            ReplyOutcome::Handoff(Some("Connecting you now.".into()))
        );
    }

    #[test]
    fn test_silent_failure() {
        let reply = AgentReply {
            messages: vec![msg(AgentMessageKind::ActionFailure, "")],
        };
        assert_eq!(reply.outcome(), ReplyOutcome::FailureWithoutText);
    }

    #[test]
    fn test_unknown_kind_deserializes_as_other() {
        let reply: AgentReply = serde_json::from_str(
            r#"{"messages":[{"kind":"tool_trace","text":"debug"}]}"#,
        )
        .unwrap();
        assert_eq!(reply.messages[0].kind, AgentMessageKind::Other);
    }
}
