//! Per-user session state persisted between turns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A conversation session issued by the agent backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentSession {
    /// Opaque handle owned by the backend, cached here for reuse
    pub handle: String,

    /// Sequence number for the next message send. Starts at 1 and is
    /// bumped after every attempted send, successful or not.
    pub next_seq: u64,
}

/// Extracted identifiers awaiting a yes/no from the caller.
///
/// Exists exactly while the relay has read the identifiers back and has
/// not yet received an unambiguous answer. Both fields are present by
/// construction: partial extractions are never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub email: String,
    pub reservation_id: String,

    /// The verbatim cleaned utterance the identifiers came from,
    /// replayed to the backend once confirmed
    pub original_message: String,

    /// Set once the read-back prompt has been issued
    pub awaiting: bool,
}

/// One record per caller, keyed by `user_id` in the session store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: String,

    /// Cached backend session, absent until first relay or after the
    /// backend reported it invalid
    pub agent_session: Option<AgentSession>,

    pub pending: Option<PendingConfirmation>,

    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            agent_session: None,
            pending: None,
            updated_at: Utc::now(),
        }
    }

    /// Refresh the modification timestamp before persisting.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// True while the confirmation sub-protocol is waiting on yes/no.
    pub fn awaiting_confirmation(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| p.awaiting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_empty() {
        let record = SessionRecord::new("user-1");
        assert_eq!(record.user_id, "user-1");
        assert!(record.agent_session.is_none());
        assert!(record.pending.is_none());
        assert!(!record.awaiting_confirmation());
    }

    #[test]
    fn test_awaiting_confirmation() {
        let mut record = SessionRecord::new("user-1");
        record.pending = Some(PendingConfirmation {
            email: "a@b.co".into(),
            reservation_id: "AB-1234".into(),
            original_message: "my email is a@b.co and my id is AB-1234".into(),
            awaiting: true,
        });
        assert!(record.awaiting_confirmation());
    }

    #[test]
    fn test_record_serde_roundtrip() {
        let mut record = SessionRecord::new("user-1");
        record.agent_session = Some(AgentSession {
            handle: "sess-42".into(),
            next_seq: 3,
        });

        let json = serde_json::to_string(&record).unwrap();
        let back: SessionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user_id, "user-1");
        assert_eq!(back.agent_session.unwrap().next_seq, 3);
    }
}
