//! The turn engine: session correlation, the confirmation sub-protocol,
//! and relay to the agent backend.
//!
//! One call to [`RelayEngine::handle_turn`] handles one inbound utterance
//! end to end and always produces speakable text. Failures degrade to
//! fixed apologies; nothing here returns an error to the HTTP layer.

pub mod replies;

use std::sync::Arc;

use crate::agent::{AgentBackend, ReplyOutcome};
use crate::dialogue::{self, ConfirmationIntent};
use crate::error::RelayError;
use crate::session::{AgentSession, PendingConfirmation, SessionRecord, SessionStore, UserLocks};
use crate::text;

/// Bounded retry for sends that hit an invalid session: the second and
/// final attempt runs on a freshly created session.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 2 }
    }
}

pub struct RelayEngine {
    store: Arc<dyn SessionStore>,
    agent: Arc<dyn AgentBackend>,
    locks: UserLocks,
    retry: RetryPolicy,
}

impl RelayEngine {
    pub fn new(store: Arc<dyn SessionStore>, agent: Arc<dyn AgentBackend>) -> Self {
        Self {
            store,
            agent,
            locks: UserLocks::new(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Handle one utterance for one user, returning the reply to speak.
    pub async fn handle_turn(&self, user_id: &str, raw_utterance: &str) -> String {
        let utterance = text::inbound::clean(raw_utterance);

        // Same-user turns are serialized; see session::lock.
        let _guard = self.locks.acquire(user_id).await;

        let mut record = match self.store.load(user_id).await {
            Ok(Some(record)) => record,
            Ok(None) => SessionRecord::new(user_id),
            Err(e) => {
                // A read failure degrades to a fresh record rather than
                // failing the turn; the backend session gets recreated.
                tracing::warn!(user_id = %user_id, error = %e, "Session read failed");
                SessionRecord::new(user_id)
            }
        };

        if let Some(pending) = record.pending.clone().filter(|p| p.awaiting) {
            return self.handle_confirmation(&mut record, pending, &utterance).await;
        }

        if let Some(pair) = dialogue::extract_pair(&utterance) {
            tracing::info!(user_id = %user_id, "Identifiers extracted; asking for confirmation");
            let prompt = replies::confirmation_prompt(&pair.email, &pair.reservation_id);
            record.pending = Some(PendingConfirmation {
                email: pair.email,
                reservation_id: pair.reservation_id,
                original_message: utterance,
                awaiting: true,
            });
            self.persist(&mut record).await;
            return prompt;
        }

        let reply = self.relay_to_agent(&mut record, &utterance).await;
        self.persist(&mut record).await;
        reply
    }

    /// One turn of the AWAITING_CONFIRMATION state.
    async fn handle_confirmation(
        &self,
        record: &mut SessionRecord,
        pending: PendingConfirmation,
        utterance: &str,
    ) -> String {
        match dialogue::classify(utterance) {
            ConfirmationIntent::Affirm => {
                tracing::info!(user_id = %record.user_id, "Read-back confirmed; replaying original message");
                record.pending = None;
                let reply = self.relay_to_agent(record, &pending.original_message).await;
                self.persist(record).await;
                reply
            }
            ConfirmationIntent::Reject => {
                tracing::info!(user_id = %record.user_id, "Read-back rejected; prompting re-entry");
                record.pending = None;
                self.persist(record).await;
                replies::REENTER_PROMPT.to_string()
            }
            ConfirmationIntent::Unclear => {
                // State unchanged; re-issue the identical prompt.
                replies::confirmation_prompt(&pending.email, &pending.reservation_id)
            }
        }
    }

    /// Forward an utterance to the agent backend under the cached session,
    /// creating or recreating the session as needed.
    async fn relay_to_agent(&self, record: &mut SessionRecord, utterance: &str) -> String {
        let max_attempts = self.retry.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            let (handle, seq) = match record.agent_session.as_ref() {
                Some(session) => (session.handle.clone(), session.next_seq),
                None => match self.agent.create_session().await {
                    Ok(handle) => {
                        // Defensive reset: a fresh session starts a fresh
                        // conversation, so no stale confirmation survives it.
                        record.pending = None;
                        record.agent_session = Some(AgentSession {
                            handle: handle.clone(),
                            next_seq: 1,
                        });
                        self.persist(record).await;
                        (handle, 1)
                    }
                    Err(e) => {
                        tracing::error!(user_id = %record.user_id, error = %e, "Agent session create failed");
                        return replies::APOLOGY_CONNECT.to_string();
                    }
                },
            };

            let result = self.agent.send_message(&handle, seq, utterance).await;

            // Every attempted send consumes a sequence number, whether or
            // not it succeeded.
            if let Some(session) = record.agent_session.as_mut() {
                session.next_seq = seq + 1;
            }

            match result {
                Ok(reply) => match reply.outcome() {
                    ReplyOutcome::Answer(text) => return text,
                    ReplyOutcome::Handoff(text) => {
                        tracing::info!(user_id = %record.user_id, "Backend escalated to a human; dropping session");
                        record.agent_session = None;
                        return text.unwrap_or_else(|| replies::HANDOFF_NOTICE.to_string());
                    }
                    ReplyOutcome::FailureWithoutText => {
                        tracing::warn!(user_id = %record.user_id, "Backend action failed with no text; dropping session");
                        record.agent_session = None;
                        return replies::APOLOGY_RETRY.to_string();
                    }
                },
                Err(RelayError::AgentSession(reason)) => {
                    tracing::warn!(
                        user_id = %record.user_id,
                        attempt,
                        reason = %reason,
                        "Backend session invalid; dropping"
                    );
                    record.agent_session = None;
                    if attempt == max_attempts {
                        return replies::APOLOGY_RECONNECT.to_string();
                    }
                    // Next attempt creates a fresh session.
                }
                Err(RelayError::Timeout(secs)) => {
                    tracing::warn!(user_id = %record.user_id, timeout_secs = secs, "Agent send timed out");
                    return replies::APOLOGY_ESCALATE.to_string();
                }
                Err(e) => {
                    tracing::error!(user_id = %record.user_id, error = %e, "Agent send failed");
                    return replies::APOLOGY_ESCALATE.to_string();
                }
            }
        }

        replies::APOLOGY_RECONNECT.to_string()
    }

    /// Best-effort write; a failed write is logged, not surfaced.
    async fn persist(&self, record: &mut SessionRecord) {
        record.touch();
        if let Err(e) = self.store.save(record).await {
            tracing::warn!(user_id = %record.user_id, error = %e, "Session record write failed");
        }
    }
}
