//! # concierge-relay
//!
//! Session-correlating relay between the concierge voice widget and the
//! reservations agent backend.
//!
//! ## Overview
//!
//! The relay speaks the chat-completions dialect to the widget and the
//! video platform, and owns the three things neither vendor does:
//!
//! - **Session correlation**: one record per caller holding the agent
//!   backend's session handle and its strictly increasing sequence
//!   number, persisted across turns and instances.
//! - **Identifier confirmation**: utterances carrying both an email and
//!   a reservation number are intercepted, spelled back character by
//!   character, and only forwarded once the caller says yes.
//! - **Reply normalization**: replies are flattened into speakable text
//!   and shipped either as one completion object or a three-frame SSE
//!   stream, because the consumer is a text-to-speech avatar.
//!
//! ## Architecture
//!
//! ```text
//! widget/video ──► api (axum) ──► relay engine ──► agent backend (REST)
//!                                    │
//!                                    └──► session store (memory | NATS KV)
//! ```
//!
//! Store and backend sit behind traits; the memory store backs tests and
//! single-instance runs, the NATS JetStream KV store survives restarts.

pub mod agent;
pub mod api;
pub mod cli;
pub mod config;
pub mod dialogue;
pub mod dirs;
pub mod error;
pub mod relay;
pub mod server;
pub mod session;
pub mod text;
pub mod video;

pub use agent::{AgentBackend, AgentMessage, AgentMessageKind, AgentReply, HttpAgentBackend};
pub use config::RelayConfig;
pub use error::{RelayError, Result};
pub use relay::{RelayEngine, RetryPolicy};
pub use session::{
    AgentSession, MemorySessionStore, NatsKvSessionStore, PendingConfirmation, SessionRecord,
    SessionStore,
};
