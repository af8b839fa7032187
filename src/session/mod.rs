//! Session correlation state: records, stores, and per-user locking.

pub mod lock;
pub mod nats;
pub mod record;
pub mod store;

pub use lock::UserLocks;
pub use nats::NatsKvSessionStore;
pub use record::{AgentSession, PendingConfirmation, SessionRecord};
pub use store::{MemorySessionStore, SessionStore};
