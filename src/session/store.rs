//! Pluggable persistence for session records.
//!
//! The relay treats the store as an external collaborator reached via
//! load/save/delete. The memory provider backs tests and single-instance
//! runs; the NATS KV provider (see `nats.rs`) survives process restarts
//! and supports multiple relay instances.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::session::record::SessionRecord;

/// Trait for persisting one session record per user.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Provider name (e.g., "memory", "nats")
    fn name(&self) -> &str;

    /// Load the record for a user, if one exists
    async fn load(&self, user_id: &str) -> Result<Option<SessionRecord>>;

    /// Save (insert or replace) the record for its user
    async fn save(&self, record: &SessionRecord) -> Result<()>;

    /// Delete the record for a user; deleting a missing record is not an error
    async fn delete(&self, user_id: &str) -> Result<()>;
}

/// In-process session store.
#[derive(Default)]
pub struct MemorySessionStore {
    records: RwLock<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn load(&self, user_id: &str) -> Result<Option<SessionRecord>> {
        let records = self.records.read().await;
        Ok(records.get(user_id).cloned())
    }

    async fn save(&self, record: &SessionRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.user_id.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        let mut records = self.records.write().await;
        records.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::record::AgentSession;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemorySessionStore::new();
        assert!(store.load("user-1").await.unwrap().is_none());

        let mut record = SessionRecord::new("user-1");
        record.agent_session = Some(AgentSession {
            handle: "sess-1".into(),
            next_seq: 1,
        });
        store.save(&record).await.unwrap();

        let loaded = store.load("user-1").await.unwrap().unwrap();
        assert_eq!(loaded.agent_session.unwrap().handle, "sess-1");
    }

    #[tokio::test]
    async fn test_memory_store_save_replaces() {
        let store = MemorySessionStore::new();
        let mut record = SessionRecord::new("user-1");
        store.save(&record).await.unwrap();

        record.agent_session = Some(AgentSession {
            handle: "sess-2".into(),
            next_seq: 7,
        });
        store.save(&record).await.unwrap();

        let loaded = store.load("user-1").await.unwrap().unwrap();
        assert_eq!(loaded.agent_session.unwrap().next_seq, 7);
    }

    #[tokio::test]
    async fn test_memory_store_delete() {
        let store = MemorySessionStore::new();
        store.save(&SessionRecord::new("user-1")).await.unwrap();
        store.delete("user-1").await.unwrap();
        assert!(store.load("user-1").await.unwrap().is_none());

        // Deleting again is a no-op
        store.delete("user-1").await.unwrap();
    }
}
