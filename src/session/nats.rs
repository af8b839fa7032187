//! NATS JetStream KV session store, one key per user.

use async_nats::jetstream;
use async_trait::async_trait;

use crate::error::{RelayError, Result};
use crate::session::record::SessionRecord;
use crate::session::store::SessionStore;

/// Session store backed by a JetStream key-value bucket.
pub struct NatsKvSessionStore {
    kv: jetstream::kv::Store,
}

impl NatsKvSessionStore {
    /// Connect to NATS and open (or create) the session bucket.
    pub async fn connect(url: &str, bucket: &str) -> Result<Self> {
        let client = async_nats::connect(url)
            .await
            .map_err(|e| RelayError::Store(format!("{url}: {e}")))?;

        tracing::info!(url = %url, "Connected to NATS");

        let js = jetstream::new(client);

        let kv = match js.get_key_value(bucket).await {
            Ok(kv) => kv,
            Err(_) => js
                .create_key_value(jetstream::kv::Config {
                    bucket: bucket.to_string(),
                    ..Default::default()
                })
                .await
                .map_err(|e| {
                    RelayError::Store(format!("Failed to create bucket '{bucket}': {e}"))
                })?,
        };

        Ok(Self { kv })
    }

    /// KV keys allow a restricted character set; user ids are opaque
    /// caller-supplied strings, so anything outside it maps to '_'.
    fn kv_key(user_id: &str) -> String {
        user_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '=' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

#[async_trait]
impl SessionStore for NatsKvSessionStore {
    fn name(&self) -> &str {
        "nats"
    }

    async fn load(&self, user_id: &str) -> Result<Option<SessionRecord>> {
        let entry = self
            .kv
            .get(Self::kv_key(user_id))
            .await
            .map_err(|e| RelayError::Store(format!("Failed to read '{user_id}': {e}")))?;

        match entry {
            Some(bytes) => {
                let record = serde_json::from_slice(&bytes)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, record: &SessionRecord) -> Result<()> {
        let payload = serde_json::to_vec(record)?;

        self.kv
            .put(Self::kv_key(&record.user_id), payload.into())
            .await
            .map_err(|e| {
                RelayError::Store(format!("Failed to write '{}': {}", record.user_id, e))
            })?;

        tracing::debug!(user_id = %record.user_id, "Session record saved");
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        self.kv
            .purge(Self::kv_key(user_id))
            .await
            .map_err(|e| RelayError::Store(format!("Failed to delete '{user_id}': {e}")))?;

        tracing::debug!(user_id = %user_id, "Session record deleted");
        Ok(())
    }
}
