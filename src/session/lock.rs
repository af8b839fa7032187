//! Per-user write serialization.
//!
//! Two concurrent turns for the same user would otherwise race on session
//! creation and sequence numbers. Turns for the same `user_id` queue on a
//! keyed async mutex; turns for different users proceed independently.
//! Races between separate relay instances are out of scope here.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Default)]
pub struct UserLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a user, waiting behind any in-flight turn.
    pub async fn acquire(&self, user_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().expect("user lock map poisoned");
            locks.entry(user_id.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }
}
