use async_trait::async_trait;
use skein_contract::ExecutionState;

use crate::traits::{ThreadStateStore, ThreadStoreError};

/// In-memory thread state store. Lifetime is the owning process; nothing
/// is persisted.
#[derive(Default)]
pub struct MemoryThreadStore {
    entries: tokio::sync::RwLock<std::collections::HashMap<String, ExecutionState>>,
}

impl MemoryThreadStore {
    /// Create a new in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ThreadStateStore for MemoryThreadStore {
    async fn put(&self, thread_id: &str, state: ExecutionState) -> Result<(), ThreadStoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(thread_id.to_string(), state);
        Ok(())
    }

    async fn get(&self, thread_id: &str) -> Result<Option<ExecutionState>, ThreadStoreError> {
        let entries = self.entries.read().await;
        Ok(entries.get(thread_id).cloned())
    }
}
