use super::*;

/// Keyed store holding the latest execution state per thread.
///
/// Overwrite semantics: only the most recent state for a thread is
/// retained, never a history of intermediate states. Absence is a value
/// (`None`), not an error. The contract is fallible so adapters backed by
/// real storage fit it; concurrent writers to one thread id are
/// last-write-wins and must be serialized externally if that matters.
#[async_trait]
pub trait ThreadStateStore: Send + Sync {
    /// Store the state for a thread, replacing any previous entry.
    async fn put(&self, thread_id: &str, state: ExecutionState) -> Result<(), ThreadStoreError>;

    /// Load the latest state for a thread, `None` if the thread is unknown.
    async fn get(&self, thread_id: &str) -> Result<Option<ExecutionState>, ThreadStoreError>;

    /// Whether the store holds an entry for a thread. Convenience wrapper.
    async fn contains(&self, thread_id: &str) -> Result<bool, ThreadStoreError> {
        Ok(self.get(thread_id).await?.is_some())
    }
}

/// Storage errors.
#[derive(Debug, Error)]
pub enum ThreadStoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<ThreadStoreError> for AgentError {
    fn from(err: ThreadStoreError) -> Self {
        AgentError::Store(err.to_string())
    }
}
