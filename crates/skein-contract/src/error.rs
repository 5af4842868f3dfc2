use thiserror::Error;

/// Errors from state merging.
#[derive(Debug, Error)]
pub enum StateError {
    /// The merge function rejected its inputs.
    #[error("state merge failed: {0}")]
    Merge(String),

    /// Run state was not a JSON object.
    #[error("execution state must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// Serialization failed while building the merged state.
    #[error("state serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Run-level failure surfaced by an agent.
///
/// Per-message conversion problems never reach this type; they are absorbed
/// inside the codec. Anything here ends the run: it is reported once as an
/// error wire event and once as the stream's final `Err` item.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The configured state merger failed.
    #[error("state merge failed: {0}")]
    Merge(#[from] StateError),

    /// The backend engine failed before or during the run.
    #[error("backend run failed: {0}")]
    Runtime(String),

    /// A thread store adapter failed.
    #[error("thread store failed: {0}")]
    Store(String),
}

impl AgentError {
    /// Stable error kind used as the wire `type` field on error events.
    pub fn kind(&self) -> &'static str {
        match self {
            AgentError::Merge(_) => "MergeError",
            AgentError::Runtime(_) => "RuntimeError",
            AgentError::Store(_) => "StoreError",
        }
    }
}
