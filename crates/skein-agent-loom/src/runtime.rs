use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::Value;
use skein_contract::AgentError;
use thiserror::Error;

use crate::messages::ModelMessage;

/// Progress notification or final output from one backend run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// Incremental progress. Payload shape is engine-specific.
    Delta(Value),
    /// Final output. Last event of a successful run.
    Output(Value),
}

/// Lazy, finite, non-restartable sequence of run events.
pub type RunStream = BoxStream<'static, Result<RunEvent, RuntimeError>>;

/// Errors raised by a loom engine.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The engine rejected the run before producing any event.
    #[error("run rejected: {0}")]
    Rejected(String),

    /// The engine failed mid-run.
    #[error("run failed: {0}")]
    Failed(String),

    /// The run stream ended without a final output.
    #[error("run ended without a final output")]
    MissingOutput,
}

impl From<RuntimeError> for AgentError {
    fn from(err: RuntimeError) -> Self {
        AgentError::Runtime(err.to_string())
    }
}

/// Incremental run entry point of a loom engine.
///
/// One call is one run: zero-or-more `Delta` events followed by exactly one
/// `Output`. `history` is the prior conversation in native form, excluding
/// the prompt being run.
#[async_trait]
pub trait LoomRuntime: Send + Sync {
    async fn run_stream(
        &self,
        prompt: &str,
        history: Option<Vec<ModelMessage>>,
    ) -> Result<RunStream, RuntimeError>;
}
