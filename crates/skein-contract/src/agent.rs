use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::ActionDescriptor;
use crate::error::AgentError;
use crate::message::Message;
use crate::meta::MetaEvent;
use crate::state::ExecutionState;

/// Lazy sequence of newline-terminated wire event strings produced by one
/// run. An error ends the stream as its final item, after the matching
/// error wire event has been yielded.
pub type EventStream = BoxStream<'static, Result<String, AgentError>>;

/// Registry-facing description of an agent instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentDescriptor {
    /// Agent name.
    pub name: String,
    /// Agent description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Backend family that produced this adapter instance.
    #[serde(rename = "type")]
    pub family: String,
}

/// Request to execute one run against a thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecuteRequest {
    /// Thread identifier.
    #[serde(rename = "threadId")]
    pub thread_id: String,
    /// Conversation messages, canonical form.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Prior execution state for the thread.
    #[serde(default)]
    pub state: Value,
    /// Opaque per-run configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    /// Actions available to the backend for this run.
    #[serde(default)]
    pub actions: Vec<ActionDescriptor>,
    /// Meta events forwarded by the outer runtime.
    #[serde(rename = "metaEvents", default)]
    pub meta_events: Vec<MetaEvent>,
}

impl ExecuteRequest {
    /// Create a request for the given thread and messages.
    pub fn new(thread_id: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            thread_id: thread_id.into(),
            messages,
            ..Default::default()
        }
    }

    /// Set the prior execution state.
    #[must_use]
    pub fn with_state(mut self, state: Value) -> Self {
        self.state = state;
        self
    }

    /// Set the available actions.
    #[must_use]
    pub fn with_actions(mut self, actions: Vec<ActionDescriptor>) -> Self {
        self.actions = actions;
        self
    }

    /// Set the per-run configuration.
    #[must_use]
    pub fn with_config(mut self, config: Value) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the forwarded meta events.
    #[must_use]
    pub fn with_meta_events(mut self, meta_events: Vec<MetaEvent>) -> Self {
        self.meta_events = meta_events;
        self
    }
}

/// Snapshot of a thread's stored state, message history split out in
/// canonical form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreadStateSnapshot {
    /// Thread identifier as queried.
    #[serde(rename = "threadId")]
    pub thread_id: String,
    /// Whether the store holds non-empty state for this thread.
    #[serde(rename = "threadExists")]
    pub thread_exists: bool,
    /// Stored state without its `messages` entry.
    pub state: ExecutionState,
    /// Message history, canonical form.
    pub messages: Vec<Message>,
}

impl ThreadStateSnapshot {
    /// Snapshot for a thread the store does not know.
    pub fn missing(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            thread_exists: false,
            state: ExecutionState::new(),
            messages: Vec::new(),
        }
    }
}

/// An agent backend adapter: executes runs and answers thread queries.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Agent name, unique within the hosting registry.
    fn name(&self) -> &str;

    /// Agent description.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Backend family identifier (the descriptor `type` field).
    fn family(&self) -> &'static str;

    /// Registry-facing descriptor.
    fn descriptor(&self) -> AgentDescriptor {
        AgentDescriptor {
            name: self.name().to_string(),
            description: self.description().map(str::to_string),
            family: self.family().to_string(),
        }
    }

    /// Start one run. Returns immediately with the lazy event sequence;
    /// all work happens as the caller consumes it.
    fn execute(&self, request: ExecuteRequest) -> EventStream;

    /// Current stored state for a thread.
    async fn get_state(&self, thread_id: &str) -> Result<ThreadStateSnapshot, AgentError>;
}
