use serde::{Deserialize, Serialize};
use skein_contract::{AgentError, ExecutionState};

/// Role stamped on every state sync event.
pub const SYNC_ROLE: &str = "assistant";

/// Generate a fresh run identifier. Every emitted event carries its own.
pub fn gen_run_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ============================================================================
// Wire Event Types
// ============================================================================

/// CopilotKit remote protocol events, one JSON object per wire record.
///
/// The `event` field tags the kind. Field order matches the protocol: the
/// tag first, then the variant fields as declared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum Event {
    /// Snapshot of execution state for an in-progress or completed run.
    ///
    /// `running=false` marks the terminal event for a run; `active` marks
    /// whether the emitting node currently holds execution.
    #[serde(rename = "on_copilotkit_state_sync")]
    StateSync {
        thread_id: String,
        run_id: String,
        agent_name: String,
        node_name: String,
        active: bool,
        state: ExecutionState,
        running: bool,
        role: String,
    },

    /// Run failure notification. The failure itself still propagates to the
    /// caller after this event; it is a notification, not a substitute.
    #[serde(rename = "on_copilotkit_error")]
    Error { data: ErrorData },
}

/// Payload of an error event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorData {
    pub error: ErrorDetails,
    pub thread_id: String,
    pub agent_name: String,
    pub node_name: String,
}

/// The failure being reported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorDetails {
    /// Human-readable error message.
    pub message: String,
    /// Stable error kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Agent that raised the error.
    pub agent_name: String,
}

impl Event {
    // ========================================================================
    // Factory Methods
    // ========================================================================

    /// Create a state sync event. Role is always `"assistant"`.
    pub fn state_sync(
        thread_id: impl Into<String>,
        run_id: impl Into<String>,
        agent_name: impl Into<String>,
        node_name: impl Into<String>,
        active: bool,
        state: ExecutionState,
        running: bool,
    ) -> Self {
        Self::StateSync {
            thread_id: thread_id.into(),
            run_id: run_id.into(),
            agent_name: agent_name.into(),
            node_name: node_name.into(),
            active,
            state,
            running,
            role: SYNC_ROLE.to_string(),
        }
    }

    /// Create an error event from a run-level failure.
    pub fn run_error(
        error: &AgentError,
        thread_id: impl Into<String>,
        agent_name: impl Into<String>,
        node_name: impl Into<String>,
    ) -> Self {
        let agent_name = agent_name.into();
        Self::Error {
            data: ErrorData {
                error: ErrorDetails {
                    message: error.to_string(),
                    kind: error.kind().to_string(),
                    agent_name: agent_name.clone(),
                },
                thread_id: thread_id.into(),
                agent_name,
                node_name: node_name.into(),
            },
        }
    }

    /// Whether this event is terminal for its run.
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::StateSync { running, .. } => !running,
            Self::Error { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use skein_contract::StateError;

    fn state_of(value: serde_json::Value) -> ExecutionState {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_state_sync_wire_shape() {
        let event = Event::state_sync(
            "thread-1",
            "run-1",
            "my_agent",
            "loom_stream",
            true,
            state_of(json!({"step": 1})),
            true,
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            json!({
                "event": "on_copilotkit_state_sync",
                "thread_id": "thread-1",
                "run_id": "run-1",
                "agent_name": "my_agent",
                "node_name": "loom_stream",
                "active": true,
                "state": {"step": 1},
                "running": true,
                "role": "assistant"
            })
        );
    }

    #[test]
    fn test_event_tag_serializes_first() {
        let event = Event::state_sync(
            "t",
            "r",
            "a",
            "n",
            false,
            ExecutionState::new(),
            false,
        );
        let line = serde_json::to_string(&event).unwrap();
        assert!(line.starts_with("{\"event\":\"on_copilotkit_state_sync\""));
    }

    #[test]
    fn test_error_event_wire_shape() {
        let err = AgentError::Runtime("model unavailable".into());
        let event = Event::run_error(&err, "thread-1", "my_agent", "loom_error");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            json!({
                "event": "on_copilotkit_error",
                "data": {
                    "error": {
                        "message": "backend run failed: model unavailable",
                        "type": "RuntimeError",
                        "agent_name": "my_agent"
                    },
                    "thread_id": "thread-1",
                    "agent_name": "my_agent",
                    "node_name": "loom_error"
                }
            })
        );
    }

    #[test]
    fn test_merge_failure_maps_to_merge_kind() {
        let err: AgentError = StateError::Merge("missing messages key".into()).into();
        let event = Event::run_error(&err, "t", "a", "loom_error");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["data"]["error"]["type"], json!("MergeError"));
    }

    #[test]
    fn test_terminality() {
        let streaming =
            Event::state_sync("t", "r", "a", "n", true, ExecutionState::new(), true);
        let terminal =
            Event::state_sync("t", "r", "a", "n", false, ExecutionState::new(), false);
        let error = Event::run_error(
            &AgentError::Runtime("x".into()),
            "t",
            "a",
            "loom_error",
        );
        assert!(!streaming.is_terminal());
        assert!(terminal.is_terminal());
        assert!(error.is_terminal());
    }

    #[test]
    fn test_gen_run_id_is_unique_per_call() {
        let a = gen_run_id();
        let b = gen_run_id();
        assert_eq!(a.len(), 36);
        assert_ne!(a, b);
    }
}
