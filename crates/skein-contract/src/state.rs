use serde_json::{Map, Value};

/// Execution state for one thread: a JSON object mutated over the course
/// of a run. After a merge it always holds a `messages` entry and a nested
/// `copilotkit.actions` entry.
pub type ExecutionState = Map<String, Value>;

/// State key holding the backend-native message history.
pub const MESSAGES_KEY: &str = "messages";

/// State key holding the protocol namespace (`{ "actions": [...] }`).
pub const COPILOTKIT_KEY: &str = "copilotkit";

/// Copy of `state` with the `messages` entry removed.
///
/// Streaming sync events show only non-message state; the message history
/// travels once, on the terminal event.
pub fn state_without_messages(state: &ExecutionState) -> ExecutionState {
    let mut stripped = state.clone();
    stripped.remove(MESSAGES_KEY);
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state_of(value: Value) -> ExecutionState {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_state_without_messages_strips_only_messages() {
        let state = state_of(json!({
            "messages": [{"kind": "request"}],
            "step": 3,
            "copilotkit": {"actions": []}
        }));
        let stripped = state_without_messages(&state);
        assert!(!stripped.contains_key(MESSAGES_KEY));
        assert_eq!(stripped["step"], json!(3));
        assert_eq!(stripped[COPILOTKIT_KEY], json!({"actions": []}));
    }

    #[test]
    fn test_state_without_messages_leaves_original_intact() {
        let state = state_of(json!({"messages": [1, 2, 3]}));
        let _ = state_without_messages(&state);
        assert!(state.contains_key(MESSAGES_KEY));
    }
}
