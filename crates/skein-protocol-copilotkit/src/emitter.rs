//! Wire serialization for protocol events.

use tracing::warn;

use crate::events::Event;

/// Serialize one event to its wire record: a single JSON object, no
/// framing. Callers append the newline when writing NDJSON.
///
/// Total by contract. Event payloads hold only JSON-representable data, so
/// the failure arm is unreachable; if it is ever hit the record degrades to
/// an empty object instead of panicking.
pub fn encode(event: &Event) -> String {
    match serde_json::to_string(event) {
        Ok(record) => record,
        Err(err) => {
            warn!(error = %err, "failed to serialize wire event");
            "{}".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skein_contract::ExecutionState;

    #[test]
    fn test_encode_produces_single_unframed_record() {
        let event = Event::state_sync(
            "thread-1",
            "run-1",
            "agent",
            "loom_idle",
            false,
            ExecutionState::new(),
            false,
        );
        let record = encode(&event);
        assert!(!record.contains('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&record).unwrap();
        assert_eq!(parsed["event"], "on_copilotkit_state_sync");
    }

    #[test]
    fn test_encode_round_trips() {
        let event = Event::state_sync(
            "t",
            "r",
            "a",
            "loom_complete",
            false,
            ExecutionState::new(),
            false,
        );
        let back: Event = serde_json::from_str(&encode(&event)).unwrap();
        assert_eq!(back, event);
    }
}
