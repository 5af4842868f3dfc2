use serde_json::json;
use skein_contract::{
    ActionDescriptor, ExecutionState, StateError, StateMerger, COPILOTKIT_KEY, MESSAGES_KEY,
};

use crate::messages::ModelMessage;

/// Default merge policy: shallow-merge prior state with two fixed entries.
///
/// `messages` and `copilotkit.actions` are replaced wholesale, never
/// appended; everything else in the prior state passes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStateMerger;

impl StateMerger for DefaultStateMerger {
    type Native = ModelMessage;

    fn merge(
        &self,
        prior: ExecutionState,
        messages: &[ModelMessage],
        actions: &[ActionDescriptor],
        _agent_name: &str,
    ) -> Result<ExecutionState, StateError> {
        let mut state = prior;
        state.insert(MESSAGES_KEY.to_string(), serde_json::to_value(messages)?);
        state.insert(
            COPILOTKIT_KEY.to_string(),
            json!({ "actions": serde_json::to_value(actions)? }),
        );
        Ok(state)
    }
}
