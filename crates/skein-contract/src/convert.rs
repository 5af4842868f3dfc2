//! Capability traits for the backend-specific conversion and merge steps.
//!
//! Each backend family ships one canonical implementation of each trait;
//! callers inject an alternative when the backend wants a different message
//! mapping or state shape.

use crate::action::ActionDescriptor;
use crate::error::StateError;
use crate::message::Message;
use crate::state::ExecutionState;

/// Message boundary: canonical messages <-> backend-native messages.
///
/// The pair is best-effort, not a bijection: content the target format
/// cannot represent is dropped (with a diagnostic), never an error.
pub trait MessageConverter: Send + Sync {
    /// Backend-native message type.
    type Native;

    /// Convert canonical messages to the backend-native form.
    fn to_native(&self, messages: &[Message]) -> Vec<Self::Native>;

    /// Convert backend-native messages back to canonical form.
    fn to_canonical(&self, messages: &[Self::Native]) -> Vec<Message>;
}

/// State boundary: combine prior state, converted history, and available
/// actions into the state object handed to a backend run.
///
/// The core requires only that the result contains a `messages` entry; the
/// rest of the shape belongs to the merger.
pub trait StateMerger: Send + Sync {
    /// Backend-native message type carried in the merged state.
    type Native;

    /// Merge prior state with the converted message history and actions.
    fn merge(
        &self,
        prior: ExecutionState,
        messages: &[Self::Native],
        actions: &[ActionDescriptor],
        agent_name: &str,
    ) -> Result<ExecutionState, StateError>;
}
