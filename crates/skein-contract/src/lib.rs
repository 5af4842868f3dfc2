//! Canonical message model and agent contracts shared across the skein SDK.

pub mod action;
pub mod agent;
pub mod convert;
pub mod error;
pub mod message;
pub mod meta;
pub mod state;

// message
pub use message::{FunctionCall, Message, ToolCall};

// action / meta
pub use action::ActionDescriptor;
pub use meta::MetaEvent;

// state
pub use state::{state_without_messages, ExecutionState, COPILOTKIT_KEY, MESSAGES_KEY};

// convert
pub use convert::{MessageConverter, StateMerger};

// agent
pub use agent::{Agent, AgentDescriptor, EventStream, ExecuteRequest, ThreadStateSnapshot};

// error
pub use error::{AgentError, StateError};
