//! Loom backend adapter: drives a loom engine run and emits sync events.
//!
//! [`LoomAgent`] is the adapter entry point. It converts canonical messages
//! to the loom-native model, merges them with prior thread state, executes
//! the run through a [`LoomRuntime`], and emits one wire record per engine
//! event plus a terminal record carrying the final state.
//!
//! The conversion and merge steps are trait objects; construct the agent
//! with [`LoomAgent::with_converter`] or [`LoomAgent::with_merger`] to
//! replace either without touching the driver.

pub mod agent;
pub mod codec;
pub mod merge;
pub mod messages;
pub mod runtime;

// Driver exports
pub use agent::{
    LoomAgent, LAST_OUTPUT_KEY, LOOM_FAMILY, NODE_COMPLETE, NODE_ERROR, NODE_IDLE, NODE_STREAM,
};

// Codec and merge exports
pub use codec::LoomMessageConverter;
pub use merge::DefaultStateMerger;

// Native message model exports
pub use messages::{ModelMessage, ModelRequest, ModelResponse, RequestPart, ResponsePart};

// Engine contract exports
pub use runtime::{LoomRuntime, RunEvent, RunStream, RuntimeError};
