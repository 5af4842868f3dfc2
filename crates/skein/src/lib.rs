//! Agent execution and state synchronization SDK.
//!
//! One crate to depend on: re-exports the contract types, the CopilotKit
//! wire protocol, the thread state store, and the loom backend adapter.
//!
//! # Example: serving a loom agent
//!
//! ```ignore
//! use std::sync::Arc;
//! use futures::StreamExt;
//! use skein::{Agent, ExecuteRequest, LoomAgent, Message};
//!
//! let agent = LoomAgent::new("research_agent", Arc::new(my_runtime))
//!     .with_description("Researches topics");
//!
//! let request = ExecuteRequest::new("thread-1", vec![Message::user("hi")]);
//! let mut events = agent.execute(request);
//! while let Some(record) = events.next().await {
//!     socket.send(record?).await?;
//! }
//! ```

// Contract: messages, state, agent surface
pub use skein_contract::{
    state_without_messages, ActionDescriptor, Agent, AgentDescriptor, AgentError, EventStream,
    ExecuteRequest, ExecutionState, FunctionCall, Message, MessageConverter, MetaEvent,
    StateError, StateMerger, ThreadStateSnapshot, ToolCall, COPILOTKIT_KEY, MESSAGES_KEY,
};

// Wire protocol
pub use skein_protocol_copilotkit::{encode, gen_run_id, ErrorData, ErrorDetails, Event, SYNC_ROLE};

// Thread state storage
pub use skein_thread_store::{MemoryThreadStore, ThreadStateStore, ThreadStoreError};

// Loom backend adapter
pub use skein_agent_loom::{
    DefaultStateMerger, LoomAgent, LoomMessageConverter, LoomRuntime, ModelMessage, ModelRequest,
    ModelResponse, RequestPart, ResponsePart, RunEvent, RunStream, RuntimeError, LAST_OUTPUT_KEY,
    LOOM_FAMILY,
};
