//! CopilotKit remote wire protocol: event types and NDJSON record emission.

pub mod emitter;
pub mod events;

pub use emitter::encode;
pub use events::{gen_run_id, ErrorData, ErrorDetails, Event, SYNC_ROLE};
