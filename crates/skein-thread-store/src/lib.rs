//! Thread state store contract and adapters.

use async_trait::async_trait;
use skein_contract::{AgentError, ExecutionState};
use thiserror::Error;

mod memory;
mod traits;

pub use memory::MemoryThreadStore;
pub use traits::{ThreadStateStore, ThreadStoreError};
