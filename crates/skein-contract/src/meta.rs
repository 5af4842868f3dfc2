use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol meta event forwarded by the outer runtime alongside a run
/// request. Backends that have no use for a given meta event ignore it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetaEvent {
    /// Meta event name.
    pub name: String,
    /// Event payload, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl MetaEvent {
    /// Create a meta event without a payload.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Set the payload.
    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}
