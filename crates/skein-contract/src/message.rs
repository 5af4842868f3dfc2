use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical conversation message exchanged with the front-end runtime.
///
/// The variant is the role: serialization tags each object with a `role`
/// field and omits fields that are not populated for that role, so wire
/// payloads stay minimal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// End-user input. Content is usually a string; non-string content is
    /// legal on the wire but backend codecs are free to drop it.
    User {
        content: Value,
    },
    /// Model output: optional text plus zero-or-more tool calls.
    Assistant {
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<ToolCall>>,
    },
    /// Result of a tool call, answering a previous assistant tool call.
    Tool {
        name: String,
        content: String,
        tool_call_id: String,
    },
    /// Instructions injected by the host application. Backend codecs that
    /// have no native equivalent skip these.
    System {
        content: String,
    },
}

impl Message {
    /// Create a user message with string content.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: Value::String(content.into()),
        }
    }

    /// Create an assistant message with text content only.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: Some(content.into()),
            tool_calls: None,
        }
    }

    /// Create an assistant message with text content and tool calls.
    pub fn assistant_with_tool_calls(
        content: impl Into<String>,
        tool_calls: Vec<ToolCall>,
    ) -> Self {
        Self::Assistant {
            content: Some(content.into()),
            tool_calls: Some(tool_calls),
        }
    }

    /// Create a tool result message.
    pub fn tool(
        name: impl Into<String>,
        content: impl Into<String>,
        tool_call_id: impl Into<String>,
    ) -> Self {
        Self::Tool {
            name: name.into(),
            content: content.into(),
            tool_call_id: tool_call_id.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    /// String content of a user message, if this is one.
    pub fn user_text(&self) -> Option<&str> {
        match self {
            Self::User {
                content: Value::String(text),
            } => Some(text),
            _ => None,
        }
    }
}

/// A tool call requested by the assistant, in the function-call wire shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    /// Unique identifier for this tool call.
    pub id: String,
    /// Call kind discriminator, always `"function"`.
    #[serde(rename = "type")]
    pub call_type: String,
    /// The function being invoked.
    pub function: FunctionCall,
}

impl ToolCall {
    /// Create a function tool call. `arguments` is the JSON-encoded
    /// argument string as carried on the wire.
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

/// Function name and JSON-encoded arguments of a tool call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_message_tags_role() {
        let msg = Message::user("Hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, json!({"role": "user", "content": "Hello"}));
    }

    #[test]
    fn test_assistant_omits_absent_fields() {
        let msg = Message::assistant("Hi there");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"assistant\""));
        assert!(!json.contains("tool_calls"));
    }

    #[test]
    fn test_tool_call_wire_shape() {
        let msg = Message::assistant_with_tool_calls(
            "Let me check",
            vec![ToolCall::function("call_1", "search", r#"{"query":"rust"}"#)],
        );
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            json!({
                "role": "assistant",
                "content": "Let me check",
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "search", "arguments": "{\"query\":\"rust\"}"}
                }]
            })
        );
    }

    #[test]
    fn test_tool_message_round_trip() {
        let msg = Message::tool("search", "Result: 42", "call_1");
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_user_text_only_for_string_content() {
        assert_eq!(Message::user("hi").user_text(), Some("hi"));
        let structured = Message::User {
            content: json!([{"type": "image", "url": "x"}]),
        };
        assert_eq!(structured.user_text(), None);
        assert_eq!(Message::assistant("hi").user_text(), None);
    }

    #[test]
    fn test_deserialize_dispatches_on_role() {
        let msg: Message =
            serde_json::from_value(json!({"role": "system", "content": "be brief"})).unwrap();
        assert_eq!(msg, Message::system("be brief"));
    }
}
