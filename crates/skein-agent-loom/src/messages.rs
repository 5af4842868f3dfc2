use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Loom Native Message Model
// ============================================================================

/// A message in the loom engine's native form: either a request handed to
/// the model or a response produced by it. Multiple parts may combine into
/// one request or response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelMessage {
    Request(ModelRequest),
    Response(ModelResponse),
}

/// Input handed to the model: user prompts and tool returns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelRequest {
    pub parts: Vec<RequestPart>,
}

/// Output produced by the model: text and tool calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelResponse {
    pub parts: Vec<ResponsePart>,
}

/// One part of a model request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "part_kind", rename_all = "kebab-case")]
pub enum RequestPart {
    /// End-user input text.
    UserPrompt { content: String },
    /// Result of a tool call, answering `tool_call_id`.
    ToolReturn {
        tool_name: String,
        content: String,
        tool_call_id: String,
    },
}

/// One part of a model response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "part_kind", rename_all = "kebab-case")]
pub enum ResponsePart {
    /// Text output.
    Text { content: String },
    /// A tool invocation with structured arguments.
    ToolCall {
        tool_name: String,
        args: Value,
        tool_call_id: String,
    },
}

impl ModelMessage {
    /// Create a request carrying one user prompt.
    pub fn user_prompt(content: impl Into<String>) -> Self {
        Self::Request(ModelRequest {
            parts: vec![RequestPart::UserPrompt {
                content: content.into(),
            }],
        })
    }

    /// Create a request carrying one tool return.
    pub fn tool_return(
        tool_name: impl Into<String>,
        content: impl Into<String>,
        tool_call_id: impl Into<String>,
    ) -> Self {
        Self::Request(ModelRequest {
            parts: vec![RequestPart::ToolReturn {
                tool_name: tool_name.into(),
                content: content.into(),
                tool_call_id: tool_call_id.into(),
            }],
        })
    }

    /// Create a response carrying one text part.
    pub fn text_response(content: impl Into<String>) -> Self {
        Self::Response(ModelResponse {
            parts: vec![ResponsePart::Text {
                content: content.into(),
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let msg = ModelMessage::user_prompt("Hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            json!({
                "kind": "request",
                "parts": [{"part_kind": "user-prompt", "content": "Hello"}]
            })
        );
    }

    #[test]
    fn test_response_wire_shape() {
        let msg = ModelMessage::Response(ModelResponse {
            parts: vec![
                ResponsePart::Text {
                    content: "Checking".to_string(),
                },
                ResponsePart::ToolCall {
                    tool_name: "search".to_string(),
                    args: json!({"query": "rust"}),
                    tool_call_id: "call_1".to_string(),
                },
            ],
        });
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["kind"], json!("response"));
        assert_eq!(json["parts"][0]["part_kind"], json!("text"));
        assert_eq!(json["parts"][1]["part_kind"], json!("tool-call"));
        assert_eq!(json["parts"][1]["args"], json!({"query": "rust"}));
    }

    #[test]
    fn test_tool_return_round_trips() {
        let msg = ModelMessage::tool_return("search", "Result: 42", "call_1");
        let json = serde_json::to_string(&msg).unwrap();
        let back: ModelMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
