use serde_json::Value;
use skein_contract::{Message, MessageConverter, ToolCall};
use tracing::warn;

use crate::messages::{ModelMessage, ModelRequest, ModelResponse, RequestPart, ResponsePart};

/// Default codec between canonical messages and the loom native form.
///
/// Best-effort in both directions: a message the target format cannot
/// represent is dropped with a diagnostic, and one bad message never stops
/// the rest of the sequence from converting.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoomMessageConverter;

impl MessageConverter for LoomMessageConverter {
    type Native = ModelMessage;

    fn to_native(&self, messages: &[Message]) -> Vec<ModelMessage> {
        let mut native = Vec::with_capacity(messages.len());
        for (index, message) in messages.iter().enumerate() {
            match message {
                Message::User { content } => match content {
                    Value::String(text) => native.push(ModelMessage::user_prompt(text.clone())),
                    _ => {
                        warn!(index, "dropping user message with non-string content");
                    }
                },
                Message::Assistant {
                    content,
                    tool_calls,
                } => match response_parts(content.as_deref(), tool_calls.as_deref()) {
                    Ok(parts) => {
                        if !parts.is_empty() {
                            native.push(ModelMessage::Response(ModelResponse { parts }));
                        }
                    }
                    Err(err) => {
                        warn!(
                            index,
                            error = %err,
                            "dropping assistant message with malformed tool-call arguments"
                        );
                    }
                },
                Message::Tool {
                    name,
                    content,
                    tool_call_id,
                } => native.push(ModelMessage::tool_return(name, content, tool_call_id)),
                // No native equivalent for host instructions.
                Message::System { .. } => {}
            }
        }
        native
    }

    fn to_canonical(&self, messages: &[ModelMessage]) -> Vec<Message> {
        let mut canonical = Vec::with_capacity(messages.len());
        for message in messages {
            match message {
                ModelMessage::Request(request) => split_request(request, &mut canonical),
                ModelMessage::Response(response) => {
                    if let Some(message) = collapse_response(response) {
                        canonical.push(message);
                    }
                }
            }
        }
        canonical
    }
}

/// Build the response parts for one assistant message. A malformed JSON
/// argument string fails the whole message.
fn response_parts(
    content: Option<&str>,
    tool_calls: Option<&[ToolCall]>,
) -> Result<Vec<ResponsePart>, serde_json::Error> {
    let mut parts = Vec::new();
    if let Some(text) = content {
        if !text.is_empty() {
            parts.push(ResponsePart::Text {
                content: text.to_string(),
            });
        }
    }
    for call in tool_calls.into_iter().flatten() {
        parts.push(ResponsePart::ToolCall {
            tool_name: call.function.name.clone(),
            args: serde_json::from_str(&call.function.arguments)?,
            tool_call_id: call.id.clone(),
        });
    }
    Ok(parts)
}

/// One request expands to one canonical message per part.
fn split_request(request: &ModelRequest, out: &mut Vec<Message>) {
    for part in &request.parts {
        match part {
            RequestPart::UserPrompt { content } => out.push(Message::user(content)),
            RequestPart::ToolReturn {
                tool_name,
                content,
                tool_call_id,
            } => out.push(Message::tool(tool_name, content, tool_call_id)),
        }
    }
}

/// One response collapses to at most one assistant message: text parts
/// concatenate, tool-call parts collect. No parts, no message.
fn collapse_response(response: &ModelResponse) -> Option<Message> {
    let mut content = String::new();
    let mut tool_calls = Vec::new();
    for part in &response.parts {
        match part {
            ResponsePart::Text { content: text } => content.push_str(text),
            ResponsePart::ToolCall {
                tool_name,
                args,
                tool_call_id,
            } => {
                let arguments = serde_json::to_string(args).unwrap_or_else(|err| {
                    warn!(
                        error = %err,
                        tool_call_id = %tool_call_id,
                        "failed to re-encode tool-call arguments"
                    );
                    "{}".to_string()
                });
                tool_calls.push(ToolCall::function(tool_call_id, tool_name, arguments));
            }
        }
    }
    if content.is_empty() && tool_calls.is_empty() {
        return None;
    }
    Some(Message::Assistant {
        content: (!content.is_empty()).then_some(content),
        tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn converter() -> LoomMessageConverter {
        LoomMessageConverter
    }

    #[test]
    fn test_user_message_becomes_user_prompt_request() {
        let native = converter().to_native(&[Message::user("Hello")]);
        assert_eq!(native, vec![ModelMessage::user_prompt("Hello")]);
    }

    #[test]
    fn test_non_string_user_content_is_dropped() {
        let messages = vec![
            Message::User {
                content: json!([{"type": "image"}]),
            },
            Message::user("still here"),
        ];
        let native = converter().to_native(&messages);
        assert_eq!(native, vec![ModelMessage::user_prompt("still here")]);
    }

    #[test]
    fn test_assistant_with_tool_calls_decodes_arguments() {
        let message = Message::assistant_with_tool_calls(
            "Let me look",
            vec![ToolCall::function("call_1", "search", r#"{"query":"rust"}"#)],
        );
        let native = converter().to_native(&[message]);
        assert_eq!(
            native,
            vec![ModelMessage::Response(ModelResponse {
                parts: vec![
                    ResponsePart::Text {
                        content: "Let me look".to_string()
                    },
                    ResponsePart::ToolCall {
                        tool_name: "search".to_string(),
                        args: json!({"query": "rust"}),
                        tool_call_id: "call_1".to_string()
                    },
                ]
            })]
        );
    }

    #[test]
    fn test_malformed_arguments_drop_only_that_message() {
        let messages = vec![
            Message::user("first"),
            Message::assistant_with_tool_calls(
                "",
                vec![ToolCall::function("call_1", "search", "{not json")],
            ),
            Message::tool("search", "ok", "call_0"),
        ];
        let native = converter().to_native(&messages);
        assert_eq!(
            native,
            vec![
                ModelMessage::user_prompt("first"),
                ModelMessage::tool_return("search", "ok", "call_0"),
            ]
        );
    }

    #[test]
    fn test_empty_assistant_message_emits_nothing() {
        let message = Message::Assistant {
            content: Some(String::new()),
            tool_calls: None,
        };
        assert!(converter().to_native(&[message]).is_empty());
    }

    #[test]
    fn test_system_message_is_skipped() {
        let messages = vec![Message::system("be brief"), Message::user("hi")];
        let native = converter().to_native(&messages);
        assert_eq!(native, vec![ModelMessage::user_prompt("hi")]);
    }

    #[test]
    fn test_response_text_parts_concatenate() {
        let response = ModelMessage::Response(ModelResponse {
            parts: vec![
                ResponsePart::Text {
                    content: "Hello, ".to_string(),
                },
                ResponsePart::Text {
                    content: "world".to_string(),
                },
            ],
        });
        let canonical = converter().to_canonical(&[response]);
        assert_eq!(canonical, vec![Message::assistant("Hello, world")]);
    }

    #[test]
    fn test_response_with_no_parts_emits_no_message() {
        let response = ModelMessage::Response(ModelResponse { parts: vec![] });
        assert!(converter().to_canonical(&[response]).is_empty());
    }

    #[test]
    fn test_request_splits_per_part() {
        let request = ModelMessage::Request(ModelRequest {
            parts: vec![
                RequestPart::UserPrompt {
                    content: "hi".to_string(),
                },
                RequestPart::ToolReturn {
                    tool_name: "search".to_string(),
                    content: "42".to_string(),
                    tool_call_id: "call_1".to_string(),
                },
            ],
        });
        let canonical = converter().to_canonical(&[request]);
        assert_eq!(
            canonical,
            vec![Message::user("hi"), Message::tool("search", "42", "call_1")]
        );
    }

    #[test]
    fn test_round_trip_preserves_representable_content() {
        let original = vec![
            Message::user("What is 2+2?"),
            Message::assistant_with_tool_calls(
                "Calculating",
                vec![ToolCall::function("call_1", "calc", r#"{"expr":"2+2"}"#)],
            ),
            Message::tool("calc", "4", "call_1"),
            Message::assistant("The answer is 4"),
        ];
        let converter = converter();
        let round_tripped = converter.to_canonical(&converter.to_native(&original));
        assert_eq!(round_tripped, original);
    }
}
