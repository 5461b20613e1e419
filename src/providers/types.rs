// Conversation types shared by the completion client and the orchestrator
//
// Messages use the OpenAI chat format directly so the transcript can be sent
// upstream without a conversion pass.

use serde::{Deserialize, Serialize};

use crate::tools::types::ToolDefinition;

/// Author of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
}

/// A single message in the transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    /// Text content (may be null on assistant messages that only call tools)
    pub content: Option<String>,
    /// Tool calls issued by the assistant, in upstream order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    /// For tool messages: the id of the call this result answers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    pub fn assistant(content: Option<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content,
            tool_calls: if tool_calls.is_empty() {
                None
            } else {
                Some(tool_calls)
            },
            tool_call_id: None,
        }
    }

    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
        }
    }
}

/// Tool call issued by the model (OpenAI wire shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Upstream-assigned id, unique within one completion response
    pub id: String,
    /// Always "function"
    #[serde(rename = "type", default = "default_call_type")]
    pub call_type: String,
    pub function: FunctionCall,
}

fn default_call_type() -> String {
    "function".to_string()
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            call_type: default_call_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    pub fn arguments(&self) -> &str {
        &self.function.arguments
    }
}

/// Function name plus raw JSON-encoded arguments, kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

/// Ordered, append-only message history for one chat request
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Start a transcript with a single user message
    pub fn seeded(user_message: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(user_message)],
        }
    }

    pub fn push(&mut self, message: Message) {
        if message.role == Role::Tool {
            debug_assert!(
                message
                    .tool_call_id
                    .as_deref()
                    .is_some_and(|id| self.has_pending_call(id)),
                "tool message must answer a call from a preceding assistant message"
            );
        }
        self.messages.push(message);
    }

    /// True if `id` was issued by some assistant message already in the transcript
    pub fn has_pending_call(&self, id: &str) -> bool {
        self.messages
            .iter()
            .filter_map(|m| m.tool_calls.as_ref())
            .flatten()
            .any(|call| call.id == id)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

/// One round's input to the completion client
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub tools: &'a [ToolDefinition],
}

/// Parsed result of one completion round
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// No tool calls: the model is done
    FinalAnswer(String),
    /// The model wants tools run before it continues
    ToolCalls {
        content: Option<String>,
        calls: Vec<ToolCall>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_message_serialization() {
        let msg = Message::tool("call_1", "{\"ok\":true}");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "tool");
        assert_eq!(json["tool_call_id"], "call_1");
        assert!(json.get("tool_calls").is_none());
    }

    #[test]
    fn test_assistant_message_keeps_null_content() {
        let msg = Message::assistant(None, vec![ToolCall::new("call_1", "search", "{}")]);
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json["content"].is_null());
        assert_eq!(json["tool_calls"][0]["type"], "function");
        assert_eq!(json["tool_calls"][0]["function"]["name"], "search");
    }

    #[test]
    fn test_transcript_tracks_issued_calls() {
        let mut transcript = Transcript::seeded("hi");
        assert!(!transcript.has_pending_call("call_1"));

        transcript.push(Message::assistant(
            Some(String::new()),
            vec![ToolCall::new("call_1", "search", "{}")],
        ));
        transcript.push(Message::tool("call_1", "{}"));

        assert!(transcript.has_pending_call("call_1"));
        assert_eq!(transcript.len(), 3);
    }
}
