// OpenAI-compatible completion provider
//
// Sends the transcript plus tool schemas to a `/chat/completions` endpoint
// with tool_choice "auto" and turns the first choice into a `Completion`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::types::{Completion, CompletionRequest, Message, ToolCall};
use super::{CompletionProvider, UpstreamError};
use crate::tools::types::ToolDefinition;

/// Completion provider for OpenAI-style chat APIs
#[derive(Clone)]
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    completion_url: String,
}

impl OpenAIProvider {
    pub fn new(api_key: String, completion_url: String) -> Result<Self, UpstreamError> {
        let client = Client::builder().build().map_err(UpstreamError::Transport)?;

        Ok(Self {
            client,
            api_key,
            completion_url,
        })
    }

    fn to_openai_request<'a>(request: &'a CompletionRequest<'a>) -> OpenAIRequest<'a> {
        OpenAIRequest {
            model: request.model,
            messages: request.messages,
            tools: request.tools.iter().map(OpenAITool::from).collect(),
            tool_choice: "auto",
        }
    }

    /// Interpret the first choice of a decoded response
    fn from_openai_response(response: OpenAIResponse) -> Result<Completion, UpstreamError> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::Malformed("no choices in response".to_string()))?;

        let tool_calls = choice.message.tool_calls.unwrap_or_default();
        if !tool_calls.is_empty() {
            return Ok(Completion::ToolCalls {
                content: choice.message.content,
                calls: tool_calls,
            });
        }

        match choice.message.content {
            Some(content) if !content.is_empty() => Ok(Completion::FinalAnswer(content)),
            _ => Err(UpstreamError::Malformed(
                "response has neither content nor tool calls".to_string(),
            )),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<Completion, UpstreamError> {
        let body = Self::to_openai_request(request);

        tracing::debug!(
            model = request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.completion_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(UpstreamError::Transport)?;

        let status = response.status();
        let text = response.text().await.map_err(UpstreamError::Transport)?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        tracing::debug!("Received completion response: {}", text);

        let parsed: OpenAIResponse = serde_json::from_str(&text).map_err(UpstreamError::Decode)?;
        Self::from_openai_response(parsed)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    tools: Vec<OpenAITool<'a>>,
    tool_choice: &'static str,
}

#[derive(Debug, Serialize)]
struct OpenAITool<'a> {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: OpenAIFunction<'a>,
}

#[derive(Debug, Serialize)]
struct OpenAIFunction<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a crate::tools::types::ToolInputSchema,
}

impl<'a> From<&'a ToolDefinition> for OpenAITool<'a> {
    fn from(tool: &'a ToolDefinition) -> Self {
        Self {
            tool_type: "function",
            function: OpenAIFunction {
                name: &tool.name,
                description: &tool.description,
                parameters: &tool.input_schema,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}
