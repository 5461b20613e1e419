// Upstream completion support
//
// The orchestrator talks to the completion API through the
// `CompletionProvider` trait so tests can substitute a scripted model.

use async_trait::async_trait;
use thiserror::Error;

pub mod openai;
pub mod types;

pub use openai::OpenAIProvider;
pub use types::{Completion, CompletionRequest, FunctionCall, Message, Role, ToolCall, Transcript};

/// Failure talking to the completion API. Always fatal to the chat request.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("failed to call completion API: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("completion API error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse completion response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("malformed completion response: {0}")]
    Malformed(String),
}

/// Trait for completion backends
///
/// One call is one round: the full transcript and every tool schema go up,
/// and either a final answer or a batch of tool calls comes back.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<Completion, UpstreamError>;

    /// Provider name, for logs
    fn name(&self) -> &str;
}
