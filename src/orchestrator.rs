// Conversation orchestrator
//
// Drives one chat request: seed the transcript with the user message, then
// alternate completion rounds and tool dispatch until the model answers
// without tool calls. Rounds are bounded by count and by deadlines.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::ChatError;
use crate::providers::{Completion, CompletionProvider, CompletionRequest, Message, Transcript};
use crate::tools::{ToolDefinition, ToolDispatcher};

/// Bounds on a single chat request
#[derive(Debug, Clone, Copy)]
pub struct ChatLimits {
    /// Maximum completion calls before giving up
    pub max_rounds: usize,
    /// Deadline for each completion call
    pub round_timeout: Duration,
    /// Deadline for the whole request, tool execution included
    pub request_timeout: Duration,
}

impl ChatLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_rounds: config.max_rounds.max(1),
            round_timeout: config.round_timeout(),
            request_timeout: config.request_timeout(),
        }
    }
}

impl Default for ChatLimits {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Successful end of a chat request
#[derive(Debug, Clone)]
pub struct ChatAnswer {
    /// Final message content, verbatim from the last round
    pub content: String,
    /// Completion calls made
    pub rounds: usize,
    /// Every message exchanged, final answer excluded
    pub transcript: Vec<Message>,
}

pub struct Orchestrator {
    provider: Arc<dyn CompletionProvider>,
    dispatcher: Arc<ToolDispatcher>,
    tools: Vec<ToolDefinition>,
    limits: ChatLimits,
}

impl Orchestrator {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        dispatcher: Arc<ToolDispatcher>,
        limits: ChatLimits,
    ) -> Self {
        let tools = dispatcher.definitions();
        Self {
            provider,
            dispatcher,
            tools,
            limits,
        }
    }

    pub fn limits(&self) -> &ChatLimits {
        &self.limits
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Answer `user_message` with `model`, calling tools as the model asks
    pub async fn chat(&self, user_message: &str, model: &str) -> Result<ChatAnswer, ChatError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("chat", %request_id, model);

        tokio::time::timeout(
            self.limits.request_timeout,
            self.run(user_message, model).instrument(span),
        )
        .await
        .map_err(|_| ChatError::RequestTimeout {
            secs: self.limits.request_timeout.as_secs(),
        })?
    }

    async fn run(&self, user_message: &str, model: &str) -> Result<ChatAnswer, ChatError> {
        info!(tools = self.tools.len(), "New chat request");
        let mut transcript = Transcript::seeded(user_message);

        for round in 1..=self.limits.max_rounds {
            info!(round, messages = transcript.len(), "Calling completion API");

            let request = CompletionRequest {
                model,
                messages: transcript.messages(),
                tools: &self.tools,
            };
            let completion = tokio::time::timeout(self.limits.round_timeout, self.provider.complete(&request))
                .await
                .map_err(|_| ChatError::RoundTimeout {
                    round,
                    secs: self.limits.round_timeout.as_secs(),
                })??;

            let (content, calls) = match completion {
                Completion::FinalAnswer(content) => {
                    info!(round, "Model returned final answer");
                    return Ok(ChatAnswer {
                        content,
                        rounds: round,
                        transcript: transcript.into_messages(),
                    });
                }
                Completion::ToolCalls { content, calls } => (content, calls),
            };

            info!(round, count = calls.len(), "Model requested tool calls");
            transcript.push(Message::assistant(content, calls.clone()));

            for call in &calls {
                info!(tool = call.name(), id = %call.id, "Dispatching tool call");
                let result = self.dispatcher.dispatch(call.name(), call.arguments()).await;
                transcript.push(Message::tool(call.id.clone(), result.to_content()));
            }
        }

        warn!(max_rounds = self.limits.max_rounds, "Round limit reached without final answer");
        Err(ChatError::RoundLimitExceeded {
            max_rounds: self.limits.max_rounds,
        })
    }
}
