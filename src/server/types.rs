// Request and response bodies for the HTTP API

use serde::{Deserialize, Serialize};

/// Request body for POST /chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Overrides the configured default model when non-empty
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub content: String,
}

/// Response body for POST /page_reader; exactly one of content/error is set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageReaderResponse {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response body for POST /run_command; exactly one of output/error is set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunCommandResponse {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
