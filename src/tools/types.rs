// Core types for tool execution
//
// Schemas follow the JSON Schema subset the OpenAI function-calling API
// accepts; results are always rendered to text before entering the transcript.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Tool definition presented to the model on every round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
}

/// JSON Schema for tool input parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub schema_type: String, // Always "object"
    pub properties: Value,
    pub required: Vec<String>,
}

impl ToolInputSchema {
    /// Object schema with explicit property declarations
    pub fn object(properties: Value, required: Vec<&str>) -> Self {
        Self {
            schema_type: "object".to_string(),
            properties,
            required: required.into_iter().map(str::to_string).collect(),
        }
    }

    /// Create a simple schema with required string parameters
    pub fn simple(params: Vec<(&str, &str)>) -> Self {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for (param_name, param_desc) in params {
            properties.insert(
                param_name.to_string(),
                json!({
                    "type": "string",
                    "description": param_desc
                }),
            );
            required.push(param_name.to_string());
        }

        Self {
            schema_type: "object".to_string(),
            properties: Value::Object(properties),
            required,
        }
    }
}

/// Outcome of one dispatched tool call
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    Success(Value),
    Error { reason: String },
}

impl ToolResult {
    pub fn error(reason: impl Into<String>) -> Self {
        Self::Error {
            reason: reason.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Text placed in the `tool` message content
    pub fn to_content(&self) -> String {
        match self {
            Self::Success(value) => value.to_string(),
            Self::Error { reason } => json!({ "error": reason }).to_string(),
        }
    }
}

impl From<ToolError> for ToolResult {
    fn from(err: ToolError) -> Self {
        Self::error(err.to_string())
    }
}

/// Why a tool call could not produce a success payload
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Rejected(String),

    #[error("API_KEY not configured")]
    MissingCredential,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("{service} API error (status {status}): {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to parse {service} response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("command failed: {0}")]
    Process(String),

    #[error("{tool} timed out after {secs}s")]
    Timeout { tool: String, secs: u64 },
}

/// Parse raw JSON arguments into a tool's typed argument struct
pub fn parse_arguments<T: serde::de::DeserializeOwned>(tool: &str, raw: &str) -> Result<T, ToolError> {
    serde_json::from_str(raw).map_err(|source| ToolError::InvalidArguments {
        tool: tool.to_string(),
        source,
    })
}
