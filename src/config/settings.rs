// Configuration structs

use serde::Deserialize;
use std::time::Duration;

use crate::tools::guard::DEFAULT_ALLOWED_COMMANDS;

pub const DEFAULT_COMPLETION_URL: &str = "https://space.ai-builders.com/backend/v1/chat/completions";
pub const DEFAULT_SEARCH_URL: &str = "https://space.ai-builders.com/backend/v1/search/";
pub const DEFAULT_MODEL: &str = "gpt-5";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Process-wide configuration, read-only after startup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Credential for the completion and search APIs
    pub api_key: Option<String>,

    /// Chat completions endpoint
    pub completion_url: String,

    /// Web search endpoint
    pub search_url: String,

    /// Model used when a chat request does not name one
    pub default_model: String,

    /// HTTP bind address (e.g., "0.0.0.0:8080")
    pub bind_address: String,

    /// Base commands run_command may execute
    pub allowed_commands: Vec<String>,

    /// Completion rounds allowed per chat request
    pub max_rounds: usize,

    /// Deadline for a single completion call
    pub round_timeout_secs: u64,

    /// Deadline for a whole chat request
    pub request_timeout_secs: u64,

    /// Deadline for a single tool execution
    pub tool_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            completion_url: DEFAULT_COMPLETION_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            allowed_commands: DEFAULT_ALLOWED_COMMANDS.iter().map(|c| c.to_string()).collect(),
            max_rounds: 10,
            round_timeout_secs: 120,
            request_timeout_secs: 300,
            tool_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Model for a request: the override if non-empty, else the default
    pub fn resolve_model(&self, requested: Option<&str>) -> String {
        match requested {
            Some(model) if !model.trim().is_empty() => model.to_string(),
            _ => self.default_model.clone(),
        }
    }

    pub fn round_timeout(&self) -> Duration {
        Duration::from_secs(self.round_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.default_model, "gpt-5");
        assert_eq!(config.allowed_commands, vec!["ls", "cd"]);
        assert_eq!(config.max_rounds, 10);
    }

    #[test]
    fn test_resolve_model() {
        let config = Config::default();
        assert_eq!(config.resolve_model(None), "gpt-5");
        assert_eq!(config.resolve_model(Some("")), "gpt-5");
        assert_eq!(config.resolve_model(Some("gpt-4o")), "gpt-4o");
    }
}
