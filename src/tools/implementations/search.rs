// Search tool - queries the web search API

use crate::tools::registry::Tool;
use crate::tools::types::{parse_arguments, ToolError, ToolInputSchema};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

/// Result count used when the caller gives none (or a non-positive one)
pub const DEFAULT_MAX_RESULTS: i64 = 6;

/// Arguments accepted by the search tool and the /search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SearchArgs {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub max_results: Option<i64>,
}

#[derive(Debug, Serialize)]
struct SearchApiRequest<'a> {
    keywords: &'a [String],
    max_results: i64,
}

pub struct SearchTool {
    client: Client,
    api_key: Option<String>,
    search_url: String,
}

impl SearchTool {
    pub fn new(api_key: Option<String>, search_url: String, timeout: Duration) -> Result<Self, ToolError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            search_url,
        })
    }

    /// Run a search and return the API's result object unchanged
    pub async fn search(&self, keywords: &[String], max_results: Option<i64>) -> Result<Value, ToolError> {
        let api_key = self.api_key.as_deref().ok_or(ToolError::MissingCredential)?;
        let max_results = effective_max_results(max_results);

        tracing::info!(?keywords, max_results, "Calling search API");

        let response = self
            .client
            .post(&self.search_url)
            .bearer_auth(api_key)
            .json(&SearchApiRequest {
                keywords,
                max_results,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ToolError::Api {
                service: "search",
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| ToolError::Decode {
            service: "search",
            source,
        })
    }
}

fn effective_max_results(requested: Option<i64>) -> i64 {
    match requested {
        Some(n) if n > 0 => n,
        _ => DEFAULT_MAX_RESULTS,
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "search"
    }

    fn description(&self) -> String {
        "Search the web for real-time information like weather, news, current events".to_string()
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::object(
            json!({
                "keywords": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Search keywords"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of results (default 6)"
                }
            }),
            vec!["keywords"],
        )
    }

    async fn execute(&self, arguments: &str) -> Result<Value, ToolError> {
        let args: SearchArgs = parse_arguments(self.name(), arguments)?;
        self.search(&args.keywords, args.max_results).await
    }
}
