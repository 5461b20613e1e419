// ReadPage tool - fetches a web page and extracts its visible text

use crate::tools::registry::Tool;
use crate::tools::types::{parse_arguments, ToolError, ToolInputSchema};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; PageReader/1.0)";

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid script regex"));
static STYLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid style regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// `&amp;` goes last so "&amp;lt;" decodes to "&lt;", not "<"
const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&amp;", "&"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct ReadPageArgs {
    pub url: String,
}

pub struct ReadPageTool {
    client: Client,
}

impl ReadPageTool {
    pub fn new(timeout: Duration) -> Result<Self, ToolError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch `url` and return its text content
    pub async fn read_page(&self, url: &str) -> Result<String, ToolError> {
        tracing::info!(url, "Fetching page");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ToolError::Status(status.as_u16()));
        }

        let html = response.text().await?;
        Ok(extract_text(&html))
    }
}

/// Strip script/style blocks and markup, decode common entities, collapse whitespace
pub fn extract_text(html: &str) -> String {
    let html = SCRIPT_RE.replace_all(html, "");
    let html = STYLE_RE.replace_all(&html, "");
    let text = TAG_RE.replace_all(&html, "");

    let mut text = text.into_owned();
    for &(entity, replacement) in ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, replacement);
        }
    }

    SPACE_RE.replace_all(&text, " ").trim().to_string()
}

#[async_trait]
impl Tool for ReadPageTool {
    fn name(&self) -> &str {
        "read_page"
    }

    fn description(&self) -> String {
        "Fetch a webpage URL and extract the main text content. Use this when you need to read the content of a specific webpage.".to_string()
    }

    fn input_schema(&self) -> ToolInputSchema {
        ToolInputSchema::simple(vec![("url", "The URL of the webpage to read")])
    }

    async fn execute(&self, arguments: &str) -> Result<Value, ToolError> {
        let args: ReadPageArgs = parse_arguments(self.name(), arguments)?;
        let content = self.read_page(&args.url).await?;
        Ok(json!({ "url": args.url, "content": content }))
    }
}
