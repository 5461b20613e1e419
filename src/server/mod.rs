// HTTP server
//
// One immutable state shared by every handler: the configuration, the
// orchestrator (present only when a credential is configured) and the
// tool executors behind the direct endpoints.

mod handlers;
pub mod types;

pub use handlers::create_router;

use anyhow::{Context, Result};
use axum::http::{header, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::orchestrator::{ChatLimits, Orchestrator};
use crate::providers::{CompletionProvider, OpenAIProvider};
use crate::tools::{StandardTools, ToolDispatcher};

pub struct ChatServer {
    config: Config,
    orchestrator: Option<Orchestrator>,
    tools: StandardTools,
}

impl ChatServer {
    /// Build the server from configuration
    ///
    /// Without an API key the server still starts; /chat then fails with
    /// a missing-credential error.
    pub fn new(config: Config) -> Result<Self> {
        let provider: Option<Arc<dyn CompletionProvider>> = match config.api_key.clone() {
            Some(api_key) => Some(Arc::new(
                OpenAIProvider::new(api_key, config.completion_url.clone())
                    .context("Failed to create completion client")?,
            )),
            None => None,
        };

        Self::build(config, provider)
    }

    /// Build the server around a given completion provider
    pub fn with_provider(config: Config, provider: Arc<dyn CompletionProvider>) -> Result<Self> {
        Self::build(config, Some(provider))
    }

    fn build(config: Config, provider: Option<Arc<dyn CompletionProvider>>) -> Result<Self> {
        let tools = StandardTools::from_config(&config).context("Failed to create tools")?;

        let orchestrator = provider.map(|provider| {
            let dispatcher = Arc::new(ToolDispatcher::new(tools.registry()));
            Orchestrator::new(provider, dispatcher, ChatLimits::from_config(&config))
        });

        Ok(Self {
            config,
            orchestrator,
            tools,
        })
    }

    /// Router with CORS and request tracing applied
    pub fn into_router(self) -> axum::Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

        create_router(Arc::new(self))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Start the HTTP server
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.config.bind_address))?;

        let app = self.into_router();

        tracing::info!("Starting chat server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn orchestrator(&self) -> Option<&Orchestrator> {
        self.orchestrator.as_ref()
    }

    pub fn tools(&self) -> &StandardTools {
        &self.tools
    }
}
