// HTTP request handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::Value;
use std::sync::Arc;

use super::types::{ChatRequest, ChatResponse, HealthStatus, PageReaderResponse, RunCommandResponse};
use super::ChatServer;
use crate::errors::{ChatError, ErrorBody};
use crate::tools::implementations::{ReadPageArgs, RunCommandArgs, SearchArgs};
use crate::tools::ToolError;

/// Create the application router
pub fn create_router(server: Arc<ChatServer>) -> Router {
    Router::new()
        .route("/chat", post(handle_chat))
        .route("/search", post(handle_search))
        .route("/page_reader", post(handle_page_reader))
        .route("/run_command", post(handle_run_command))
        .route("/health", get(health_check))
        .with_state(server)
}

/// Handle POST /chat
async fn handle_chat(
    State(server): State<Arc<ChatServer>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ChatError> {
    let orchestrator = server.orchestrator().ok_or(ChatError::MissingCredential)?;
    let model = server.config().resolve_model(request.model.as_deref());

    let answer = orchestrator.chat(&request.message, &model).await?;

    tracing::info!(rounds = answer.rounds, "Chat request completed");
    Ok(Json(ChatResponse {
        content: answer.content,
    }))
}

/// Handle POST /search
async fn handle_search(
    State(server): State<Arc<ChatServer>>,
    Json(request): Json<SearchArgs>,
) -> Result<Json<Value>, EndpointError> {
    let result = server
        .tools()
        .search
        .search(&request.keywords, request.max_results)
        .await?;

    Ok(Json(result))
}

/// Handle POST /page_reader
///
/// Always 200; failures are reported in the `error` field.
async fn handle_page_reader(
    State(server): State<Arc<ChatServer>>,
    Json(request): Json<ReadPageArgs>,
) -> Json<PageReaderResponse> {
    let (content, error) = match server.tools().read_page.read_page(&request.url).await {
        Ok(content) => (Some(content), None),
        Err(e) => {
            tracing::warn!(url = %request.url, error = %e, "Page read failed");
            (None, Some(e.to_string()))
        }
    };

    Json(PageReaderResponse {
        url: request.url,
        content,
        error,
    })
}

/// Handle POST /run_command
///
/// Always 200; rejections and failures are reported in the `error` field.
async fn handle_run_command(
    State(server): State<Arc<ChatServer>>,
    Json(request): Json<RunCommandArgs>,
) -> Json<RunCommandResponse> {
    let (output, error) = match server.tools().run_command.run(&request.command).await {
        Ok(output) => (Some(output), None),
        Err(e) => {
            tracing::warn!(command = %request.command, error = %e, "Command failed");
            (None, Some(e.to_string()))
        }
    };

    Json(RunCommandResponse {
        command: request.command,
        output,
        error,
    })
}

/// Handle GET /health
async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}

/// Tool failure surfaced directly by an endpoint
struct EndpointError(ToolError);

impl From<ToolError> for EndpointError {
    fn from(err: ToolError) -> Self {
        Self(err)
    }
}

impl IntoResponse for EndpointError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new(self.0.to_string())),
        )
            .into_response()
    }
}
