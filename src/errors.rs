// Chat request errors
//
// Failures that end a chat request. Tool failures never show up here: the
// dispatcher turns them into tool messages and the conversation continues.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;

use crate::providers::UpstreamError;

#[derive(Debug, Error)]
pub enum ChatError {
    /// No credential configured; raised before any upstream call
    #[error("API_KEY not configured")]
    MissingCredential,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("no final answer after {max_rounds} rounds")]
    RoundLimitExceeded { max_rounds: usize },

    #[error("completion round {round} timed out after {secs}s")]
    RoundTimeout { round: usize, secs: u64 },

    #[error("chat request timed out after {secs}s")]
    RequestTimeout { secs: u64 },
}

impl ChatError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChatError::MissingCredential => StatusCode::INTERNAL_SERVER_ERROR,
            ChatError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ChatError::RoundLimitExceeded { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ChatError::RoundTimeout { .. } | ChatError::RequestTimeout { .. } => {
                StatusCode::GATEWAY_TIMEOUT
            }
        }
    }
}

/// JSON error body returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(%status, error = %self, "Chat request failed");
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ChatError::MissingCredential.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ChatError::Upstream(UpstreamError::Malformed("x".to_string())).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ChatError::RequestTimeout { secs: 1 }.status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_upstream_message_is_transparent() {
        let err = ChatError::from(UpstreamError::Status {
            status: 401,
            body: "bad key".to_string(),
        });
        assert_eq!(err.to_string(), "completion API error (status 401): bad key");
    }

    #[test]
    fn test_round_limit_message() {
        let err = ChatError::RoundLimitExceeded { max_rounds: 3 };
        assert_eq!(err.to_string(), "no final answer after 3 rounds");
    }
}
