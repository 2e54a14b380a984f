//! Error types for the Text-TV server
//!
//! Provides unified error handling using thiserror. The cache has no error
//! path; these errors come from input validation, the upstream, and dispatch.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Text-TV Error Enum ==
/// Unified error type for handlers and front-ends.
#[derive(Error, Debug)]
pub enum TextTvError {
    /// Input outside its documented domain; raised before any cache lookup
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Upstream call failed or returned malformed data; never cached
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Unknown prompt: {0}")]
    UnknownPrompt(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TextTvError {
    /// JSON-RPC error code for this error.
    pub fn rpc_code(&self) -> i64 {
        match self {
            TextTvError::Validation(_)
            | TextTvError::UnknownTool(_)
            | TextTvError::UnknownPrompt(_) => -32602,
            TextTvError::UnknownResource(_) => -32002,
            TextTvError::Upstream(_) | TextTvError::Internal(_) => -32603,
        }
    }
}

impl From<reqwest::Error> for TextTvError {
    fn from(err: reqwest::Error) -> Self {
        TextTvError::Upstream(err.to_string())
    }
}

impl From<serde_json::Error> for TextTvError {
    fn from(err: serde_json::Error) -> Self {
        TextTvError::Validation(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for TextTvError {
    fn into_response(self) -> Response {
        let status = match &self {
            TextTvError::Validation(_) => StatusCode::BAD_REQUEST,
            TextTvError::UnknownTool(_)
            | TextTvError::UnknownResource(_)
            | TextTvError::UnknownPrompt(_) => StatusCode::NOT_FOUND,
            TextTvError::Upstream(_) => StatusCode::BAD_GATEWAY,
            TextTvError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the Text-TV server.
pub type Result<T> = std::result::Result<T, TextTvError>;
