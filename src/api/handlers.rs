//! API Handlers
//!
//! HTTP request handlers for the server's endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::config::{SERVER_DESCRIPTION, SERVER_NAME, SERVER_VERSION};
use crate::handlers::TextTvService;
use crate::mcp::{prompts, resources, tools, McpServer};
use crate::models::{HealthResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub server: McpServer,
}

impl AppState {
    pub fn new(service: TextTvService) -> Self {
        Self {
            server: McpServer::new(service),
        }
    }
}

/// Handler for GET /
///
/// Server identity plus the tool, resource and prompt catalogs.
pub async fn root_handler() -> Json<Value> {
    let tool_names: Vec<&str> = tools::definitions().iter().map(|t| t.name).collect();
    let resource_uris: Vec<&str> = resources::definitions().iter().map(|r| r.uri).collect();
    let prompt_names: Vec<&str> = prompts::definitions().iter().map(|p| p.name).collect();

    Json(json!({
        "name": SERVER_NAME,
        "version": SERVER_VERSION,
        "description": SERVER_DESCRIPTION,
        "endpoints": {
            "GET /": "Server info",
            "GET /health": "Health check",
            "GET /stats": "Cache statistics",
            "POST /mcp": "MCP endpoint (JSON-RPC 2.0)"
        },
        "tools": tool_names,
        "resources": resource_uris,
        "prompts": prompt_names
    }))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.server.service().cache().stats();
    Json(StatsResponse::from(stats))
}

/// Handler for POST /mcp
///
/// Takes the raw body so malformed JSON still gets a JSON-RPC parse error.
/// Notifications are acknowledged with 202 and no body.
pub async fn mcp_handler(State(state): State<AppState>, body: String) -> Response {
    match state.server.handle_message(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::handlers::test_support::{record, service, StubProvider};
    use crate::models::GetPageInput;

    fn state() -> AppState {
        AppState::new(service(Arc::new(StubProvider::with_pages(vec![record(100, "a")]))))
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.server, SERVER_NAME);
    }

    #[tokio::test]
    async fn test_stats_handler_tracks_cache() {
        let state = state();
        let input = GetPageInput {
            page: 100,
            include_plain_text: false,
        };
        state.server.service().get_page(&input).await.unwrap();
        state.server.service().get_page(&input).await.unwrap();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 1);
        assert_eq!(response.misses, 1);
        assert_eq!(response.total_entries, 1);
    }

    #[tokio::test]
    async fn test_root_lists_catalogs() {
        let response = root_handler().await;
        assert_eq!(response["name"], SERVER_NAME);
        assert_eq!(response["tools"].as_array().unwrap().len(), 8);
        assert_eq!(response["resources"][0], "texttv://categories");
    }

    #[tokio::test]
    async fn test_mcp_notification_accepted() {
        let body = json!({"jsonrpc": "2.0", "method": "notifications/initialized"}).to_string();
        let response = mcp_handler(State(state()), body).await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }
}
