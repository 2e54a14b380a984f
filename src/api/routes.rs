//! API Routes
//!
//! Configures the Axum router with all server endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{health_handler, mcp_handler, root_handler, stats_handler, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Server info
/// - `GET /health` - Health check endpoint
/// - `GET /stats` - Cache statistics
/// - `POST /mcp` - JSON-RPC endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/mcp", post(mcp_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
