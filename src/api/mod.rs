//! API Module
//!
//! HTTP handlers and routing for the server.
//!
//! # Endpoints
//! - `GET /` - Server info and catalogs
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache statistics
//! - `POST /mcp` - JSON-RPC endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
