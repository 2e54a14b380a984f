//! SVT Text-TV MCP server
//!
//! Exposes Swedish teletext pages as MCP tools, resources and prompts, with a
//! short-TTL in-memory cache in front of the texttv.nu API.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod mcp;
pub mod models;
pub mod tasks;
pub mod texttv;

pub use api::{create_router, AppState};
pub use cache::TtlCache;
pub use config::{Config, Transport};
pub use error::{Result, TextTvError};
pub use handlers::{CachedResult, TextTvService};
pub use mcp::McpServer;
pub use tasks::spawn_sweep_task;
pub use texttv::{HttpTextTvClient, TextTvClientConfig, TextTvProvider};
