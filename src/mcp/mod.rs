//! MCP Protocol Module
//!
//! Tools, resources and prompts over JSON-RPC 2.0. The dispatcher is
//! transport-agnostic; `stdio` and the HTTP API are alternate front-ends over
//! the same handler set.

pub mod jsonrpc;
pub mod prompts;
pub mod resources;
mod server;
mod stdio;
pub mod tools;

pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use server::{McpServer, PROTOCOL_VERSION};
pub use stdio::{serve_lines, serve_stdio};
