//! JSON-RPC dispatcher shared by the HTTP and stdio front-ends.

use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::config::{SERVER_DESCRIPTION, SERVER_NAME, SERVER_VERSION};
use crate::error::TextTvError;
use crate::handlers::TextTvService;

use super::jsonrpc::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, INVALID_REQUEST, JSONRPC_VERSION,
    METHOD_NOT_FOUND, PARSE_ERROR,
};
use super::{prompts, resources, tools};

/// Protocol revision answered when the client does not ask for one
pub const PROTOCOL_VERSION: &str = "2024-11-05";

#[derive(Debug, Deserialize)]
struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    protocol_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Deserialize)]
struct ReadParams {
    uri: String,
}

fn params<T: for<'de> Deserialize<'de>>(params: Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::from(TextTvError::Validation(e.to_string())))
}

/// Routes protocol methods onto the tool, resource and prompt tables.
#[derive(Clone)]
pub struct McpServer {
    service: TextTvService,
}

impl McpServer {
    pub fn new(service: TextTvService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &TextTvService {
        &self.service
    }

    /// Handles one raw message. Returns `None` for notifications.
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(raw) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                warn!("Unparseable message: {}", e);
                Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                ))
            }
        }
    }

    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            debug!("Notification: {}", request.method);
            return None;
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::new(INVALID_REQUEST, "jsonrpc must be \"2.0\""),
            ));
        }

        debug!("Request {}: {}", id, request.method);
        let response = match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        };
        Some(response)
    }

    async fn dispatch(&self, method: &str, raw_params: Value) -> Result<Value, JsonRpcError> {
        match method {
            "initialize" => {
                let requested = if raw_params.is_null() {
                    None
                } else {
                    params::<InitializeParams>(raw_params)?.protocol_version
                };
                Ok(initialize_result(requested))
            }
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tools::definitions() })),
            "tools/call" => {
                let call: CallParams = params(raw_params)?;
                Ok(tools::call_result(&self.service, &call.name, call.arguments).await)
            }
            "resources/list" => Ok(json!({ "resources": resources::definitions() })),
            "resources/read" => {
                let read: ReadParams = params(raw_params)?;
                resources::read_result(&self.service, &read.uri)
                    .await
                    .map_err(JsonRpcError::from)
            }
            "prompts/list" => Ok(json!({ "prompts": prompts::definitions() })),
            "prompts/get" => {
                let call: CallParams = params(raw_params)?;
                let args = match call.arguments {
                    Value::Object(map) => map,
                    _ => Map::new(),
                };
                prompts::get(&self.service, &call.name, &args)
                    .await
                    .map_err(JsonRpcError::from)
            }
            other => Err(JsonRpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        }
    }
}

fn initialize_result(requested: Option<String>) -> Value {
    json!({
        "protocolVersion": requested.unwrap_or_else(|| PROTOCOL_VERSION.to_string()),
        "capabilities": {
            "tools": {},
            "resources": {},
            "prompts": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION
        },
        "instructions": SERVER_DESCRIPTION
    })
}
