//! Newline-delimited JSON-RPC over stdin/stdout.

use serde_json::Value;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

use super::jsonrpc::{JsonRpcError, JsonRpcResponse, PARSE_ERROR};
use super::McpServer;

/// Serves the process's stdin/stdout until stdin closes.
pub async fn serve_stdio(server: McpServer) -> io::Result<()> {
    info!("Serving MCP over stdio");
    serve_lines(&server, BufReader::new(io::stdin()), io::stdout()).await
}

/// Reads one message per line and writes one response per answered request.
///
/// A line that is not UTF-8 is answered with a parse error and skipped.
pub async fn serve_lines<R, W>(server: &McpServer, mut reader: R, mut writer: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match server.handle_message(line).await {
                    Some(response) => response,
                    None => continue,
                }
            }
            Err(e) => {
                warn!("Dropping non UTF-8 line: {}", e);
                JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(PARSE_ERROR, "Parse error: invalid UTF-8"),
                )
            }
        };

        match serde_json::to_string(&response) {
            Ok(mut out) => {
                out.push('\n');
                writer.write_all(out.as_bytes()).await?;
                writer.flush().await?;
            }
            Err(e) => error!("Failed to encode response: {}", e),
        }
    }

    info!("stdin closed, stopping stdio transport");
    Ok(())
}
