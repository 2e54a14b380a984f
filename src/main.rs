//! SVT Text-TV MCP server binary
//!
//! Serves the MCP surface over HTTP or stdio, depending on `TRANSPORT`.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use texttv_mcp::{
    create_router, mcp, spawn_sweep_task, AppState, Config, HttpTextTvClient, McpServer,
    TextTvClientConfig, TextTvService, Transport, TtlCache,
};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber (stderr, so stdio stays clean)
/// 2. Load configuration from environment variables
/// 3. Create the cache, the upstream client and the handler set
/// 4. Start background sweep task
/// 5. Serve the configured transport until shutdown
/// 6. Destroy the cache
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "texttv_mcp=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting SVT Text-TV MCP server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: transport={:?}, host={}, port={}, sweep_interval={}s, upstream={}",
        config.transport, config.host, config.port, config.sweep_interval, config.upstream_base_url
    );

    let cache = Arc::new(TtlCache::new());
    let client = HttpTextTvClient::new(
        TextTvClientConfig::new(&config.upstream_base_url, &config.app_id)
            .with_timeout(config.upstream_timeout()),
    )
    .context("failed to build upstream client")?;
    let service = TextTvService::new(Arc::clone(&cache), Arc::new(client));

    spawn_sweep_task(Arc::clone(&cache), config.sweep_interval());
    info!("Background sweep task started");

    let served = match config.transport {
        Transport::Http => serve_http(&config, service).await,
        Transport::Stdio => tokio::select! {
            result = mcp::serve_stdio(McpServer::new(service)) => {
                result.context("stdio transport failed")
            }
            _ = shutdown_signal() => Ok(()),
        },
    };

    cache.destroy();
    warn!("Cache destroyed, sweep task stopped");
    info!("Server shutdown complete");
    served
}

async fn serve_http(config: &Config, service: TextTvService) -> anyhow::Result<()> {
    let app = create_router(AppState::new(service));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid bind address {}:{}", config.host, config.port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
