//! Configuration Module
//!
//! Handles loading server configuration from environment variables, plus the
//! fixed server identity and cache TTL policy.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::DEFAULT_SWEEP_INTERVAL_SECS;

/// Server name reported to protocol clients
pub const SERVER_NAME: &str = "svt-texttv-mcp";
/// Server version reported to protocol clients
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SERVER_DESCRIPTION: &str =
    "MCP server for SVT Text-TV - Swedish teletext news, sports, weather, and TV schedules";

/// Per-operation cache lifetimes, approximating how often the source refreshes.
pub mod ttl {
    use std::time::Duration;

    /// Single page and subpages, also news and sports sections
    pub const PAGE: Duration = Duration::from_secs(15);
    pub const SEARCH: Duration = Duration::from_secs(30);
    pub const CATEGORY: Duration = Duration::from_secs(30);
    pub const WEATHER: Duration = Duration::from_secs(60);
    pub const TV_SCHEDULE: Duration = Duration::from_secs(300);
}

/// Front-end the binary serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Http,
    Stdio,
}

impl FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Transport::Http),
            "stdio" => Ok(Transport::Stdio),
            other => Err(format!("unknown transport: {}", other)),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP bind address
    pub host: String,
    /// HTTP server port
    pub port: u16,
    pub transport: Transport,
    /// Background cache sweep interval in seconds
    pub sweep_interval: u64,
    /// App identifier sent to texttv.nu
    pub app_id: String,
    pub upstream_base_url: String,
    /// Upstream request timeout in seconds
    pub upstream_timeout: u64,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST` - Bind address (default: 0.0.0.0)
    /// - `PORT` - HTTP server port (default: 10000)
    /// - `TRANSPORT` - `http` or `stdio` (default: http)
    /// - `CACHE_SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `TEXTTV_APP_ID` - App id for the upstream API (default: svt-texttv-mcp)
    /// - `TEXTTV_BASE_URL` - Upstream API root (default: https://api.texttv.nu/api)
    /// - `UPSTREAM_TIMEOUT` - Upstream timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env_or("HOST", defaults.host),
            port: env_or("PORT", defaults.port),
            transport: env_or("TRANSPORT", defaults.transport),
            sweep_interval: env_or("CACHE_SWEEP_INTERVAL", defaults.sweep_interval),
            app_id: env_or("TEXTTV_APP_ID", defaults.app_id),
            upstream_base_url: env_or("TEXTTV_BASE_URL", defaults.upstream_base_url),
            upstream_timeout: env_or("UPSTREAM_TIMEOUT", defaults.upstream_timeout),
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval.max(1))
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 10000,
            transport: Transport::Http,
            sweep_interval: DEFAULT_SWEEP_INTERVAL_SECS,
            app_id: SERVER_NAME.to_string(),
            upstream_base_url: "https://api.texttv.nu/api".to_string(),
            upstream_timeout: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 10000);
        assert_eq!(config.transport, Transport::Http);
        assert_eq!(config.sweep_interval, 60);
        assert_eq!(config.app_id, "svt-texttv-mcp");
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("PORT");
        env::remove_var("TRANSPORT");
        env::remove_var("CACHE_SWEEP_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.port, 10000);
        assert_eq!(config.transport, Transport::Http);
        assert_eq!(config.sweep_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_transport_parse() {
        assert_eq!("stdio".parse::<Transport>(), Ok(Transport::Stdio));
        assert_eq!(" HTTP ".parse::<Transport>(), Ok(Transport::Http));
        assert!("sse".parse::<Transport>().is_err());
    }

    #[test]
    fn test_ttl_policy() {
        assert_eq!(ttl::PAGE, Duration::from_secs(15));
        assert_eq!(ttl::SEARCH, Duration::from_secs(30));
        assert_eq!(ttl::CATEGORY, Duration::from_secs(30));
        assert_eq!(ttl::WEATHER, Duration::from_secs(60));
        assert_eq!(ttl::TV_SCHEDULE, Duration::from_secs(300));
    }
}
