//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::transport::TransportConfig;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Outbound API call configuration.
    pub outbound: OutboundConfig,

    /// Dispatch pipeline configuration.
    pub dispatch: DispatchConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for the outbound API call tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundConfig {
    /// Endpoint the `make_api_call` tool issues its GET against.
    pub api_url: String,
}

/// Configuration for the dispatch pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Per-invocation cap on handler execution time, in seconds.
    /// Execution is the only dispatch stage with unbounded latency.
    pub execution_timeout_secs: u64,
}

impl Default for OutboundConfig {
    fn default() -> Self {
        Self {
            // Harmless reserved-domain default for demos and tests.
            api_url: "https://example.com/".to_string(),
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            execution_timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "demo-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            outbound: OutboundConfig::default(),
            dispatch: DispatchConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_API_URL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(url) = std::env::var("MCP_API_URL") {
            config.outbound.api_url = url;
            info!("Outbound API endpoint loaded from environment");
        } else {
            warn!(
                "MCP_API_URL not set - make_api_call will target the default \
                 endpoint {}",
                config.outbound.api_url
            );
        }

        if let Ok(secs) = std::env::var("MCP_TOOL_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(parsed) => config.dispatch.execution_timeout_secs = parsed,
                Err(_) => warn!(
                    "Ignoring invalid MCP_TOOL_TIMEOUT_SECS value: {:?}",
                    secs
                ),
            }
        }

        config
    }
}
