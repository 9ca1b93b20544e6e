//! MCP Demonstration Server Library
//!
//! This crate provides a minimal Model Context Protocol (MCP) server built
//! around a schema-validated tool dispatch pipeline.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling,
//!   the main server handler, and the transport layer
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: the tool registry, the structural schema validator, the
//!     staged invocation dispatcher, and the built-in tool definitions
//!
//! Every invocation moves through the same pipeline: look up the tool,
//! validate arguments against its input schema, execute the handler (the
//! only stage that may perform I/O, bounded by a per-invocation timeout),
//! validate the result against its output schema, and package the response.
//! Each stage failure is reported with its own stage tag, so caller errors,
//! handler/schema contract bugs, and external dependency failures stay
//! independently diagnosable.
//!
//! # Example
//!
//! ```rust,no_run
//! use demo_mcp_server::{core::Config, core::McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
