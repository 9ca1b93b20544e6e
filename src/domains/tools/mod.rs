//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to
//! perform specific actions or computations.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `schema.rs` - Structural schema descriptors and validation
//! - `registry.rs` - Tool registry: name -> (schemas, handler)
//! - `dispatcher.rs` - The staged invocation pipeline
//! - `catalog.rs` - Assembles the registry at startup
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Implement `ToolHandler` and a `definition()` constructor
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `catalog.rs` via `build_registry`
//!
//! The server picks up the registry dynamically; nothing else changes.

pub mod catalog;
pub mod definitions;
mod dispatcher;
mod error;
mod registry;
pub mod schema;

pub use catalog::build_registry;
pub use dispatcher::{Dispatcher, InvocationRequest, InvocationResult};
pub use error::{DispatchError, ExecutionError, RegistryError};
pub use registry::{ToolDefinition, ToolHandler, ToolRegistry};
pub use schema::{ObjectSchema, Schema, ValidationError};
