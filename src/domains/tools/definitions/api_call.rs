//! Outbound API call tool definition.
//!
//! Performs one HTTP GET against the configured endpoint and reports the
//! response status code. The endpoint itself is an opaque dependency: any
//! response, success or error status, is a tool result, while transport
//! failures (DNS, connect, TLS) surface as execution errors.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::info;

use crate::core::config::OutboundConfig;
use crate::domains::tools::error::ExecutionError;
use crate::domains::tools::registry::{ToolDefinition, ToolHandler};
use crate::domains::tools::schema::{ObjectSchema, Schema};

/// API call tool - issues a GET to the configured endpoint.
pub struct ApiCallTool {
    client: reqwest::Client,
    endpoint: String,
}

impl ApiCallTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "make_api_call";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Make an API call";

    pub fn new(outbound: &OutboundConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: outbound.api_url.clone(),
        }
    }

    /// Build the registrable definition for this tool.
    pub fn definition(outbound: &OutboundConfig) -> ToolDefinition {
        ToolDefinition::new(
            Self::NAME,
            Self::DESCRIPTION,
            // Takes no arguments; anything supplied is rejected.
            Schema::object(ObjectSchema::new()),
            Schema::object(ObjectSchema::new().field("status", Schema::Integer)),
            Arc::new(Self::new(outbound)),
        )
    }
}

#[async_trait::async_trait]
impl ToolHandler for ApiCallTool {
    async fn call(&self, _input: Value) -> Result<Value, ExecutionError> {
        info!("GET {}", self.endpoint);

        // A non-2xx status is still a valid answer; only failing to get a
        // response at all is an execution error.
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status().as_u16();

        info!("{} responded with {}", self.endpoint, status);
        Ok(json!({ "status": status }))
    }

    fn render(&self, output: &Value) -> String {
        match output.get("status").and_then(Value::as_u64) {
            Some(status) => format!("GET {} -> {}", self.endpoint, status),
            None => output.to_string(),
        }
    }
}
