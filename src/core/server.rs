//! MCP Server implementation and lifecycle management.
//!
//! The server wires the tool registry and dispatcher into rmcp's
//! `ServerHandler`. Unlike servers whose tools are code-generated routes,
//! the tool set here is data: definitions registered at startup and looked
//! up per call, so `list_tools` and `call_tool` are implemented directly
//! over the registry.

use std::sync::Arc;
use std::time::Duration;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ListToolsResult, PaginatedRequestParam,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use super::config::Config;
use super::error::Result;
use crate::domains::tools::{
    Dispatcher, InvocationRequest, ToolDefinition, ToolRegistry, build_registry,
};

/// The main MCP server handler.
///
/// Coordinates the read-only tool registry and the per-invocation
/// dispatcher; cloning shares both.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered tools, write-once at startup.
    registry: Arc<ToolRegistry>,

    /// Staged invocation pipeline.
    dispatcher: Arc<Dispatcher>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails if the built-in tool catalog cannot be registered; that error
    /// is fatal and aborts startup.
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);
        let registry = Arc::new(build_registry(&config)?);
        let dispatcher = Arc::new(Dispatcher::new(
            registry.clone(),
            Duration::from_secs(config.dispatch.execution_timeout_secs),
        ));

        info!("Registered {} tool(s)", registry.len());

        Ok(Self {
            config,
            registry,
            dispatcher,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Dispatch one invocation and package the outcome as a `CallToolResult`.
    ///
    /// Every failure becomes a structured error response tagged with the
    /// stage that produced it; no invocation is left unanswered and none
    /// can crash the process.
    pub async fn invoke(&self, name: &str, arguments: Value) -> CallToolResult {
        let request = InvocationRequest::new(name, arguments);
        match self.dispatcher.dispatch(request).await {
            Ok(result) => CallToolResult {
                content: vec![Content::text(result.text_content)],
                structured_content: Some(result.structured_content),
                is_error: Some(false),
                meta: None,
            },
            Err(e) => {
                warn!(stage = e.stage(), "Tool call failed: {}", e);
                CallToolResult::error(vec![Content::text(format!("[{}] {}", e.stage(), e))])
            }
        }
    }

    fn to_tool_model(definition: &ToolDefinition) -> Tool {
        Tool {
            name: definition.name().to_string().into(),
            description: Some(definition.description().to_string().into()),
            input_schema: Arc::new(definition.input_schema().to_schema_object()),
            output_schema: Some(Arc::new(definition.output_schema().to_schema_object())),
            annotations: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools as plain JSON (for HTTP transport).
    pub fn list_tools_json(&self) -> Vec<Value> {
        self.registry
            .definitions()
            .map(|d| {
                json!({
                    "name": d.name(),
                    "description": d.description(),
                    "inputSchema": d.input_schema().to_json_schema(),
                    "outputSchema": d.output_schema().to_json_schema(),
                })
            })
            .collect()
    }

    /// Call a tool and return a plain JSON envelope (for HTTP transport).
    ///
    /// Failures are reported inside the envelope as `{stage, message}` so
    /// the transport always answers with a well-formed response.
    pub async fn call_tool_json(&self, name: &str, arguments: Value) -> Value {
        let request = InvocationRequest::new(name, arguments);
        match self.dispatcher.dispatch(request).await {
            Ok(result) => json!({
                "content": [{ "type": "text", "text": result.text_content }],
                "structuredContent": result.structured_content,
                "isError": false,
            }),
            Err(e) => {
                warn!(stage = e.stage(), "Tool call failed: {}", e);
                json!({
                    "content": [{ "type": "text", "text": e.to_string() }],
                    "isError": true,
                    "error": { "stage": e.stage(), "message": e.to_string() },
                })
            }
        }
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "This is a demonstration MCP server. It exposes a greeting tool and an \
                 outbound API call tool."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        let tools = self
            .registry
            .definitions()
            .map(|d| Self::to_tool_model(d))
            .collect();
        Ok(ListToolsResult {
            tools,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        let arguments = request
            .arguments
            .map(Value::Object)
            .unwrap_or_else(|| json!({}));
        Ok(self.invoke(&request.name, arguments).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_server() -> McpServer {
        McpServer::new(Config::default()).unwrap()
    }

    #[test]
    fn test_server_exposes_catalog() {
        let server = test_server();
        let tools = server.list_tools_json();
        assert_eq!(tools.len(), 2);

        let names: Vec<_> = tools
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert!(names.contains(&"say_hello".to_string()));
        assert!(names.contains(&"make_api_call".to_string()));

        let hello = tools
            .iter()
            .find(|t| t["name"] == json!("say_hello"))
            .unwrap();
        assert_eq!(hello["inputSchema"]["required"], json!(["name"]));
        assert_eq!(
            hello["outputSchema"]["properties"]["result"]["type"],
            json!("string")
        );
    }

    #[tokio::test]
    async fn test_invoke_say_hello() {
        let server = test_server();
        let result = server
            .invoke("say_hello", json!({ "name": "World" }))
            .await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            result.structured_content,
            Some(json!({ "result": "Hello World!" }))
        );
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool_is_answered() {
        let server = test_server();
        let result = server.invoke("no_such_tool", json!({})).await;
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_call_tool_json_error_envelope() {
        let server = test_server();
        let envelope = server.call_tool_json("say_hello", json!({})).await;

        assert_eq!(envelope["isError"], json!(true));
        assert_eq!(envelope["error"]["stage"], json!("input_validation"));
        assert!(
            envelope["error"]["message"]
                .as_str()
                .unwrap()
                .contains("name")
        );
    }

    #[tokio::test]
    async fn test_call_tool_json_success_envelope() {
        let server = test_server();
        let envelope = server
            .call_tool_json("say_hello", json!({ "name": "World" }))
            .await;

        assert_eq!(envelope["isError"], json!(false));
        assert_eq!(
            envelope["structuredContent"],
            json!({ "result": "Hello World!" })
        );
        assert_eq!(
            envelope["content"][0]["text"],
            json!("Hello World!")
        );
    }
}
