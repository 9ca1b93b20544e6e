//! Say hello tool definition.
//!
//! Greets the caller by name. The smallest possible tool, useful as a smoke
//! test for the whole dispatch pipeline.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::debug;

use crate::domains::tools::error::ExecutionError;
use crate::domains::tools::registry::{ToolDefinition, ToolHandler};
use crate::domains::tools::schema::{ObjectSchema, Schema};

/// Say hello tool - returns a greeting for the given name.
pub struct SayHelloTool;

impl SayHelloTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "say_hello";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Says hello";

    /// Build the registrable definition for this tool.
    pub fn definition() -> ToolDefinition {
        ToolDefinition::new(
            Self::NAME,
            Self::DESCRIPTION,
            Schema::object(ObjectSchema::new().field("name", Schema::String)),
            Schema::object(ObjectSchema::new().field("result", Schema::String)),
            Arc::new(Self),
        )
    }
}

#[async_trait::async_trait]
impl ToolHandler for SayHelloTool {
    async fn call(&self, input: Value) -> Result<Value, ExecutionError> {
        // Input already passed schema validation; a miss here means the
        // definition's schema and this handler disagree.
        let name = input
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| ExecutionError::failed("missing `name` argument"))?;

        debug!("greeting {}", name);
        Ok(json!({ "result": format!("Hello {name}!") }))
    }

    fn render(&self, output: &Value) -> String {
        output
            .get("result")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| output.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_greets_by_name() {
        let output = SayHelloTool
            .call(json!({ "name": "World" }))
            .await
            .unwrap();
        assert_eq!(output, json!({ "result": "Hello World!" }));
    }

    #[tokio::test]
    async fn test_output_matches_declared_schema() {
        let definition = SayHelloTool::definition();
        let output = SayHelloTool
            .call(json!({ "name": "World" }))
            .await
            .unwrap();
        assert!(definition.output_schema().validate(&output).is_ok());
    }

    #[test]
    fn test_input_schema_requires_name() {
        let definition = SayHelloTool::definition();
        assert!(definition.input_schema().validate(&json!({})).is_err());
        assert!(
            definition
                .input_schema()
                .validate(&json!({ "name": "World" }))
                .is_ok()
        );
    }

    #[test]
    fn test_render_extracts_greeting() {
        let rendered = SayHelloTool.render(&json!({ "result": "Hello World!" }));
        assert_eq!(rendered, "Hello World!");
    }
}
