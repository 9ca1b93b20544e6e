//! Tool Registry - central registration and lookup for all tools.
//!
//! A tool is a named, schema-described callable operation. Each definition
//! pairs an input schema, an output schema, and a handler; the registry maps
//! names to definitions. Registration happens once at startup, before any
//! dispatch, after which the registry is shared read-only - lookups need no
//! locking.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::error::{DispatchError, ExecutionError, RegistryError};
use super::schema::Schema;

/// Trait implemented by every tool's behavior.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with schema-validated input.
    async fn call(&self, input: Value) -> Result<Value, ExecutionError>;

    /// Human-readable rendering of a schema-validated result.
    fn render(&self, output: &Value) -> String {
        output.to_string()
    }
}

/// A registered tool: name, description, schemas, and handler.
///
/// Names are unique and immutable once registered; the registry owns the
/// definition for the process lifetime.
#[derive(Clone)]
pub struct ToolDefinition {
    name: String,
    description: String,
    input_schema: Schema,
    output_schema: Schema,
    handler: Arc<dyn ToolHandler>,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Schema,
        output_schema: Schema,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            output_schema,
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn input_schema(&self) -> &Schema {
        &self.input_schema
    }

    pub fn output_schema(&self) -> &Schema {
        &self.output_schema
    }

    pub fn handler(&self) -> &Arc<dyn ToolHandler> {
        &self.handler
    }
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .field("output_schema", &self.output_schema)
            .finish_non_exhaustive()
    }
}

/// Tool registry - maps tool names to definitions.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<ToolDefinition>>,
    // Registration order, for a stable client-facing catalog.
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool definition.
    ///
    /// Fails if a tool with the same name is already present; the registry
    /// is left unchanged in that case.
    pub fn register(&mut self, definition: ToolDefinition) -> Result<(), RegistryError> {
        let name = definition.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        self.tools.insert(name.clone(), Arc::new(definition));
        self.order.push(name);
        Ok(())
    }

    /// Look up a tool by name.
    pub fn lookup(&self, name: &str) -> Result<Arc<ToolDefinition>, DispatchError> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))
    }

    /// Iterate all definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &Arc<ToolDefinition>> {
        self.order.iter().filter_map(|name| self.tools.get(name))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::schema::ObjectSchema;
    use serde_json::json;

    struct EchoHandler;

    #[async_trait::async_trait]
    impl ToolHandler for EchoHandler {
        async fn call(&self, input: Value) -> Result<Value, ExecutionError> {
            Ok(input)
        }
    }

    fn echo_definition(name: &str, description: &str) -> ToolDefinition {
        ToolDefinition::new(
            name,
            description,
            Schema::object(ObjectSchema::new()),
            Schema::object(ObjectSchema::new()),
            Arc::new(EchoHandler),
        )
    }

    #[test]
    fn test_register_then_lookup_round_trip() {
        let mut registry = ToolRegistry::new();
        registry
            .register(echo_definition("echo", "Echoes input"))
            .unwrap();

        let definition = registry.lookup("echo").unwrap();
        assert_eq!(definition.name(), "echo");
        assert_eq!(definition.description(), "Echoes input");

        // Repeated lookups hand back the same definition, not a copy.
        let again = registry.lookup("echo").unwrap();
        assert!(Arc::ptr_eq(&definition, &again));
    }

    #[test]
    fn test_duplicate_name_rejected_registry_unchanged() {
        let mut registry = ToolRegistry::new();
        registry
            .register(echo_definition("echo", "the original"))
            .unwrap();

        let err = registry
            .register(echo_definition("echo", "the impostor"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(name) if name == "echo"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("echo").unwrap().description(), "the original");
    }

    #[test]
    fn test_lookup_unknown_name() {
        let registry = ToolRegistry::new();
        let err = registry.lookup("missing").unwrap_err();
        assert!(matches!(err, DispatchError::UnknownTool(name) if name == "missing"));
    }

    #[test]
    fn test_definitions_in_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(echo_definition("b", "second")).unwrap();
        registry.register(echo_definition("a", "first")).unwrap();

        let names: Vec<_> = registry.definitions().map(|d| d.name().to_string()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_default_render_is_json() {
        let handler = EchoHandler;
        let rendered = handler.render(&json!({ "result": "ok" }));
        assert_eq!(rendered, r#"{"result":"ok"}"#);
    }
}
