//! Tool catalog - registers all built-in tools.
//!
//! The single place where the tool set is assembled. A registration failure
//! here is fatal: it means two definitions claim the same name, which is a
//! programming error that must abort startup rather than serve a broken
//! catalog.

use crate::core::config::Config;

use super::definitions::{ApiCallTool, SayHelloTool};
use super::error::RegistryError;
use super::registry::ToolRegistry;

/// Build the registry with all built-in tools.
pub fn build_registry(config: &Config) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    registry.register(SayHelloTool::definition())?;
    registry.register(ApiCallTool::definition(&config.outbound))?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_registry() {
        let registry = build_registry(&Config::default()).unwrap();
        assert_eq!(registry.len(), 2);

        let names: Vec<_> = registry.definitions().map(|d| d.name()).collect();
        assert!(names.contains(&"say_hello"));
        assert!(names.contains(&"make_api_call"));
    }

    #[test]
    fn test_catalog_advertises_schemas() {
        let registry = build_registry(&Config::default()).unwrap();

        let hello = registry.lookup("say_hello").unwrap();
        let input = hello.input_schema().to_json_schema();
        assert_eq!(input["required"], serde_json::json!(["name"]));

        let api = registry.lookup("make_api_call").unwrap();
        let output = api.output_schema().to_json_schema();
        assert_eq!(
            output["properties"]["status"]["type"],
            serde_json::json!("integer")
        );
    }
}
