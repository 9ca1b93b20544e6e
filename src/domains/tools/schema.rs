//! Structural schema descriptors and validation.
//!
//! Tool inputs and outputs cross a wire boundary as untyped JSON, so their
//! shape is checked at runtime against an explicit descriptor rather than
//! inferred at compile time. Validation is structural (shape and primitive
//! type) - semantic checks belong to the tool handlers themselves.

use serde_json::{Map, Value, json};
use thiserror::Error;

/// A structural description of an expected JSON shape.
///
/// Either a primitive or an object with named fields. Object schemas reject
/// fields they do not declare; the same policy applies to handler output.
#[derive(Debug, Clone)]
pub enum Schema {
    String,
    /// A JSON number that is an exact integer.
    Integer,
    /// Any JSON number.
    Number,
    Boolean,
    Object(ObjectSchema),
}

/// An object schema: a set of named fields, each required or optional.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone)]
struct FieldSpec {
    name: String,
    schema: Schema,
    required: bool,
}

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("field `{field}`: expected {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unexpected field `{0}`")]
    UnexpectedField(String),

    #[error("expected {expected}, got {found}")]
    WrongShape {
        expected: &'static str,
        found: &'static str,
    },
}

impl ObjectSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required field.
    pub fn field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            schema,
            required: true,
        });
        self
    }

    /// Add an optional field.
    pub fn optional(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            schema,
            required: false,
        });
        self
    }

    fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl Schema {
    /// Shorthand for an object schema.
    pub fn object(fields: ObjectSchema) -> Self {
        Self::Object(fields)
    }

    /// The name this schema advertises in errors and JSON Schema documents.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object(_) => "object",
        }
    }

    /// Check `value` against this schema.
    ///
    /// Used for both inbound arguments and handler results; the caller maps
    /// the error to the appropriate dispatch stage.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        self.validate_at("", value)
    }

    fn validate_at(&self, path: &str, value: &Value) -> Result<(), ValidationError> {
        match self {
            Self::String if value.is_string() => Ok(()),
            Self::Integer if value.as_i64().is_some() || value.as_u64().is_some() => Ok(()),
            Self::Number if value.is_number() => Ok(()),
            Self::Boolean if value.is_boolean() => Ok(()),
            Self::Object(fields) => match value.as_object() {
                Some(map) => fields.validate_map(path, map),
                None => Err(shape_error(path, "object", value)),
            },
            _ => Err(shape_error(path, self.type_name(), value)),
        }
    }

    /// Render this schema as a JSON Schema document for the tool catalog.
    pub fn to_json_schema(&self) -> Value {
        match self {
            Self::Object(fields) => {
                let mut properties = Map::new();
                let mut required = Vec::new();
                for field in &fields.fields {
                    properties.insert(field.name.clone(), field.schema.to_json_schema());
                    if field.required {
                        required.push(Value::String(field.name.clone()));
                    }
                }
                json!({
                    "type": "object",
                    "properties": properties,
                    "required": required,
                    "additionalProperties": false,
                })
            }
            primitive => json!({ "type": primitive.type_name() }),
        }
    }

    /// Like [`Schema::to_json_schema`] but as a JSON object map, the shape
    /// rmcp's `Tool` model expects for its schema fields.
    pub fn to_schema_object(&self) -> Map<String, Value> {
        match self.to_json_schema() {
            Value::Object(map) => map,
            // to_json_schema always renders an object
            _ => Map::new(),
        }
    }
}

impl ObjectSchema {
    fn validate_map(&self, path: &str, map: &Map<String, Value>) -> Result<(), ValidationError> {
        for field in &self.fields {
            match map.get(&field.name) {
                Some(value) => {
                    field
                        .schema
                        .validate_at(&join_path(path, &field.name), value)?;
                }
                None if field.required => {
                    return Err(ValidationError::MissingField(join_path(path, &field.name)));
                }
                None => {}
            }
        }

        // Undeclared fields are rejected rather than ignored.
        for key in map.keys() {
            if self.get(key).is_none() {
                return Err(ValidationError::UnexpectedField(join_path(path, key)));
            }
        }

        Ok(())
    }
}

fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn shape_error(path: &str, expected: &'static str, value: &Value) -> ValidationError {
    let found = json_type_name(value);
    if path.is_empty() {
        ValidationError::WrongShape { expected, found }
    } else {
        ValidationError::TypeMismatch {
            field: path.to_string(),
            expected,
            found,
        }
    }
}

/// The JSON type of a value, for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello_input() -> Schema {
        Schema::object(ObjectSchema::new().field("name", Schema::String))
    }

    #[test]
    fn test_valid_object() {
        let schema = hello_input();
        assert!(schema.validate(&json!({ "name": "World" })).is_ok());
    }

    #[test]
    fn test_missing_required_field() {
        let schema = hello_input();
        let err = schema.validate(&json!({})).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("name".to_string()));
    }

    #[test]
    fn test_wrong_primitive_type() {
        let schema = hello_input();
        let err = schema.validate(&json!({ "name": 42 })).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                field: "name".to_string(),
                expected: "string",
                found: "integer",
            }
        );
    }

    #[test]
    fn test_unexpected_field_rejected() {
        let schema = hello_input();
        let err = schema
            .validate(&json!({ "name": "World", "extra": true }))
            .unwrap_err();
        assert_eq!(err, ValidationError::UnexpectedField("extra".to_string()));
    }

    #[test]
    fn test_optional_field_may_be_absent() {
        let schema = Schema::object(
            ObjectSchema::new()
                .field("name", Schema::String)
                .optional("greeting", Schema::String),
        );
        assert!(schema.validate(&json!({ "name": "World" })).is_ok());
        assert!(
            schema
                .validate(&json!({ "name": "World", "greeting": "Hi" }))
                .is_ok()
        );
    }

    #[test]
    fn test_empty_object_schema_rejects_any_field() {
        let schema = Schema::object(ObjectSchema::new());
        assert!(schema.validate(&json!({})).is_ok());
        let err = schema.validate(&json!({ "anything": 1 })).unwrap_err();
        assert_eq!(err, ValidationError::UnexpectedField("anything".to_string()));
    }

    #[test]
    fn test_non_object_against_object_schema() {
        let schema = hello_input();
        let err = schema.validate(&json!("just a string")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongShape {
                expected: "object",
                found: "string",
            }
        );
    }

    #[test]
    fn test_integer_vs_number() {
        let schema = Schema::object(ObjectSchema::new().field("status", Schema::Integer));
        assert!(schema.validate(&json!({ "status": 200 })).is_ok());

        let err = schema.validate(&json!({ "status": 1.5 })).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                field: "status".to_string(),
                expected: "integer",
                found: "number",
            }
        );

        // Any number, integral or not, satisfies Number.
        let loose = Schema::object(ObjectSchema::new().field("status", Schema::Number));
        assert!(loose.validate(&json!({ "status": 1.5 })).is_ok());
        assert!(loose.validate(&json!({ "status": 200 })).is_ok());
    }

    #[test]
    fn test_nested_object_path_in_error() {
        let schema = Schema::object(ObjectSchema::new().field(
            "inner",
            Schema::object(ObjectSchema::new().field("flag", Schema::Boolean)),
        ));
        let err = schema
            .validate(&json!({ "inner": { "flag": "yes" } }))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                field: "inner.flag".to_string(),
                expected: "boolean",
                found: "string",
            }
        );
    }

    #[test]
    fn test_json_schema_rendering() {
        let schema = Schema::object(
            ObjectSchema::new()
                .field("name", Schema::String)
                .optional("limit", Schema::Integer),
        );
        let rendered = schema.to_json_schema();

        assert_eq!(rendered["type"], json!("object"));
        assert_eq!(rendered["properties"]["name"]["type"], json!("string"));
        assert_eq!(rendered["properties"]["limit"]["type"], json!("integer"));
        assert_eq!(rendered["required"], json!(["name"]));
        assert_eq!(rendered["additionalProperties"], json!(false));
    }

    #[test]
    fn test_schema_object_for_tool_model() {
        let schema = Schema::object(ObjectSchema::new().field("name", Schema::String));
        let map = schema.to_schema_object();
        assert_eq!(map.get("type"), Some(&json!("object")));
        assert!(map.contains_key("properties"));
    }
}
