//! Tool-specific error types.
//!
//! Registration errors are fatal at startup; dispatch errors are recovered
//! per invocation and turned into structured error responses.

use thiserror::Error;

use super::schema::ValidationError;

/// Errors raised while executing a tool handler.
///
/// Execution is the only dispatch stage that may perform I/O, so it is the
/// only stage whose failures originate outside this process.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The handler itself reported a failure.
    #[error("{0}")]
    Failed(String),

    /// An outbound HTTP request could not be completed.
    #[error("outbound request failed: {0}")]
    Outbound(#[from] reqwest::Error),

    /// The handler exceeded the per-invocation execution timeout.
    #[error("execution timed out")]
    Timeout,
}

impl ExecutionError {
    /// Create a handler failure from a message.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

/// Errors raised while registering tools at startup.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A tool with this name is already registered.
    #[error("duplicate tool name: {0}")]
    DuplicateName(String),
}

/// A dispatch failure, tagged by the pipeline stage that produced it.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request referenced a name no tool was registered under.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The caller's arguments did not match the tool's input schema.
    #[error("input validation failed: {0}")]
    InputValidation(ValidationError),

    /// The handler (or its external dependency) failed.
    #[error("execution failed: {0}")]
    Execution(ExecutionError),

    /// The handler's result did not match the tool's output schema.
    /// This indicates a handler/schema contract bug, not a caller error.
    #[error("output validation failed: {0}")]
    OutputValidation(ValidationError),
}

impl DispatchError {
    /// Stage tag carried in the error envelope returned to clients.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "lookup",
            Self::InputValidation(_) => "input_validation",
            Self::Execution(_) => "execution",
            Self::OutputValidation(_) => "output_validation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_tags() {
        let err = DispatchError::UnknownTool("nope".to_string());
        assert_eq!(err.stage(), "lookup");

        let err = DispatchError::InputValidation(ValidationError::MissingField("name".into()));
        assert_eq!(err.stage(), "input_validation");

        let err = DispatchError::Execution(ExecutionError::Timeout);
        assert_eq!(err.stage(), "execution");

        let err = DispatchError::OutputValidation(ValidationError::UnexpectedField("x".into()));
        assert_eq!(err.stage(), "output_validation");
    }

    #[test]
    fn test_messages_are_descriptive() {
        let err = DispatchError::Execution(ExecutionError::failed("backend said no"));
        assert_eq!(err.to_string(), "execution failed: backend said no");

        let err = DispatchError::Execution(ExecutionError::Timeout);
        assert!(err.to_string().contains("timed out"));
    }
}
