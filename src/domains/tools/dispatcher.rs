//! Dispatcher - routes one invocation request through the staged pipeline.
//!
//! Each invocation moves through lookup, input validation, execution, and
//! output validation before a result is packaged. Every stage failure maps
//! to its own [`DispatchError`] variant, so a caller error, a handler/schema
//! contract bug, and an external dependency failure stay independently
//! diagnosable. Failures are recovered here and never escape as a crash.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use super::error::{DispatchError, ExecutionError};
use super::registry::ToolRegistry;

/// One named invocation with untyped arguments, created per incoming call.
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    pub tool_name: String,
    pub arguments: Value,
}

impl InvocationRequest {
    pub fn new(tool_name: impl Into<String>, arguments: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
        }
    }
}

/// The packaged outcome of a completed dispatch.
#[derive(Debug, Clone)]
pub struct InvocationResult {
    /// The handler's result, already checked against the output schema.
    pub structured_content: Value,

    /// Human-readable rendering of the result.
    pub text_content: String,
}

/// Routes invocation requests to registered tools.
///
/// Holds no mutable state; concurrent dispatches share only the read-only
/// registry, so one invocation's pending external call never blocks
/// another's pipeline.
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    execution_timeout: Duration,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>, execution_timeout: Duration) -> Self {
        Self {
            registry,
            execution_timeout,
        }
    }

    /// Dispatch one invocation end to end.
    ///
    /// The execution stage is the only one that may perform I/O and the only
    /// one with unbounded latency, so it alone is wrapped in the
    /// per-invocation timeout.
    #[instrument(skip_all, fields(tool = %request.tool_name))]
    pub async fn dispatch(
        &self,
        request: InvocationRequest,
    ) -> Result<InvocationResult, DispatchError> {
        let definition = self.registry.lookup(&request.tool_name)?;

        definition
            .input_schema()
            .validate(&request.arguments)
            .map_err(|e| {
                warn!("rejected arguments: {}", e);
                DispatchError::InputValidation(e)
            })?;

        let output = timeout(
            self.execution_timeout,
            definition.handler().call(request.arguments),
        )
        .await
        .map_err(|_| {
            warn!("handler exceeded {:?}", self.execution_timeout);
            DispatchError::Execution(ExecutionError::Timeout)
        })?
        .map_err(|e| {
            warn!("handler failed: {}", e);
            DispatchError::Execution(e)
        })?;

        definition.output_schema().validate(&output).map_err(|e| {
            warn!("handler returned malformed result: {}", e);
            DispatchError::OutputValidation(e)
        })?;

        let text_content = definition.handler().render(&output);
        debug!("completed");

        Ok(InvocationResult {
            structured_content: output,
            text_content,
        })
    }
}
