//! Transient record of one delegated call.

use crate::error::ApiError;
use crate::invocation::runtime::AgentOutput;
use serde_json::Value;
use std::time::Instant;
use tracing::{info, warn};

/// Lives for the duration of one `invoke_agent` call and is logged when it completes.
#[derive(Debug)]
pub struct InvocationRecord {
    pub caller_name: String,
    pub target_name: String,
    pub arguments: Value,
    pub depth: usize,
    started: Instant,
}

impl InvocationRecord {
    pub fn begin(caller_name: &str, target_name: &str, arguments: &Value, depth: usize) -> Self {
        info!(
            caller = %caller_name,
            target = %target_name,
            depth,
            "Agent invocation started"
        );
        Self {
            caller_name: caller_name.to_string(),
            target_name: target_name.to_string(),
            arguments: arguments.clone(),
            depth,
            started: Instant::now(),
        }
    }

    /// Log the outcome and hand the result back unchanged.
    pub fn complete(
        self,
        result: Result<AgentOutput, ApiError>,
    ) -> Result<AgentOutput, ApiError> {
        let duration_ms = self.started.elapsed().as_millis();
        match &result {
            Ok(output) => info!(
                caller = %self.caller_name,
                target = %self.target_name,
                depth = self.depth,
                duration_ms,
                output_chars = output.text.len(),
                "Agent invocation completed"
            ),
            Err(err) => warn!(
                caller = %self.caller_name,
                target = %self.target_name,
                depth = self.depth,
                duration_ms,
                kind = err.root_cause().kind(),
                arguments = %self.arguments,
                error = %err,
                "Agent invocation failed"
            ),
        }
        result
    }
}
