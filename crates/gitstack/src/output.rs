//! JSON output formatting

use gitstack_core::{GitStackError, StackLine};
use serde::Serialize;

const SCHEMA_VERSION: &str = "1";

/// JSON response envelope
#[derive(Debug, Clone, Serialize)]
pub struct JsonResponse<T> {
    /// Schema version for forward compatibility
    pub schema_version: String,
    /// Command that generated this response
    pub command: String,
    /// Status: "ok" or "error"
    pub status: String,
    /// Command-specific payload
    pub data: T,
    /// Errors raised during the run
    pub issues: Vec<JsonIssue>,
}

impl<T> JsonResponse<T> {
    /// Build a response whose status follows from `issues`
    pub fn new(command: &str, data: T, issues: Vec<JsonIssue>) -> Self {
        let status = if issues.is_empty() { "ok" } else { "error" };
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            command: command.to_string(),
            status: status.to_string(),
            data,
            issues,
        }
    }
}

/// Issue object structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonIssue {
    /// Error code (e.g., "E001")
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl From<&GitStackError> for JsonIssue {
    fn from(err: &GitStackError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Data payload for every stack command
#[derive(Debug, Clone, Serialize)]
pub struct StackData {
    /// Stack file the session read and wrote
    pub store: String,
    /// Displayed branches in stack order
    pub branches: Vec<StackLine>,
    /// Whether `select` switched branches; absent for other commands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switched: Option<bool>,
}
