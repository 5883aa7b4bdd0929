//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur while dispatching tool calls.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not in the registry.
    #[error("Unknown tool: {0}")]
    NotFound(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }
}
