//! Tool-specific error types.

use thiserror::Error;

/// Errors raised before a tool gets to run.
///
/// Failures inside a tool (unknown deal, duplicate id, storage trouble) are
/// reported as `{"error": ...}` tool results instead.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("{0}")]
    InvalidArguments(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ToolError::not_found("close_deal").to_string(),
            "Unknown tool: close_deal"
        );
        assert_eq!(
            ToolError::invalid_arguments("Invalid arguments: missing field `deal_id`").to_string(),
            "Invalid arguments: missing field `deal_id`"
        );
    }
}
