use crate::dom::NodeId;
use thiserror::Error;

/// Errors raised by document and style operations
///
/// Absent values (out-of-range items, unknown property names) are reported as `None`
/// by the read APIs and never show up here.
#[derive(Error, Debug)]
pub enum DomError {
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Hierarchy request failed: {0}")]
    HierarchyRequest(String),

    #[error("Invalid token '{0}': tokens must be non-empty and contain no whitespace")]
    InvalidToken(String),

    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Rule '{rule}' has no accessor named '{accessor}'")]
    UnknownAccessor { rule: String, accessor: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool '{tool}' failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, DomError>;
