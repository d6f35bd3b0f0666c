//! Error types for the VectorForge MCP server.

use thiserror::Error;
use vectorforge_memory::EngineError;

/// Errors that can occur while handling a tool call.
///
/// None of these escape the tool boundary: the bridge turns every one of
/// them into an error-flagged tool result.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Invalid arguments: {0}")]
    Validation(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl BridgeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result type alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
