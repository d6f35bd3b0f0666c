//! Error types for vectorforge-memory

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while talking to the VectorForge engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine binary could not be launched (missing, not executable, ...)
    #[error("Failed to execute VectorForge at {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine ran but exited unsuccessfully
    #[error("VectorForge exited with {status}: {stderr}")]
    Execution { status: String, stderr: String },

    /// The engine produced output that does not match the command contract
    #[error("Invalid response from VectorForge: {0}")]
    Protocol(String),

    /// The engine did not finish within the configured timeout
    #[error("VectorForge did not respond within {0:?}")]
    Timeout(Duration),

    /// An embedding violated the fixed dimension invariant
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create an embedding error
    pub fn embedding(msg: impl Into<String>) -> Self {
        Self::Embedding(msg.into())
    }

    /// Spawn failures and non-zero exits
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Spawn { .. } | Self::Execution { .. })
    }

    /// Unparsable or contract-violating engine output
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
