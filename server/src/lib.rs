//! VectorForge MCP Server Library
//!
//! Bridges the `store_memory` and `recall_memory` MCP tools to the external
//! VectorForge engine: arguments are validated, embedded, handed to the
//! engine binary, and its JSON output is formatted for the client.

pub mod bridge;
pub mod config;
pub mod error;
pub mod mcp;

pub use bridge::ToolBridge;
pub use config::Cli;
pub use error::BridgeError;
