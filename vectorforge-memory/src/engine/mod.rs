//! VectorForge engine command protocol
//!
//! The engine is a separate executable invoked once per operation:
//!
//! ```text
//! vectorforge add <content> <embedding_json>   -> {"id": 3}
//! vectorforge search <embedding_json>          -> {"results": [{"id", "content", "score"}]}
//! ```
//!
//! [`VectorEngine`] abstracts "run a command, get JSON back" so callers can
//! substitute an in-process fake; [`ProcessEngine`] is the real subprocess
//! implementation and [`EngineClient`] layers the typed commands on top.

mod process;
mod response;

pub use process::{EngineConfig, ProcessEngine};
pub use response::{decode, AddResponse, SearchResponse, SearchResult};

use crate::embedding::EmbeddingVector;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Commands understood by the engine binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    Add,
    Search,
}

impl EngineCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineCommand::Add => "add",
            EngineCommand::Search => "search",
        }
    }
}

impl fmt::Display for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single engine call: the command and its positional arguments
#[derive(Debug, Clone, PartialEq)]
pub struct EngineInvocation {
    pub command: EngineCommand,
    pub args: Vec<String>,
}

impl EngineInvocation {
    /// `add <text> <embedding_json>`
    pub fn add(text: &str, embedding: &EmbeddingVector) -> Result<Self> {
        Ok(Self {
            command: EngineCommand::Add,
            args: vec![text.to_string(), embedding.to_json()?],
        })
    }

    /// `search <embedding_json>`
    pub fn search(embedding: &EmbeddingVector) -> Result<Self> {
        Ok(Self {
            command: EngineCommand::Search,
            args: vec![embedding.to_json()?],
        })
    }
}

/// Runs engine commands and returns their parsed JSON output
#[async_trait]
pub trait VectorEngine: Send + Sync {
    async fn invoke(&self, invocation: &EngineInvocation) -> Result<Value>;
}

/// Typed `add`/`search` calls over any [`VectorEngine`]
#[derive(Clone)]
pub struct EngineClient {
    engine: Arc<dyn VectorEngine>,
}

impl EngineClient {
    pub fn new(engine: Arc<dyn VectorEngine>) -> Self {
        Self { engine }
    }

    /// Store `text` under `embedding`, returning the engine-assigned id
    pub async fn add(&self, text: &str, embedding: &EmbeddingVector) -> Result<AddResponse> {
        let invocation = EngineInvocation::add(text, embedding)?;
        let value = self.engine.invoke(&invocation).await?;
        decode(value)
    }

    /// Nearest neighbours of `embedding`, best first
    pub async fn search(&self, embedding: &EmbeddingVector) -> Result<SearchResponse> {
        let invocation = EngineInvocation::search(embedding)?;
        let value = self.engine.invoke(&invocation).await?;
        decode(value)
    }
}

impl fmt::Debug for EngineClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineClient").finish_non_exhaustive()
    }
}
