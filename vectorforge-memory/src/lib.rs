//! VectorForge Memory Bridge
//!
//! Client-side half of the VectorForge memory system: deterministic text
//! embeddings and the command protocol used to drive the external engine
//! process that stores and searches them.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use vectorforge_memory::{Embedder, EngineClient, EngineConfig, LcgEmbedder, ProcessEngine};
//!
//! let engine = ProcessEngine::new(EngineConfig::for_root(&root));
//! let client = EngineClient::new(Arc::new(engine));
//!
//! let embedding = LcgEmbedder::new().embed("Nginx body size limit fix")?;
//! let stored = client.add("Nginx body size limit fix", &embedding).await?;
//! let hits = client.search(&embedding).await?;
//! ```

pub mod embedding;
pub mod engine;
pub mod error;

// Re-exports for convenience
pub use embedding::{utf16_code_unit_seed, Embedder, EmbeddingVector, LcgEmbedder, EMBEDDING_DIM};
pub use engine::{
    AddResponse, EngineClient, EngineCommand, EngineConfig, EngineInvocation, ProcessEngine,
    SearchResponse, SearchResult, VectorEngine,
};
pub use error::EngineError;
