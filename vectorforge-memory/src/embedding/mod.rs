//! Embedding module
//!
//! Text is turned into a fixed-size vector before it is handed to the engine.
//! The engine stores whatever it receives, so the generator must stay
//! bit-for-bit stable across releases.

mod lcg;
mod vector;

pub use lcg::{utf16_code_unit_seed, Embedder, LcgEmbedder};
pub use vector::{EmbeddingVector, EMBEDDING_DIM};
