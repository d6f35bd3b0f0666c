//! Fixed-dimension embedding vector

use crate::error::{EngineError, Result};
use serde::Serialize;

/// Dimension shared with the engine's on-disk record layout
pub const EMBEDDING_DIM: usize = 1536;

/// An immutable embedding of exactly [`EMBEDDING_DIM`] values.
///
/// Serializes as a plain JSON array of numbers, which is the form the engine
/// accepts on its command line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EmbeddingVector(Vec<f64>);

impl EmbeddingVector {
    /// Wrap raw values, rejecting anything that is not [`EMBEDDING_DIM`] long.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.len() != EMBEDDING_DIM {
            return Err(EngineError::embedding(format!(
                "Embedding must have {} dimensions, got {}",
                EMBEDDING_DIM,
                values.len()
            )));
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON array text passed to the engine as a single argument
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl AsRef<[f64]> for EmbeddingVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}
