//! Deterministic placeholder embeddings
//!
//! Not a language model: the vector is a linear congruential sequence seeded
//! by the sum of the text's UTF-16 code units. Its only guarantees are
//! reproducibility and a fixed dimension.

use super::vector::{EmbeddingVector, EMBEDDING_DIM};
use crate::error::Result;

const LCG_MULTIPLIER: u128 = 9301;
const LCG_INCREMENT: u128 = 49297;
const LCG_MODULUS: u128 = 233280;

/// Something that turns text into an [`EmbeddingVector`]
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<EmbeddingVector>;
}

/// Linear congruential embedder compatible with previously stored vectors
#[derive(Debug, Clone, Copy, Default)]
pub struct LcgEmbedder;

impl LcgEmbedder {
    pub fn new() -> Self {
        Self
    }
}

impl Embedder for LcgEmbedder {
    fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        let mut seed = u128::from(utf16_code_unit_seed(text));
        let mut values = Vec::with_capacity(EMBEDDING_DIM);

        for _ in 0..EMBEDDING_DIM {
            seed = (seed * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
            values.push(seed as f64 / LCG_MODULUS as f64);
        }

        EmbeddingVector::new(values)
    }
}

/// Sum of the UTF-16 code units of `text`.
///
/// Characters outside the BMP contribute both surrogate halves, not their
/// scalar value. Existing stored vectors depend on this, so it must not be
/// "fixed" in place; a Unicode-correct model belongs in a new [`Embedder`].
pub fn utf16_code_unit_seed(text: &str) -> u64 {
    text.encode_utf16().map(u64::from).sum()
}
