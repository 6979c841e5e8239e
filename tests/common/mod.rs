//! Shared test helpers.

use async_trait::async_trait;
use exemplar::domain::error::DomainError;
use exemplar::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use exemplar::Exemplar;
use std::sync::Arc;

pub const DIM: usize = 128;

/// Deterministic bag-of-words embedder: every lowercase token bumps one
/// dimension chosen by an FNV-1a hash. Identical texts get identical vectors
/// and texts sharing tokens land closer together, which is enough to exercise
/// the retrieval ordering contracts without a network provider.
pub struct HashEmbedder {
    model: String,
    dimension: usize,
}

impl HashEmbedder {
    pub fn new() -> Self {
        Self::named("hash-test", DIM)
    }

    pub fn named(model: &str, dimension: usize) -> Self {
        Self {
            model: model.to_string(),
            dimension,
        }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0_f32; self.dimension];
        for token in text.to_lowercase().split_whitespace() {
            let mut h: u64 = 0xcbf29ce484222325;
            for b in token.bytes() {
                h ^= u64::from(b);
                h = h.wrapping_mul(0x100000001b3);
            }
            v[(h % self.dimension as u64) as usize] += 1.0;
        }
        v
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(
        &self,
        texts: &[String],
        _input_type: InputType,
    ) -> Result<Vec<Vec<f32>>, DomainError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

pub fn setup() -> Exemplar {
    Exemplar::with_providers(":memory:", Arc::new(HashEmbedder::new())).unwrap()
}
