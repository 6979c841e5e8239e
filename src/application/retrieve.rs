use crate::domain::entities::example::RetrievedExample;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::example_index::ExampleIndex;
use std::sync::Arc;
use tracing::debug;

pub struct RetrieveUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn ExampleIndex>,
}

impl RetrieveUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<dyn ExampleIndex>) -> Self {
        Self { embedder, index }
    }

    /// Top-k stored examples nearest to `query`, closest first. The index
    /// orders by ascending cosine distance; that order is preserved as-is.
    pub async fn execute(&self, query: &str, k: usize) -> Result<Vec<RetrievedExample>, DomainError> {
        if query.trim().is_empty() {
            return Err(DomainError::InvalidInput("query must be non-empty".into()));
        }
        if k == 0 {
            return Err(DomainError::InvalidInput("k must be at least 1".into()));
        }

        // A collection with no binding has never been ingested into.
        let stored = match self.index.signature()? {
            None => return Ok(vec![]),
            Some(sig) => sig,
        };
        if stored.model != self.embedder.model() || stored.dimension != self.embedder.dimension() {
            return Err(DomainError::EmbeddingMismatch(format!(
                "collection is bound to {}/{} but provider is {}/{}",
                stored.model,
                stored.dimension,
                self.embedder.model(),
                self.embedder.dimension()
            )));
        }

        let vectors = self
            .embedder
            .embed(&[query.to_string()], InputType::Query)
            .await?;
        let vector = vectors
            .first()
            .ok_or_else(|| DomainError::Embedding("provider returned no vector".into()))?;

        let neighbors = self.index.query_nearest(vector, k)?;
        debug!(hits = neighbors.len(), k, "retrieved nearest examples");

        neighbors
            .into_iter()
            .map(|n| {
                let meta: serde_json::Value = serde_json::from_str(&n.metadata)
                    .map_err(|e| DomainError::StoreQuery(format!("corrupt metadata: {e}")))?;
                let query = meta
                    .get("query")
                    .cloned()
                    .ok_or_else(|| DomainError::StoreQuery("metadata missing query".into()))?;
                Ok(RetrievedExample {
                    input: n.document,
                    query,
                })
            })
            .collect()
    }
}
