use crate::domain::entities::example::ExampleRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::example_index::{EmbeddingSignature, ExampleIndex, ExampleRow};
use std::sync::Arc;
use tracing::debug;

pub struct IngestUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn ExampleIndex>,
}

impl IngestUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<dyn ExampleIndex>) -> Self {
        Self { embedder, index }
    }

    /// Embed and upsert a batch of example records. The batch either fully
    /// commits or fully fails: validation, the embedding call, and the store
    /// write each abort the whole call, never part of it.
    pub async fn execute(&self, examples: &[ExampleRecord]) -> Result<usize, DomainError> {
        if examples.is_empty() {
            return Err(DomainError::MalformedRecord("empty example batch".into()));
        }
        for (i, record) in examples.iter().enumerate() {
            if record.input.trim().is_empty() {
                return Err(DomainError::MalformedRecord(format!(
                    "record {i} has an empty input"
                )));
            }
            if record.query.is_null() {
                return Err(DomainError::MalformedRecord(format!(
                    "record {i} is missing a query"
                )));
            }
        }

        self.check_binding()?;

        let texts: Vec<String> = examples.iter().map(|r| r.input.clone()).collect();
        let vectors = self.embedder.embed(&texts, InputType::Document).await?;
        if vectors.len() != texts.len() {
            return Err(DomainError::Embedding(format!(
                "provider returned {} vectors for {} texts",
                vectors.len(),
                texts.len()
            )));
        }
        let dim = self.embedder.dimension();
        if let Some(bad) = vectors.iter().find(|v| v.len() != dim) {
            return Err(DomainError::Embedding(format!(
                "provider returned a {}-dim vector, expected {dim}",
                bad.len()
            )));
        }

        let mut rows = Vec::with_capacity(examples.len());
        for (record, vector) in examples.iter().zip(vectors) {
            let metadata = serde_json::json!({ "query": record.query.clone() }).to_string();
            rows.push(ExampleRow {
                id: record.id(),
                document: record.input.clone(),
                metadata,
                embedding: vector,
            });
        }

        let count = rows.len();
        self.index.upsert(&rows)?;
        debug!(count, "ingested example batch");
        Ok(count)
    }

    /// First ingest binds the provider's signature to the collection; later
    /// ingests must match it exactly.
    fn check_binding(&self) -> Result<(), DomainError> {
        let current = EmbeddingSignature {
            model: self.embedder.model().to_string(),
            dimension: self.embedder.dimension(),
        };
        match self.index.signature()? {
            Some(stored) if stored != current => Err(DomainError::EmbeddingMismatch(format!(
                "collection is bound to {}/{} but provider is {}/{}",
                stored.model, stored.dimension, current.model, current.dimension
            ))),
            Some(_) => Ok(()),
            None => self.index.bind_signature(&current),
        }
    }
}
