use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy)]
pub enum InputType {
    Document,
    Query,
}

/// Maps text to fixed-dimension vectors. Ingestion and retrieval must use the
/// same provider (same model, same dimension) against one collection;
/// the index enforces this through its stored signature.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(
        &self,
        texts: &[String],
        input_type: InputType,
    ) -> Result<Vec<Vec<f32>>, DomainError>;

    /// Logical model identifier, recorded in the collection's binding.
    fn model(&self) -> &str;

    fn dimension(&self) -> usize;
}
