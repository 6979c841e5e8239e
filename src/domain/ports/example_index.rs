use crate::domain::error::DomainError;
use serde::Serialize;

/// A fully prepared row for the index: id, the document text the embedding
/// was computed from, the canonical metadata JSON, and the embedding itself.
#[derive(Debug, Clone)]
pub struct ExampleRow {
    pub id: String,
    pub document: String,
    /// Canonical serde_json encoding of `{"query": <value>}`.
    pub metadata: String,
    pub embedding: Vec<f32>,
}

/// One nearest-neighbor hit, closest-first ordering is the store's contract.
#[derive(Debug, Clone)]
pub struct Neighbor {
    pub document: String,
    pub metadata: String,
    /// Cosine distance (1 - cosine similarity), ascending across a result set.
    pub distance: f64,
}

/// Embedding function binding recorded at first ingest. A collection only
/// ever holds vectors from one model at one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddingSignature {
    pub model: String,
    pub dimension: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub examples: usize,
    pub binding: Option<EmbeddingSignature>,
}

/// Persisted vector index over example rows. Addressed by an on-disk path;
/// reopening the same path yields the same collection.
pub trait ExampleIndex: Send + Sync {
    /// Replace-or-create every row in one atomic batch. A failure leaves the
    /// collection exactly as it was.
    fn upsert(&self, rows: &[ExampleRow]) -> Result<(), DomainError>;

    /// Top-k rows by ascending cosine distance from `embedding`. Returns
    /// fewer than k when the collection is smaller; empty when it is empty.
    fn query_nearest(&self, embedding: &[f32], k: usize) -> Result<Vec<Neighbor>, DomainError>;

    fn count(&self) -> Result<usize, DomainError>;

    /// The embedding binding, if any ingest has happened yet.
    fn signature(&self) -> Result<Option<EmbeddingSignature>, DomainError>;

    fn bind_signature(&self, sig: &EmbeddingSignature) -> Result<(), DomainError>;
}
