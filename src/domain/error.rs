use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Embedding binding mismatch: {0}")]
    EmbeddingMismatch(String),

    #[error("Store write error: {0}")]
    StoreWrite(String),

    #[error("Store query error: {0}")]
    StoreQuery(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
