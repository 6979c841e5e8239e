pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::ingest::IngestUseCase;
use crate::application::retrieve::RetrieveUseCase;
use crate::application::stats::StatsUseCase;
use crate::domain::entities::example::{ExampleRecord, RetrievedExample};
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::example_index::{ExampleIndex, IndexStats};
use crate::infrastructure::embeddings::azure::AzureOpenAiProvider;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use crate::infrastructure::embeddings::voyage::VoyageProvider;
use crate::infrastructure::sqlite::example_index::SqliteExampleIndex;
use crate::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::Connection;
use std::sync::Arc;

pub struct Exemplar {
    ingest_uc: IngestUseCase,
    retrieve_uc: RetrieveUseCase,
    stats_uc: StatsUseCase,
}

impl Exemplar {
    /// Open the store at `db_path` with the embedding provider selected from
    /// the environment. `EXEMPLAR_EMBEDDING_PROVIDER` must name a real
    /// provider; there is no meaningful degraded mode for a similarity index.
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let provider = std::env::var("EXEMPLAR_EMBEDDING_PROVIDER").unwrap_or_default();
        let api_key = std::env::var("EXEMPLAR_EMBEDDING_API_KEY").unwrap_or_default();
        let model = std::env::var("EXEMPLAR_EMBEDDING_MODEL").ok();
        let endpoint = std::env::var("EXEMPLAR_EMBEDDING_ENDPOINT").ok();

        let embedder: Arc<dyn EmbeddingProvider> = match provider.as_str() {
            "openai" => Arc::new(OpenAiProvider::new(api_key, model)),
            "azure" => {
                let endpoint = endpoint.ok_or_else(|| {
                    DomainError::InvalidInput("EXEMPLAR_EMBEDDING_ENDPOINT is required for azure".into())
                })?;
                let deployment = std::env::var("EXEMPLAR_AZURE_DEPLOYMENT").map_err(|_| {
                    DomainError::InvalidInput("EXEMPLAR_AZURE_DEPLOYMENT is required for azure".into())
                })?;
                let api_version = std::env::var("EXEMPLAR_AZURE_API_VERSION").ok();
                Arc::new(AzureOpenAiProvider::new(
                    api_key,
                    endpoint,
                    deployment,
                    api_version,
                    model,
                ))
            }
            "voyage" => Arc::new(VoyageProvider::new(api_key, model, endpoint)),
            other => {
                return Err(DomainError::InvalidInput(format!(
                    "unknown embedding provider '{other}'; set EXEMPLAR_EMBEDDING_PROVIDER to openai, azure, or voyage"
                )))
            }
        };

        Self::with_providers(db_path, embedder)
    }

    /// Wire the store with an explicit embedding provider. Tests use this to
    /// inject a deterministic embedder.
    pub fn with_providers(
        db_path: &str,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::StoreWrite(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::StoreWrite(format!("WAL error: {e}")))?;

        run_migrations(&conn)?;

        let index: Arc<dyn ExampleIndex> = Arc::new(SqliteExampleIndex::new(conn));

        Ok(Self {
            ingest_uc: IngestUseCase::new(embedder.clone(), index.clone()),
            retrieve_uc: RetrieveUseCase::new(embedder, index.clone()),
            stats_uc: StatsUseCase::new(index),
        })
    }

    /// Embed and upsert a batch of example records; returns the number of
    /// rows written. The batch fully commits or fully fails.
    pub async fn ingest(&self, examples: &[ExampleRecord]) -> Result<usize, DomainError> {
        self.ingest_uc.execute(examples).await
    }

    /// The k stored examples nearest to `query`, closest first.
    pub async fn retrieve(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievedExample>, DomainError> {
        self.retrieve_uc.execute(query, k).await
    }

    pub fn stats(&self) -> Result<IndexStats, DomainError> {
        self.stats_uc.execute()
    }
}
