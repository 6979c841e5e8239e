use crate::domain::error::DomainError;
use crate::domain::ports::example_index::{ExampleIndex, IndexStats};
use std::sync::Arc;

pub struct StatsUseCase {
    index: Arc<dyn ExampleIndex>,
}

impl StatsUseCase {
    pub fn new(index: Arc<dyn ExampleIndex>) -> Self {
        Self { index }
    }

    pub fn execute(&self) -> Result<IndexStats, DomainError> {
        Ok(IndexStats {
            examples: self.index.count()?,
            binding: self.index.signature()?,
        })
    }
}
