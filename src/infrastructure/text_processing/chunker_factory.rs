use std::sync::Arc;

use crate::application::ports::Chunker;
use crate::domain::{ChunkingConfig, ChunkingError, ChunkingStrategyKind};

use super::{FixedChunker, SemanticChunker};

pub struct ChunkerFactory;

impl ChunkerFactory {
    /// Builds the chunker named `strategy` (`fixed` or `semantic`).
    pub fn create(
        strategy: &str,
        config: &ChunkingConfig,
    ) -> Result<Arc<dyn Chunker>, ChunkingError> {
        let strategy: ChunkingStrategyKind = strategy.parse()?;
        Ok(Self::for_strategy(strategy, config))
    }

    /// Builds the chunker for the strategy the configuration names.
    pub fn from_config(config: &ChunkingConfig) -> Arc<dyn Chunker> {
        Self::for_strategy(config.strategy(), config)
    }

    fn for_strategy(strategy: ChunkingStrategyKind, config: &ChunkingConfig) -> Arc<dyn Chunker> {
        tracing::debug!(strategy = %strategy, backend = %config.backend(), "Creating chunker");
        match strategy {
            ChunkingStrategyKind::Semantic => Arc::new(SemanticChunker::new(config)),
            ChunkingStrategyKind::Fixed => Arc::new(FixedChunker::from_config(config)),
        }
    }
}
