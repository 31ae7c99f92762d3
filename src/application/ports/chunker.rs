use crate::domain::{ChunkingError, ChunkingStrategyKind};

/// Common interface over the fixed and semantic chunking strategies.
pub trait Chunker: Send + Sync {
    fn strategy(&self) -> ChunkingStrategyKind;

    /// Splits `text` into chunk texts, in document order.
    fn chunk_text(&self, text: &str) -> Result<Vec<String>, ChunkingError>;
}
