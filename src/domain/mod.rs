mod chunk;
mod chunking_config;
mod chunking_error;
mod query_analysis;
mod retrieval_config;
mod sentence_backend;

pub use chunk::{Chunk, PageChunk, Sentence};
pub use chunking_config::{
    ChunkingConfig, ChunkingConfigBuilder, ChunkingStrategyKind, DEFAULT_CHUNK_OVERLAP,
    DEFAULT_CHUNK_SIZE, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_MIN_CHUNK_SIZE, DEFAULT_OVERLAP_SENTENCES,
    DEFAULT_TARGET_CHUNK_SIZE,
};
pub use chunking_error::ChunkingError;
pub use query_analysis::{QueryAnalysis, QueryType};
pub use retrieval_config::{
    DEFAULT_MAX_QUERY_VARIANTS, DEFAULT_MAX_TOP_K, DEFAULT_MIN_TOP_K, DEFAULT_TOP_K,
    ExpansionMethod, RetrievalConfig, RetrievalConfigError,
};
pub use sentence_backend::{ResolvedBackend, SentenceBackend};
