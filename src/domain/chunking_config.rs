use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use super::{ChunkingError, SentenceBackend};

pub const DEFAULT_CHUNK_SIZE: usize = 500;
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;
pub const DEFAULT_MIN_CHUNK_SIZE: usize = 300;
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 700;
pub const DEFAULT_TARGET_CHUNK_SIZE: usize = 500;
pub const DEFAULT_OVERLAP_SENTENCES: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkingStrategyKind {
    Fixed,
    #[default]
    Semantic,
}

impl ChunkingStrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Semantic => "semantic",
        }
    }
}

impl FromStr for ChunkingStrategyKind {
    type Err = ChunkingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(Self::Fixed),
            "semantic" => Ok(Self::Semantic),
            other => Err(ChunkingError::UnknownStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for ChunkingStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validated chunking parameters. Sizes are in chars.
///
/// Built through [`ChunkingConfig::builder`]; the builder rejects
/// `overlap >= chunk_size`, a zero overlap, and `min_chunk_size > max_chunk_size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkingConfig {
    strategy: ChunkingStrategyKind,
    chunk_size: usize,
    overlap: usize,
    min_chunk_size: usize,
    max_chunk_size: usize,
    target_chunk_size: usize,
    overlap_sentences: usize,
    backend: SentenceBackend,
    punkt_parameters: Option<PathBuf>,
}

impl ChunkingConfig {
    pub fn builder() -> ChunkingConfigBuilder {
        ChunkingConfigBuilder::default()
    }

    pub fn strategy(&self) -> ChunkingStrategyKind {
        self.strategy
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    pub fn min_chunk_size(&self) -> usize {
        self.min_chunk_size
    }

    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    pub fn target_chunk_size(&self) -> usize {
        self.target_chunk_size
    }

    pub fn overlap_sentences(&self) -> usize {
        self.overlap_sentences
    }

    pub fn backend(&self) -> SentenceBackend {
        self.backend
    }

    /// Data file holding learned punkt parameters, if one is configured.
    pub fn punkt_parameters(&self) -> Option<&Path> {
        self.punkt_parameters.as_deref()
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            strategy: ChunkingStrategyKind::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
            min_chunk_size: DEFAULT_MIN_CHUNK_SIZE,
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            target_chunk_size: DEFAULT_TARGET_CHUNK_SIZE,
            overlap_sentences: DEFAULT_OVERLAP_SENTENCES,
            backend: SentenceBackend::default(),
            punkt_parameters: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChunkingConfigBuilder {
    config: ChunkingConfig,
}

impl ChunkingConfigBuilder {
    pub fn strategy(mut self, strategy: ChunkingStrategyKind) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.chunk_size = chunk_size;
        self
    }

    pub fn overlap(mut self, overlap: usize) -> Self {
        self.config.overlap = overlap;
        self
    }

    pub fn min_chunk_size(mut self, min_chunk_size: usize) -> Self {
        self.config.min_chunk_size = min_chunk_size;
        self
    }

    pub fn max_chunk_size(mut self, max_chunk_size: usize) -> Self {
        self.config.max_chunk_size = max_chunk_size;
        self
    }

    pub fn target_chunk_size(mut self, target_chunk_size: usize) -> Self {
        self.config.target_chunk_size = target_chunk_size;
        self
    }

    pub fn overlap_sentences(mut self, overlap_sentences: usize) -> Self {
        self.config.overlap_sentences = overlap_sentences;
        self
    }

    pub fn backend(mut self, backend: SentenceBackend) -> Self {
        self.config.backend = backend;
        self
    }

    pub fn punkt_parameters(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.punkt_parameters = Some(path.into());
        self
    }

    pub fn build(self) -> Result<ChunkingConfig, ChunkingError> {
        let c = self.config;

        if c.chunk_size == 0 {
            return Err(invalid(format!(
                "chunk_size must be positive, got {}",
                c.chunk_size
            )));
        }
        if c.overlap == 0 {
            return Err(invalid(format!(
                "overlap must be positive, got {}",
                c.overlap
            )));
        }
        if c.overlap >= c.chunk_size {
            return Err(invalid(format!(
                "overlap ({}) must be less than chunk_size ({})",
                c.overlap, c.chunk_size
            )));
        }
        if c.min_chunk_size == 0 {
            return Err(invalid(format!(
                "min_chunk_size must be positive, got {}",
                c.min_chunk_size
            )));
        }
        if c.min_chunk_size > c.max_chunk_size {
            return Err(invalid(format!(
                "min_chunk_size ({}) must be <= max_chunk_size ({})",
                c.min_chunk_size, c.max_chunk_size
            )));
        }

        Ok(c)
    }
}

fn invalid(reason: String) -> ChunkingError {
    ChunkingError::ConfigurationInvalid(reason)
}
