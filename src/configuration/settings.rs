use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::Deserialize;

use crate::domain::{
    ChunkingConfig, ChunkingError, ChunkingStrategyKind, DEFAULT_CHUNK_OVERLAP,
    DEFAULT_CHUNK_SIZE, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_MAX_QUERY_VARIANTS, DEFAULT_MAX_TOP_K,
    DEFAULT_MIN_CHUNK_SIZE, DEFAULT_MIN_TOP_K, DEFAULT_OVERLAP_SENTENCES, DEFAULT_TOP_K,
    ExpansionMethod, RetrievalConfig, RetrievalConfigError, SentenceBackend,
};
use crate::infrastructure::observability::TracingConfig;

use super::Environment;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
    #[error(transparent)]
    Invalid(#[from] ChunkingError),
    #[error(transparent)]
    InvalidRetrieval(#[from] RetrievalConfigError),
}

/// Layered settings: built-in defaults, then an optional
/// `appsettings.<environment>` file, then `APP_`-prefixed environment
/// variables with `__` between sections (`APP_CHUNKING__CHUNK_SIZE=800`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    pub strategy: ChunkingStrategyKind,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub min_chunk_size: usize,
    pub max_chunk_size: usize,
    /// Falls back to `chunk_size` when unset.
    pub target_chunk_size: Option<usize>,
    pub overlap_sentences: usize,
    pub backend: SentenceBackend,
    pub punkt_parameters: Option<PathBuf>,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            strategy: ChunkingStrategyKind::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            min_chunk_size: DEFAULT_MIN_CHUNK_SIZE,
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            target_chunk_size: None,
            overlap_sentences: DEFAULT_OVERLAP_SENTENCES,
            backend: SentenceBackend::default(),
            punkt_parameters: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub min_top_k: usize,
    pub max_top_k: usize,
    pub default_top_k: usize,
    pub enable_adaptive_top_k: bool,
    pub enable_query_expansion: bool,
    pub expansion_method: ExpansionMethod,
    pub max_query_variants: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            min_top_k: DEFAULT_MIN_TOP_K,
            max_top_k: DEFAULT_MAX_TOP_K,
            default_top_k: DEFAULT_TOP_K,
            enable_adaptive_top_k: true,
            enable_query_expansion: false,
            expansion_method: ExpansionMethod::default(),
            max_query_variants: DEFAULT_MAX_QUERY_VARIANTS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}

impl Settings {
    /// Loads settings for `environment`, reading `appsettings.<environment>`
    /// from the working directory when present.
    pub fn load(environment: Environment) -> Result<Self, ConfigurationError> {
        let file = File::with_name(&environment.settings_file()).required(false);
        let settings = Self::build(file)?;

        tracing::debug!(environment = %environment, "Settings loaded");
        Ok(settings)
    }

    /// Loads settings from an explicit file; the format follows its extension.
    pub fn load_from(path: &Path) -> Result<Self, ConfigurationError> {
        Self::build(File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, ConfigurationError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let configuration = Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(configuration.try_deserialize()?)
    }

    pub fn chunking_config(&self) -> Result<ChunkingConfig, ConfigurationError> {
        Ok(ChunkingConfig::try_from(&self.chunking)?)
    }

    pub fn retrieval_config(&self) -> Result<RetrievalConfig, ConfigurationError> {
        Ok(RetrievalConfig::try_from(&self.retrieval)?)
    }

    pub fn tracing_config(&self, environment: Environment) -> TracingConfig {
        let mut config = TracingConfig::from(&self.logging);
        config.environment = environment.to_string();
        config
    }
}

impl TryFrom<&ChunkingSettings> for ChunkingConfig {
    type Error = ChunkingError;

    fn try_from(s: &ChunkingSettings) -> Result<Self, Self::Error> {
        let mut builder = ChunkingConfig::builder()
            .strategy(s.strategy)
            .chunk_size(s.chunk_size)
            .overlap(s.chunk_overlap)
            .min_chunk_size(s.min_chunk_size)
            .max_chunk_size(s.max_chunk_size)
            .target_chunk_size(s.target_chunk_size.unwrap_or(s.chunk_size))
            .overlap_sentences(s.overlap_sentences)
            .backend(s.backend);

        if let Some(path) = &s.punkt_parameters {
            builder = builder.punkt_parameters(path.clone());
        }

        builder.build()
    }
}

impl TryFrom<&RetrievalSettings> for RetrievalConfig {
    type Error = RetrievalConfigError;

    fn try_from(s: &RetrievalSettings) -> Result<Self, Self::Error> {
        RetrievalConfig {
            min_top_k: s.min_top_k,
            max_top_k: s.max_top_k,
            default_top_k: s.default_top_k,
            enable_adaptive_top_k: s.enable_adaptive_top_k,
            enable_query_expansion: s.enable_query_expansion,
            expansion_method: s.expansion_method,
            max_query_variants: s.max_query_variants,
        }
        .validate()
    }
}

impl From<&LoggingSettings> for TracingConfig {
    fn from(s: &LoggingSettings) -> Self {
        Self {
            level: s.level.clone(),
            json_format: s.enable_json,
            ..Self::default()
        }
    }
}
