use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

pub const DEFAULT_MIN_TOP_K: usize = 5;
pub const DEFAULT_MAX_TOP_K: usize = 25;
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_MAX_QUERY_VARIANTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionMethod {
    #[default]
    Keyword,
    /// Not implemented yet; expands with the keyword table and logs a warning.
    Llm,
}

impl ExpansionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Llm => "llm",
        }
    }
}

impl FromStr for ExpansionMethod {
    type Err = RetrievalConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keyword" => Ok(Self::Keyword),
            "llm" => Ok(Self::Llm),
            other => Err(RetrievalConfigError(format!(
                "expansion_method must be 'keyword' or 'llm', got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ExpansionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid retrieval configuration: {0}")]
pub struct RetrievalConfigError(pub String);

/// Retrieval sizing and expansion settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalConfig {
    pub min_top_k: usize,
    pub max_top_k: usize,
    pub default_top_k: usize,
    pub enable_adaptive_top_k: bool,
    pub enable_query_expansion: bool,
    pub expansion_method: ExpansionMethod,
    pub max_query_variants: usize,
}

impl RetrievalConfig {
    pub fn validate(self) -> Result<Self, RetrievalConfigError> {
        if self.min_top_k == 0 {
            return Err(RetrievalConfigError(format!(
                "min_top_k must be positive, got {}",
                self.min_top_k
            )));
        }
        if self.max_top_k == 0 {
            return Err(RetrievalConfigError(format!(
                "max_top_k must be positive, got {}",
                self.max_top_k
            )));
        }
        if self.min_top_k > self.max_top_k {
            return Err(RetrievalConfigError(format!(
                "min_top_k ({}) must be <= max_top_k ({})",
                self.min_top_k, self.max_top_k
            )));
        }
        if self.default_top_k == 0 {
            return Err(RetrievalConfigError(format!(
                "default_top_k must be positive, got {}",
                self.default_top_k
            )));
        }
        if self.max_query_variants == 0 {
            return Err(RetrievalConfigError(format!(
                "max_query_variants must be positive, got {}",
                self.max_query_variants
            )));
        }
        Ok(self)
    }
}

impl Default for RetrievalConfig {
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
