use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::ChunkingError;

/// Requested sentence-boundary backend.
///
/// `Auto` walks the preference chain segmenter, punkt, regex. The explicit
/// modes skip the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceBackend {
    #[default]
    Auto,
    #[serde(alias = "spacy")]
    Segmenter,
    #[serde(alias = "nltk")]
    Punkt,
    Regex,
}

impl SentenceBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Segmenter => "segmenter",
            Self::Punkt => "punkt",
            Self::Regex => "regex",
        }
    }
}

impl FromStr for SentenceBackend {
    type Err = ChunkingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "segmenter" | "spacy" => Ok(Self::Segmenter),
            "punkt" | "nltk" => Ok(Self::Punkt),
            "regex" => Ok(Self::Regex),
            other => Err(ChunkingError::ConfigurationInvalid(format!(
                "unknown sentence backend: {}. Expected: auto, segmenter, punkt, or regex",
                other
            ))),
        }
    }
}

impl fmt::Display for SentenceBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The backend a chunker actually ended up using.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedBackend {
    Segmenter,
    Punkt,
    Regex,
}

impl ResolvedBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Segmenter => "segmenter",
            Self::Punkt => "punkt",
            Self::Regex => "regex",
        }
    }
}

impl fmt::Display for ResolvedBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
