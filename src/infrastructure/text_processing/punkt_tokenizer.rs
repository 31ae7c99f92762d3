use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::application::ports::{Segmentation, SentenceTokenizer, TokenizerError};
use crate::domain::ResolvedBackend;

/// Documents longer than this many chars are tokenized in sequential batches.
pub const PUNKT_BATCH_CHARS: usize = 500_000;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+").expect("token pattern is valid"));

const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '»', '”', '’'];
const OPENERS: &[char] = &['"', '\'', '(', '[', '{', '«', '“', '‘'];

/// Learned punkt statistics: known abbreviations and frequent sentence starters.
///
/// Stored as JSON, lowercase, abbreviations without their trailing period:
///
/// ```json
/// { "abbreviations": ["dr", "e.g", "inc"], "sentence_starters": ["the", "however"] }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PunktParameters {
    #[serde(default)]
    pub abbreviations: HashSet<String>,
    #[serde(default)]
    pub sentence_starters: HashSet<String>,
}

impl PunktParameters {
    pub fn from_json(json: &str) -> Result<Self, TokenizerError> {
        let params: Self = serde_json::from_str(json)
            .map_err(|e| TokenizerError::InvalidParameters(e.to_string()))?;

        Ok(Self {
            abbreviations: params
                .abbreviations
                .into_iter()
                .map(|a| a.trim_end_matches('.').to_lowercase())
                .collect(),
            sentence_starters: params
                .sentence_starters
                .into_iter()
                .map(|s| s.to_lowercase())
                .collect(),
        })
    }
}

/// Statistical sentence splitter in the punkt style.
///
/// A period ends a sentence unless the word before it is a known
/// abbreviation, an initial, or the next word continues in lowercase.
#[derive(Debug, Clone)]
pub struct PunktTokenizer {
    params: PunktParameters,
}

impl PunktTokenizer {
    pub fn new(params: PunktParameters) -> Self {
        Self { params }
    }

    pub fn from_file(path: &Path) -> Result<Self, TokenizerError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            TokenizerError::ModelUnavailable(format!("{}: {}", path.display(), e))
        })?;
        Ok(Self::new(PunktParameters::from_json(&json)?))
    }

    pub async fn from_file_async(path: &Path) -> Result<Self, TokenizerError> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            TokenizerError::ModelUnavailable(format!("{}: {}", path.display(), e))
        })?;
        Ok(Self::new(PunktParameters::from_json(&json)?))
    }

    pub fn sentences(&self, text: &str) -> Vec<String> {
        let tokens: Vec<(usize, &str)> = TOKEN
            .find_iter(text)
            .map(|m| (m.end(), m.as_str()))
            .collect();

        let mut sentences = Vec::new();
        let mut start = 0;

        for (i, (end, token)) in tokens.iter().enumerate() {
            let next = tokens.get(i + 1).map(|(_, t)| *t);
            if !self.ends_sentence(token, next) {
                continue;
            }

            let sentence = text[start..*end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = *end;
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }

        sentences
    }

    fn ends_sentence(&self, token: &str, next: Option<&str>) -> bool {
        let core = token.trim_end_matches(CLOSERS);

        if core.ends_with('!') || core.ends_with('?') {
            return true;
        }
        if !core.ends_with('.') {
            return false;
        }

        let Some(next) = next else {
            return true;
        };
        let next_word = next.trim_start_matches(OPENERS);
        let next_upper = next_word.chars().next().is_some_and(char::is_uppercase);
        let next_lower = next_word.chars().next().is_some_and(char::is_lowercase);

        if core.ends_with("..") {
            return next_upper;
        }

        let word = core
            .trim_end_matches('.')
            .trim_start_matches(OPENERS)
            .to_lowercase();

        if self.is_abbreviation(&word) {
            let starter = next_word
                .trim_end_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            return next_upper && self.params.sentence_starters.contains(&starter);
        }

        if is_initial(&word) {
            return false;
        }

        !next_lower
    }

    fn is_abbreviation(&self, word: &str) -> bool {
        if self.params.abbreviations.contains(word) {
            return true;
        }
        // Dotted forms like "e.g" or "u.s" read as abbreviations even when unlisted.
        word.contains('.')
            && word
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(char::is_alphabetic))
    }
}

impl SentenceTokenizer for PunktTokenizer {
    fn backend(&self) -> ResolvedBackend {
        ResolvedBackend::Punkt
    }

    fn batch_limit(&self) -> Option<usize> {
        Some(PUNKT_BATCH_CHARS)
    }

    fn tokenize(&self, text: &str) -> Result<Segmentation, TokenizerError> {
        Ok(Segmentation::Texts(self.sentences(text)))
    }
}

fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}
