use std::ops::Range;

use crate::domain::ResolvedBackend;

/// Output of a sentence tokenizer run over one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segmentation {
    /// Byte ranges into the tokenized text.
    Spans(Vec<Range<usize>>),
    /// Sentence strings without positions; the caller locates them.
    Texts(Vec<String>),
}

pub trait SentenceTokenizer: Send + Sync {
    fn backend(&self) -> ResolvedBackend;

    /// Largest input in chars the tokenizer should receive per call.
    fn batch_limit(&self) -> Option<usize> {
        None
    }

    fn tokenize(&self, text: &str) -> Result<Segmentation, TokenizerError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TokenizerError {
    #[error("tokenizer model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("invalid tokenizer parameters: {0}")]
    InvalidParameters(String),
    #[error("tokenization failed: {0}")]
    TokenizationFailed(String),
}
