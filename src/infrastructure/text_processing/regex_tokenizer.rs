use std::sync::LazyLock;

use regex::Regex;

use crate::application::ports::{Segmentation, SentenceTokenizer, TokenizerError};
use crate::domain::ResolvedBackend;

use super::char_offsets::trim_span;

// The regex crate matches in linear time, so adversarial input cannot blow up.
static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("sentence pattern is valid"));

/// Terminator heuristic: a run of non-terminators closed by `.`, `!` or `?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexTokenizer;

impl RegexTokenizer {
    pub fn new() -> Self {
        Self
    }

    pub fn spans(&self, text: &str) -> Vec<std::ops::Range<usize>> {
        let mut spans = Vec::new();

        for m in SENTENCE.find_iter(text) {
            let (start, end) = trim_span(text, m.start(), m.end());
            if text[start..end].chars().nth(1).is_none() {
                continue;
            }
            spans.push(start..end);

            if spans.len() % 1000 == 0 {
                tracing::trace!(sentences = spans.len(), "Regex sentence scan progress");
            }
        }

        spans
    }
}

impl SentenceTokenizer for RegexTokenizer {
    fn backend(&self) -> ResolvedBackend {
        ResolvedBackend::Regex
    }

    fn tokenize(&self, text: &str) -> Result<Segmentation, TokenizerError> {
        Ok(Segmentation::Spans(self.spans(text)))
    }
}
