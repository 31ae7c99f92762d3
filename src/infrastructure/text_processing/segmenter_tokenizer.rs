use crate::application::ports::{Segmentation, SentenceTokenizer, TokenizerError};
use crate::domain::ResolvedBackend;

#[cfg(feature = "segmenter")]
use super::char_offsets::trim_span;

/// Unicode (UAX #29) sentence boundaries over the whole document.
///
/// Only available when built with the `segmenter` feature.
#[derive(Debug, Clone, Copy)]
pub struct SegmenterTokenizer {
    _private: (),
}

impl SegmenterTokenizer {
    pub fn load() -> Result<Self, TokenizerError> {
        if cfg!(feature = "segmenter") {
            Ok(Self { _private: () })
        } else {
            Err(TokenizerError::ModelUnavailable(
                "built without the `segmenter` feature".to_string(),
            ))
        }
    }
}

impl SentenceTokenizer for SegmenterTokenizer {
    fn backend(&self) -> ResolvedBackend {
        ResolvedBackend::Segmenter
    }

    #[cfg(feature = "segmenter")]
    fn tokenize(&self, text: &str) -> Result<Segmentation, TokenizerError> {
        use unicode_segmentation::UnicodeSegmentation;

        let spans = text
            .split_sentence_bound_indices()
            .map(|(start, sentence)| trim_span(text, start, start + sentence.len()))
            .filter(|(start, end)| end > start)
            .map(|(start, end)| start..end)
            .collect();

        Ok(Segmentation::Spans(spans))
    }

    #[cfg(not(feature = "segmenter"))]
    fn tokenize(&self, _text: &str) -> Result<Segmentation, TokenizerError> {
        Err(TokenizerError::ModelUnavailable(
            "built without the `segmenter` feature".to_string(),
        ))
    }
}
