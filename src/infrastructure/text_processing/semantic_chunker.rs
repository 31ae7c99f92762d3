use std::sync::LazyLock;
use std::time::Instant;

use regex::Regex;

use crate::application::ports::Chunker;
use crate::domain::{
    Chunk, ChunkingConfig, ChunkingError, ChunkingStrategyKind, ResolvedBackend, Sentence,
};

use super::char_offsets::{CharOffsets, trim_span};
use super::{ChunkGrouper, FixedChunker, OversizedSentenceSplitter, SentenceExtractor};

const LARGE_DOCUMENT_CHARS: usize = 100_000;
const FALLBACK_OVERLAP: usize = 50;

static NAIVE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+\s+").expect("boundary pattern is valid"));

/// Sentence-aware chunking: extract sentences, split oversized ones, group
/// them into overlapping chunks.
///
/// When no sentences are found the text is split naively on terminators,
/// and if that yields nothing either, into fixed character windows.
pub struct SemanticChunker {
    extractor: SentenceExtractor,
    splitter: OversizedSentenceSplitter,
    grouper: ChunkGrouper,
    target_chunk_size: usize,
}

impl SemanticChunker {
    pub fn new(config: &ChunkingConfig) -> Self {
        Self::with_extractor(config, SentenceExtractor::from_config(config))
    }

    pub fn with_extractor(config: &ChunkingConfig, extractor: SentenceExtractor) -> Self {
        Self {
            extractor,
            splitter: OversizedSentenceSplitter::new(config.max_chunk_size()),
            grouper: ChunkGrouper::from_config(config),
            target_chunk_size: config.target_chunk_size(),
        }
    }

    /// Resolves the sentence backend ahead of the first call to [`chunk`](Self::chunk).
    pub async fn initialize(&self) -> Result<ResolvedBackend, ChunkingError> {
        self.extractor.initialize().await
    }

    pub fn backend_used(&self) -> Option<ResolvedBackend> {
        self.extractor.backend_used()
    }

    /// Chunks `text`. Fails only when an explicitly requested sentence
    /// backend cannot be initialized.
    pub fn chunk(&self, text: &str) -> Result<Vec<Chunk>, ChunkingError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let backend = self.extractor.initialize_blocking()?;

        let text_chars = text.chars().count();
        if text_chars > LARGE_DOCUMENT_CHARS {
            tracing::info!(
                chars = text_chars,
                backend = %backend,
                "Chunking large document, this may take a moment"
            );
        }

        let started = Instant::now();
        let sentences = self.extractor.extract(text);

        let chunks = if sentences.is_empty() {
            tracing::warn!(
                backend = %backend,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "No sentences detected, using fallback chunking"
            );
            self.fallback_chunks(text)
        } else {
            let sentences = self.splitter.split(sentences);
            self.grouper.group(&sentences)
        };

        tracing::debug!(
            backend = %backend,
            chunks = chunks.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Semantic chunking complete"
        );

        Ok(chunks)
    }

    fn fallback_chunks(&self, text: &str) -> Vec<Chunk> {
        let pieces = naive_sentences(text);
        if !pieces.is_empty() {
            return self.grouper.group(&pieces);
        }

        let overlap = FALLBACK_OVERLAP.min(self.target_chunk_size / 2);
        FixedChunker::unchecked(self.target_chunk_size, overlap)
            .windows(text)
            .into_iter()
            .map(|(start, window)| {
                let end = start + window.chars().count();
                Chunk::from_sentences(&[Sentence::new(window, start, end)])
            })
            .collect()
    }
}

impl Chunker for SemanticChunker {
    fn strategy(&self) -> ChunkingStrategyKind {
        ChunkingStrategyKind::Semantic
    }

    fn chunk_text(&self, text: &str) -> Result<Vec<String>, ChunkingError> {
        Ok(self.chunk(text)?.into_iter().map(|c| c.text).collect())
    }
}

/// Splits on runs of terminators followed by whitespace. The terminators
/// themselves are dropped.
fn naive_sentences(text: &str) -> Vec<Sentence> {
    let mut spans = Vec::new();
    let mut start = 0;

    for m in NAIVE_BOUNDARY.find_iter(text) {
        spans.push(trim_span(text, start, m.start()));
        start = m.end();
    }
    spans.push(trim_span(text, start, text.len()));

    let mut offsets = CharOffsets::new(text);
    spans
        .into_iter()
        .filter(|(start, end)| end > start)
        .map(|(start, end)| {
            Sentence::new(&text[start..end], offsets.char_at(start), offsets.char_at(end))
        })
        .collect()
}
