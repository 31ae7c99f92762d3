use crate::domain::{ChunkingConfig, ChunkingError, PageChunk, ResolvedBackend};

use super::SemanticChunker;

const PAGE_SEPARATOR: &str = "\n\n";

struct PageSpan {
    page: u32,
    start_char: usize,
}

/// Semantic chunking over paged documents, tagging each chunk with the
/// first and last page its text came from.
pub struct PageAwareChunker {
    chunker: SemanticChunker,
}

impl PageAwareChunker {
    pub fn new(config: &ChunkingConfig) -> Self {
        Self::with_chunker(SemanticChunker::new(config))
    }

    pub fn with_chunker(chunker: SemanticChunker) -> Self {
        Self { chunker }
    }

    pub async fn initialize(&self) -> Result<ResolvedBackend, ChunkingError> {
        self.chunker.initialize().await
    }

    /// Chunks `(page_number, page_text)` pairs. Pages are joined with a blank
    /// line; blank pages are skipped.
    pub fn chunk_pages(&self, pages: &[(u32, String)]) -> Result<Vec<PageChunk>, ChunkingError> {
        let mut combined = String::new();
        let mut combined_chars = 0;
        let mut spans = Vec::new();

        for (page, text) in pages {
            if text.trim().is_empty() {
                continue;
            }
            if !combined.is_empty() {
                combined.push_str(PAGE_SEPARATOR);
                combined_chars += PAGE_SEPARATOR.chars().count();
            }
            spans.push(PageSpan {
                page: *page,
                start_char: combined_chars,
            });
            combined.push_str(text);
            combined_chars += text.chars().count();
        }

        if spans.is_empty() {
            return Ok(Vec::new());
        }

        let chunks = self.chunker.chunk(&combined)?;

        tracing::debug!(
            pages = spans.len(),
            chunks = chunks.len(),
            "Page-aware chunking complete"
        );

        Ok(chunks
            .into_iter()
            .map(|chunk| {
                let last_char = chunk.end_char.saturating_sub(1).max(chunk.start_char);
                PageChunk {
                    page_start: page_at(&spans, chunk.start_char),
                    page_end: page_at(&spans, last_char),
                    chunk,
                }
            })
            .collect())
    }
}

/// Page containing the char at `position`; separator chars belong to the page before.
fn page_at(spans: &[PageSpan], position: usize) -> u32 {
    let idx = spans
        .partition_point(|span| span.start_char <= position)
        .saturating_sub(1);
    spans.get(idx).map(|span| span.page).unwrap_or_default()
}
