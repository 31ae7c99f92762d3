use crate::application::ports::Chunker;
use crate::domain::{ChunkingConfig, ChunkingError, ChunkingStrategyKind};

/// Character-window chunking with a fixed overlap. Not sentence aware.
///
/// Window `i` covers chars `[i * (chunk_size - overlap), i * (chunk_size - overlap) + chunk_size)`,
/// clipped to the text. Whitespace-only windows are skipped.
#[derive(Debug, Clone)]
pub struct FixedChunker {
    chunk_size: usize,
    overlap: usize,
}

impl FixedChunker {
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, ChunkingError> {
        let config = ChunkingConfig::builder()
            .chunk_size(chunk_size)
            .overlap(overlap)
            .build()?;
        Ok(Self::from_config(&config))
    }

    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self {
            chunk_size: config.chunk_size(),
            overlap: config.overlap(),
        }
    }

    /// Skips validation; the stride is still kept positive.
    pub(crate) fn unchecked(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            overlap,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    fn stride(&self) -> usize {
        self.chunk_size.saturating_sub(self.overlap).max(1)
    }

    /// Windows as `(start_char, text)` pairs.
    pub fn windows(&self, text: &str) -> Vec<(usize, String)> {
        let chars: Vec<char> = text.chars().collect();
        let total_len = chars.len();
        let mut windows = Vec::new();

        let mut offset = 0;
        while offset < total_len {
            let end = (offset + self.chunk_size).min(total_len);
            let window = &chars[offset..end];

            if window.iter().any(|c| !c.is_whitespace()) {
                windows.push((offset, window.iter().collect()));
            }

            offset += self.stride();
        }

        windows
    }

    pub fn chunk(&self, text: &str) -> Vec<String> {
        self.windows(text)
            .into_iter()
            .map(|(_, window)| window)
            .collect()
    }
}

impl Chunker for FixedChunker {
    fn strategy(&self) -> ChunkingStrategyKind {
        ChunkingStrategyKind::Fixed
    }

    fn chunk_text(&self, text: &str) -> Result<Vec<String>, ChunkingError> {
        let chunks = self.chunk(text);
        tracing::debug!(
            chunks = chunks.len(),
            chunk_size = self.chunk_size,
            overlap = self.overlap,
            "Fixed chunking complete"
        );
        Ok(chunks)
    }
}
