use crate::domain::{Chunk, ChunkingConfig, Sentence};

/// Groups sentences into chunks with a greedy sliding window.
///
/// A chunk is closed when the next sentence would push it past
/// `max_chunk_size` (once it holds at least `min_chunk_size` chars) or as
/// soon as it reaches `target_chunk_size`. The last `overlap_sentences`
/// sentences of a closed chunk open the next one. Sizes are char counts of
/// the sentences, not counting joining spaces, so a chunk's text can run past
/// `max_chunk_size` by up to `sentence_count - 1` chars.
///
/// After the scan, whatever the window still holds becomes the final chunk,
/// carried-over overlap included. A final chunk shorter than `min_chunk_size`
/// is merged into the previous one. A `min_chunk_size` of zero is treated as
/// one.
#[derive(Debug, Clone)]
pub struct ChunkGrouper {
    min_chunk_size: usize,
    max_chunk_size: usize,
    target_chunk_size: usize,
    overlap_sentences: usize,
}

struct Window {
    sentences: Vec<Sentence>,
    size: usize,
    // Sentences appended since the last flush, as opposed to carried-over overlap.
    fresh: usize,
}

impl Window {
    fn new() -> Self {
        Self {
            sentences: Vec::new(),
            size: 0,
            fresh: 0,
        }
    }

    fn push(&mut self, sentence: Sentence, len: usize) {
        self.sentences.push(sentence);
        self.size += len;
        self.fresh += 1;
    }

    fn reset(&mut self) {
        self.sentences.clear();
        self.size = 0;
        self.fresh = 0;
    }

    /// Keeps only the trailing `count` sentences.
    fn retain_tail(&mut self, count: usize) {
        let keep = count.min(self.sentences.len());
        self.sentences.drain(..self.sentences.len() - keep);
        self.size = self.sentences.iter().map(Sentence::len).sum();
        self.fresh = 0;
    }
}

impl ChunkGrouper {
    pub fn new(
        min_chunk_size: usize,
        max_chunk_size: usize,
        target_chunk_size: usize,
        overlap_sentences: usize,
    ) -> Self {
        Self {
            min_chunk_size: min_chunk_size.max(1),
            max_chunk_size,
            target_chunk_size,
            overlap_sentences,
        }
    }

    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::new(
            config.min_chunk_size(),
            config.max_chunk_size(),
            config.target_chunk_size(),
            config.overlap_sentences(),
        )
    }

    pub fn group(&self, sentences: &[Sentence]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut window = Window::new();
        let mut i = 0;

        while i < sentences.len() {
            let sentence = &sentences[i];
            let len = sentence.len();

            if !window.sentences.is_empty()
                && window.size + len > self.max_chunk_size
                && window.size >= self.min_chunk_size
            {
                // A window of carried-over overlap only is not flushed twice.
                if window.fresh > 0 {
                    chunks.push(Chunk::from_sentences(&window.sentences));
                    window.retain_tail(self.overlap_sentences);
                }

                // Overlap plus the pending sentence still too big: emit the overlap alone.
                if window.size + len > self.max_chunk_size && !window.sentences.is_empty() {
                    chunks.push(Chunk::from_sentences(&window.sentences));
                    window.reset();
                }
                continue;
            }

            window.push(sentence.clone(), len);
            i += 1;

            if window.size >= self.target_chunk_size {
                chunks.push(Chunk::from_sentences(&window.sentences));
                window.retain_tail(self.overlap_sentences);
            }
        }

        if !window.sentences.is_empty() {
            let tail = Chunk::from_sentences(&window.sentences);
            match chunks.pop() {
                Some(previous) if tail.len() < self.min_chunk_size => {
                    chunks.push(previous.merge(tail));
                }
                Some(previous) => {
                    chunks.push(previous);
                    chunks.push(tail);
                }
                None => chunks.push(tail),
            }
        }

        tracing::debug!(
            sentences = sentences.len(),
            chunks = chunks.len(),
            "Grouped sentences into chunks"
        );

        chunks
    }
}
