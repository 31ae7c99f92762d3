use serde::Serialize;

/// A bounded span of source text produced by chunking.
///
/// Offsets are char offsets into the text that was chunked. A chunk with no
/// sentences is always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub text: String,
    pub start_char: usize,
    pub end_char: usize,
    pub sentence_count: usize,
}

impl Chunk {
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            start_char: 0,
            end_char: 0,
            sentence_count: 0,
        }
    }

    /// Joins sentences with a single space, spanning the first start to the last end.
    pub fn from_sentences(sentences: &[Sentence]) -> Self {
        let (Some(first), Some(last)) = (sentences.first(), sentences.last()) else {
            return Self::empty();
        };

        let text = sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            text,
            start_char: first.start_char,
            end_char: last.end_char.max(first.start_char),
            sentence_count: sentences.len(),
        }
    }

    /// Appends `other` after a single space, extending the span and sentence count.
    pub fn merge(self, other: Chunk) -> Self {
        let text = if self.text.is_empty() {
            other.text
        } else if other.text.is_empty() {
            self.text
        } else {
            format!("{} {}", self.text, other.text)
        };

        Self {
            text,
            start_char: self.start_char,
            end_char: other.end_char.max(self.end_char),
            sentence_count: self.sentence_count + other.sentence_count,
        }
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A sentence with its char span in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
    pub start_char: usize,
    pub end_char: usize,
}

impl Sentence {
    pub fn new(text: impl Into<String>, start_char: usize, end_char: usize) -> Self {
        Self {
            text: text.into(),
            start_char,
            end_char,
        }
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A chunk annotated with the source pages it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageChunk {
    pub chunk: Chunk,
    pub page_start: u32,
    pub page_end: u32,
}

impl PageChunk {
    pub fn spans_pages(&self) -> bool {
        self.page_end > self.page_start
    }
}
