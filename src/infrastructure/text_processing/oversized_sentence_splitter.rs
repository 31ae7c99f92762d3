use crate::domain::Sentence;

use super::char_offsets::{CharOffsets, trim_span};

/// Sub-sentence separators, strongest first.
const SEPARATORS: [char; 3] = [';', ':', ','];

/// Breaks sentences longer than `max_chunk_size` chars into smaller pieces.
///
/// The first separator present (semicolon, colon, comma) is used for the
/// whole sentence; pieces still over the limit, and sentences with no
/// separator, are packed into word groups. A single word longer than the
/// limit is emitted as-is.
#[derive(Debug, Clone)]
pub struct OversizedSentenceSplitter {
    max_chunk_size: usize,
    words_per_group: usize,
}

impl OversizedSentenceSplitter {
    pub fn new(max_chunk_size: usize) -> Self {
        Self {
            max_chunk_size,
            words_per_group: (max_chunk_size / 10).max(1),
        }
    }

    pub fn with_words_per_group(mut self, words_per_group: usize) -> Self {
        self.words_per_group = words_per_group.max(1);
        self
    }

    pub fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    pub fn split(&self, sentences: Vec<Sentence>) -> Vec<Sentence> {
        let mut result = Vec::with_capacity(sentences.len());
        let mut split_count = 0;

        for sentence in sentences {
            if sentence.len() <= self.max_chunk_size {
                result.push(sentence);
                continue;
            }

            split_count += 1;
            result.extend(self.split_sentence(&sentence));
        }

        if split_count > 0 {
            tracing::debug!(
                split_count,
                total_sentences = result.len(),
                max_chunk_size = self.max_chunk_size,
                "Split oversized sentences"
            );
        }

        result
    }

    fn split_sentence(&self, sentence: &Sentence) -> Vec<Sentence> {
        let text = sentence.text.as_str();
        let mut offsets = CharOffsets::new(text);
        let mut parts = Vec::new();

        let Some(separator) = SEPARATORS.into_iter().find(|sep| text.contains(*sep)) else {
            self.push_word_groups(sentence, &mut offsets, 0, text.len(), &mut parts);
            return parts;
        };

        let pieces: Vec<&str> = text.split(separator).collect();
        let last = pieces.len() - 1;
        let mut piece_start = 0;

        for (i, piece) in pieces.iter().enumerate() {
            let piece_end = piece_start + piece.len();
            let (start, end) = trim_span(text, piece_start, piece_end);

            if end > start {
                let attach = i < last;
                let len = text[start..end].chars().count() + usize::from(attach);

                if len > self.max_chunk_size {
                    self.push_word_groups(sentence, &mut offsets, start, end, &mut parts);
                    match parts.last_mut() {
                        Some(group) if attach => {
                            group.text.push(separator);
                            group.end_char = sentence.start_char
                                + offsets.char_at(piece_end + separator.len_utf8());
                        }
                        _ => {}
                    }
                } else {
                    let mut part = text[start..end].to_string();
                    let mut part_end = end;
                    if attach {
                        part.push(separator);
                        part_end = piece_end + separator.len_utf8();
                    }
                    parts.push(Sentence::new(
                        part,
                        sentence.start_char + offsets.char_at(start),
                        sentence.start_char + offsets.char_at(part_end),
                    ));
                }
            }

            piece_start = piece_end + separator.len_utf8();
        }

        parts
    }

    /// Packs the words of `text[start..end]` into groups of at most
    /// `words_per_group` words and `max_chunk_size` chars.
    fn push_word_groups(
        &self,
        sentence: &Sentence,
        offsets: &mut CharOffsets<'_>,
        start: usize,
        end: usize,
        parts: &mut Vec<Sentence>,
    ) {
        let text = sentence.text.as_str();
        let mut group: Vec<(usize, usize)> = Vec::new();
        let mut group_len = 0;

        for (word_start, word_end) in word_spans(text, start, end) {
            let word_len = text[word_start..word_end].chars().count();
            let joined_len = group_len + usize::from(!group.is_empty()) + word_len;

            if !group.is_empty()
                && (group.len() >= self.words_per_group || joined_len > self.max_chunk_size)
            {
                parts.push(self.group_sentence(sentence, offsets, &group));
                group.clear();
                group_len = 0;
            }

            group_len += usize::from(!group.is_empty()) + word_len;
            group.push((word_start, word_end));
        }

        if !group.is_empty() {
            parts.push(self.group_sentence(sentence, offsets, &group));
        }
    }

    fn group_sentence(
        &self,
        sentence: &Sentence,
        offsets: &mut CharOffsets<'_>,
        group: &[(usize, usize)],
    ) -> Sentence {
        let text = sentence.text.as_str();
        let joined = group
            .iter()
            .map(|(s, e)| &text[*s..*e])
            .collect::<Vec<_>>()
            .join(" ");
        let first = group.first().map(|(s, _)| *s).unwrap_or(0);
        let last = group.last().map(|(_, e)| *e).unwrap_or(first);

        Sentence::new(
            joined,
            sentence.start_char + offsets.char_at(first),
            sentence.start_char + offsets.char_at(last),
        )
    }
}

/// Byte spans of the whitespace-separated words within `text[start..end]`.
fn word_spans(text: &str, start: usize, end: usize) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut word_start = None;

    for (i, c) in text[start..end].char_indices() {
        match (c.is_whitespace(), word_start) {
            (true, Some(ws)) => {
                spans.push((start + ws, start + i));
                word_start = None;
            }
            (false, None) => word_start = Some(i),
            _ => {}
        }
    }

    if let Some(ws) = word_start {
        spans.push((start + ws, end));
    }

    spans
}
