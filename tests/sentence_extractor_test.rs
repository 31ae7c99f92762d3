use std::io::Write;
use std::task::Poll;

use chunkwise::application::ports::{Segmentation, SentenceTokenizer, TokenizerError};
use chunkwise::domain::{ChunkingError, ResolvedBackend, SentenceBackend};
use chunkwise::infrastructure::text_processing::SentenceExtractor;

struct FailingTokenizer;

impl SentenceTokenizer for FailingTokenizer {
    fn backend(&self) -> ResolvedBackend {
        ResolvedBackend::Segmenter
    }

    fn tokenize(&self, _text: &str) -> Result<Segmentation, TokenizerError> {
        Err(model_crashed())
    }
}

fn model_crashed() -> TokenizerError {
    TokenizerError::TokenizationFailed("model crashed".to_string())
}

/// Treats every batch as one sentence and refuses batches containing `!`.
struct WholeBatchTokenizer {
    limit: usize,
}

impl SentenceTokenizer for WholeBatchTokenizer {
    fn backend(&self) -> ResolvedBackend {
        ResolvedBackend::Punkt
    }

    fn batch_limit(&self) -> Option<usize> {
        Some(self.limit)
    }

    fn tokenize(&self, text: &str) -> Result<Segmentation, TokenizerError> {
        if text.contains('!') {
            return Err(model_crashed());
        }
        Ok(Segmentation::Spans(vec![0..text.len()]))
    }
}

fn punkt_parameters_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn given_regex_backend_when_extracting_then_returns_trimmed_sentences_with_offsets() {
    let extractor = SentenceExtractor::new(SentenceBackend::Regex, None);

    let sentences = extractor.extract("Hello world. How are you? Fine!");

    let spans: Vec<(&str, usize, usize)> = sentences
        .iter()
        .map(|s| (s.text.as_str(), s.start_char, s.end_char))
        .collect();
    assert_eq!(
        spans,
        vec![
            ("Hello world.", 0, 12),
            ("How are you?", 13, 25),
            ("Fine!", 26, 31),
        ]
    );
}

#[test]
fn given_regex_backend_when_match_is_a_lone_terminator_then_it_is_dropped() {
    let extractor = SentenceExtractor::new(SentenceBackend::Regex, None);

    let sentences = extractor.extract("Done. .");

    assert_eq!(sentences.len(), 1);
    assert_eq!(sentences[0].text, "Done.");
}

#[test]
fn given_multibyte_text_when_extracting_then_offsets_are_char_positions() {
    let extractor = SentenceExtractor::new(SentenceBackend::Regex, None);
    let text = "Ça commence. Voilà tout.";

    let sentences = extractor.extract(text);

    assert_eq!(sentences.len(), 2);
    for sentence in &sentences {
        let slice: String = text
            .chars()
            .skip(sentence.start_char)
            .take(sentence.end_char - sentence.start_char)
            .collect();
        assert_eq!(slice, sentence.text);
    }
}

#[tokio::test]
async fn given_auto_mode_when_initializing_then_resolves_segmenter() {
    let extractor = SentenceExtractor::new(SentenceBackend::Auto, None);

    let backend = extractor.initialize().await.unwrap();

    assert_eq!(backend, ResolvedBackend::Segmenter);
    assert_eq!(extractor.backend_used(), Some(ResolvedBackend::Segmenter));
}

#[test]
fn given_uninitialized_extractor_when_extracting_then_resolves_on_first_use() {
    let extractor = SentenceExtractor::new(SentenceBackend::Regex, None);
    assert_eq!(extractor.backend_used(), None);

    extractor.extract("One sentence here.");

    assert_eq!(extractor.backend_used(), Some(ResolvedBackend::Regex));
}

#[tokio::test]
async fn given_explicit_punkt_without_parameters_when_initializing_then_fails_every_time() {
    let extractor = SentenceExtractor::new(SentenceBackend::Punkt, None);

    let first = extractor.initialize().await;
    let second = extractor.initialize().await;

    assert!(matches!(
        first,
        Err(ChunkingError::BackendUnavailable {
            backend: ResolvedBackend::Punkt,
            ..
        })
    ));
    assert_eq!(first, second);
    assert_eq!(extractor.backend_used(), None);
}

#[test]
fn given_unavailable_explicit_backend_when_extracting_then_returns_no_sentences() {
    let extractor = SentenceExtractor::new(SentenceBackend::Punkt, None);

    let sentences = extractor.extract("This would otherwise split. Into two.");

    assert!(sentences.is_empty());
}

#[tokio::test]
async fn given_punkt_parameters_file_when_initializing_then_uses_punkt() {
    let file = punkt_parameters_file(r#"{"abbreviations": ["dr"], "sentence_starters": ["the"]}"#);
    let extractor =
        SentenceExtractor::new(SentenceBackend::Punkt, Some(file.path().to_path_buf()));

    let backend = extractor.initialize().await.unwrap();
    let sentences = extractor.extract("Dr. Smith arrived. The meeting began.");

    assert_eq!(backend, ResolvedBackend::Punkt);
    let spans: Vec<(&str, usize, usize)> = sentences
        .iter()
        .map(|s| (s.text.as_str(), s.start_char, s.end_char))
        .collect();
    assert_eq!(
        spans,
        vec![("Dr. Smith arrived.", 0, 18), ("The meeting began.", 19, 37)]
    );
}

#[tokio::test]
async fn given_malformed_punkt_parameters_when_initializing_then_backend_is_unavailable() {
    let file = punkt_parameters_file("not json");
    let extractor =
        SentenceExtractor::new(SentenceBackend::Punkt, Some(file.path().to_path_buf()));

    let result = extractor.initialize().await;

    assert!(matches!(
        result,
        Err(ChunkingError::BackendUnavailable {
            backend: ResolvedBackend::Punkt,
            ..
        })
    ));
}

#[test]
fn given_failing_tokenizer_when_extracting_then_falls_back_to_regex() {
    let extractor = SentenceExtractor::with_tokenizer(Box::new(FailingTokenizer));

    let sentences = extractor.extract("First part here. Second part here.");

    let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["First part here.", "Second part here."]);
    assert_eq!(extractor.backend_used(), Some(ResolvedBackend::Segmenter));
}

#[test]
fn given_batched_tokenizer_when_extracting_then_offsets_are_rebased_per_batch() {
    let extractor = SentenceExtractor::with_tokenizer(Box::new(WholeBatchTokenizer { limit: 20 }));
    let text = "a".repeat(50);

    let sentences = extractor.extract(&text);

    let spans: Vec<(usize, usize)> = sentences
        .iter()
        .map(|s| (s.start_char, s.end_char))
        .collect();
    assert_eq!(spans, vec![(0, 20), (20, 40), (40, 50)]);
}

#[test]
fn given_one_failing_batch_when_extracting_then_only_that_batch_uses_regex() {
    let extractor = SentenceExtractor::with_tokenizer(Box::new(WholeBatchTokenizer { limit: 20 }));
    let first = "b".repeat(20);
    let last = "c".repeat(20);
    let text = format!("{}Go now! Stop it now.{}", first, last);

    let sentences = extractor.extract(&text);

    let texts: Vec<String> = sentences.iter().map(|s| s.text.clone()).collect();
    assert_eq!(
        texts,
        vec![first, "Go now!".to_string(), "Stop it now.".to_string(), last]
    );
    assert_eq!(sentences[1].start_char, 20);
    assert_eq!(sentences[2].start_char, 28);
}

#[tokio::test]
async fn given_async_initialize_in_flight_when_extracting_then_resolves_on_calling_thread() {
    let file = punkt_parameters_file(r#"{"abbreviations": ["dr"], "sentence_starters": ["the"]}"#);
    let extractor =
        SentenceExtractor::new(SentenceBackend::Punkt, Some(file.path().to_path_buf()));
    let mut in_flight = Box::pin(extractor.initialize());
    let _ = std::future::poll_fn(|cx| Poll::Ready(in_flight.as_mut().poll(cx))).await;

    let backend = extractor.initialize_blocking();
    let sentences = extractor.extract("Dr. Smith arrived. The meeting began.");

    assert_eq!(backend, Ok(ResolvedBackend::Punkt));
    let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["Dr. Smith arrived.", "The meeting began."]);
}
