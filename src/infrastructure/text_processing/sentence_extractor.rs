use std::ops::Range;
use std::path::PathBuf;
use std::time::Instant;

use tokio::sync::{OnceCell, SetError};

use crate::application::ports::{Segmentation, SentenceTokenizer, TokenizerError};
use crate::domain::{ChunkingConfig, ChunkingError, ResolvedBackend, Sentence, SentenceBackend};

use super::char_offsets::{CharOffsets, byte_index_of_char, trim_span};
use super::{PunktTokenizer, RegexTokenizer, SegmenterTokenizer};

/// The tokenizer a chunker settled on, memoized for the chunker's lifetime.
pub struct BackendState {
    resolved: ResolvedBackend,
    tokenizer: Box<dyn SentenceTokenizer>,
}

impl BackendState {
    fn new(tokenizer: Box<dyn SentenceTokenizer>) -> Self {
        Self {
            resolved: tokenizer.backend(),
            tokenizer,
        }
    }

    pub fn resolved(&self) -> ResolvedBackend {
        self.resolved
    }
}

/// Turns text into ordered sentences with char offsets.
///
/// Construction is cheap. The backend is resolved once, either explicitly
/// through [`initialize`](Self::initialize) or on the first extraction, and
/// the outcome (including a failure of an explicitly requested backend) is
/// kept for the lifetime of the extractor.
pub struct SentenceExtractor {
    mode: SentenceBackend,
    punkt_parameters: Option<PathBuf>,
    state: OnceCell<Result<BackendState, ChunkingError>>,
    regex: RegexTokenizer,
}

impl SentenceExtractor {
    pub fn new(mode: SentenceBackend, punkt_parameters: Option<PathBuf>) -> Self {
        Self {
            mode,
            punkt_parameters,
            state: OnceCell::new(),
            regex: RegexTokenizer::new(),
        }
    }

    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self::new(
            config.backend(),
            config.punkt_parameters().map(|p| p.to_path_buf()),
        )
    }

    /// Uses `tokenizer` as the already-resolved backend.
    pub fn with_tokenizer(tokenizer: Box<dyn SentenceTokenizer>) -> Self {
        let mode = match tokenizer.backend() {
            ResolvedBackend::Segmenter => SentenceBackend::Segmenter,
            ResolvedBackend::Punkt => SentenceBackend::Punkt,
            ResolvedBackend::Regex => SentenceBackend::Regex,
        };

        Self {
            mode,
            punkt_parameters: None,
            state: OnceCell::new_with(Some(Ok(BackendState::new(tokenizer)))),
            regex: RegexTokenizer::new(),
        }
    }

    pub fn mode(&self) -> SentenceBackend {
        self.mode
    }

    /// The resolved backend, if resolution already happened and succeeded.
    pub fn backend_used(&self) -> Option<ResolvedBackend> {
        match self.state.get() {
            Some(Ok(state)) => Some(state.resolved()),
            _ => None,
        }
    }

    /// Resolves the backend, reading tokenizer data without blocking the runtime.
    ///
    /// Safe to cancel: if the future is dropped before it completes, nothing
    /// is memoized and a later call starts over.
    pub async fn initialize(&self) -> Result<ResolvedBackend, ChunkingError> {
        let state = self
            .state
            .get_or_init(|| async {
                let punkt = if self.needs_punkt() {
                    Some(self.load_punkt_async().await)
                } else {
                    None
                };
                self.select(punkt)
            })
            .await;

        resolved_of(state)
    }

    /// Resolves the backend on the calling thread.
    ///
    /// While an [`initialize`](Self::initialize) call is still in flight on
    /// the same extractor, the backend resolved here serves this call and is
    /// not memoized.
    pub fn initialize_blocking(&self) -> Result<ResolvedBackend, ChunkingError> {
        self.with_state(resolved_of)
    }

    /// Extracts sentences. Returns an empty list when nothing could be
    /// extracted, including when the backend failed to resolve.
    pub fn extract(&self, text: &str) -> Vec<Sentence> {
        self.with_state(|state| match state {
            Ok(state) => self.extract_with(state, text),
            Err(e) => {
                tracing::warn!(error = %e, "Sentence detection unavailable");
                Vec::new()
            }
        })
    }

    fn with_state<R>(
        &self,
        use_state: impl FnOnce(&Result<BackendState, ChunkingError>) -> R,
    ) -> R {
        if let Some(state) = self.state.get() {
            return use_state(state);
        }

        let punkt = if self.needs_punkt() {
            Some(self.load_punkt_blocking())
        } else {
            None
        };

        let local = match self.state.set(self.select(punkt)) {
            Ok(()) => None,
            Err(SetError::AlreadyInitializedError(state) | SetError::InitializingError(state)) => {
                Some(state)
            }
        };

        match (self.state.get(), local) {
            (Some(state), _) => use_state(state),
            (None, Some(state)) => use_state(&state),
            (None, None) => use_state(&Err(ChunkingError::ResolutionIncomplete)),
        }
    }

    fn extract_with(&self, state: &BackendState, text: &str) -> Vec<Sentence> {
        let started = Instant::now();
        let spans = self.extract_spans(state.tokenizer.as_ref(), text);

        let mut offsets = CharOffsets::new(text);
        let sentences: Vec<Sentence> = spans
            .into_iter()
            .map(|span| {
                Sentence::new(
                    &text[span.clone()],
                    offsets.char_at(span.start),
                    offsets.char_at(span.end),
                )
            })
            .collect();

        tracing::debug!(
            backend = %state.resolved(),
            sentences = sentences.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Sentences extracted"
        );

        sentences
    }

    fn extract_spans(&self, tokenizer: &dyn SentenceTokenizer, text: &str) -> Vec<Range<usize>> {
        let Some(limit) = tokenizer.batch_limit().filter(|limit| *limit > 0) else {
            return self.tokenize_batch(tokenizer, text, 0);
        };

        if text.chars().nth(limit).is_none() {
            return self.tokenize_batch(tokenizer, text, 0);
        }

        let mut spans = Vec::new();
        let mut start = 0;
        let mut batches = 0;

        while start < text.len() {
            let end = start + byte_index_of_char(&text[start..], limit);
            batches += 1;
            tracing::debug!(
                batch = batches,
                batch_bytes = end - start,
                backend = %tokenizer.backend(),
                "Tokenizing batch"
            );
            spans.extend(self.tokenize_batch(tokenizer, &text[start..end], start));
            start = end;
        }

        spans
    }

    fn tokenize_batch(
        &self,
        tokenizer: &dyn SentenceTokenizer,
        batch: &str,
        offset: usize,
    ) -> Vec<Range<usize>> {
        let spans = match tokenizer.tokenize(batch) {
            Ok(Segmentation::Spans(spans)) => spans
                .into_iter()
                .filter(|span| is_valid_span(batch, span))
                .map(|span| trim_span(batch, span.start, span.end))
                .filter(|(start, end)| end > start)
                .map(|(start, end)| start..end)
                .collect(),
            Ok(Segmentation::Texts(sentences)) => locate_sentences(batch, &sentences),
            Err(e) => {
                tracing::warn!(
                    backend = %tokenizer.backend(),
                    error = %e,
                    batch_bytes = batch.len(),
                    "Sentence tokenization failed, using regex fallback"
                );
                self.regex.spans(batch)
            }
        };

        spans
            .into_iter()
            .map(|span| span.start + offset..span.end + offset)
            .collect()
    }

    fn needs_punkt(&self) -> bool {
        match self.mode {
            SentenceBackend::Punkt => true,
            SentenceBackend::Auto => SegmenterTokenizer::load().is_err(),
            SentenceBackend::Segmenter | SentenceBackend::Regex => false,
        }
    }

    fn load_punkt_blocking(&self) -> Result<PunktTokenizer, TokenizerError> {
        match &self.punkt_parameters {
            Some(path) => PunktTokenizer::from_file(path),
            None => Err(no_punkt_parameters()),
        }
    }

    async fn load_punkt_async(&self) -> Result<PunktTokenizer, TokenizerError> {
        match &self.punkt_parameters {
            Some(path) => PunktTokenizer::from_file_async(path).await,
            None => Err(no_punkt_parameters()),
        }
    }

    fn select(
        &self,
        punkt: Option<Result<PunktTokenizer, TokenizerError>>,
    ) -> Result<BackendState, ChunkingError> {
        let state = match self.mode {
            SentenceBackend::Auto => self.select_auto(punkt),
            SentenceBackend::Segmenter => SegmenterTokenizer::load()
                .map(|t| BackendState::new(Box::new(t)))
                .map_err(|e| unavailable(ResolvedBackend::Segmenter, e)),
            SentenceBackend::Punkt => punkt
                .unwrap_or_else(|| Err(no_punkt_parameters()))
                .map(|t| BackendState::new(Box::new(t)))
                .map_err(|e| unavailable(ResolvedBackend::Punkt, e)),
            SentenceBackend::Regex => Ok(BackendState::new(Box::new(RegexTokenizer::new()))),
        };

        match &state {
            Ok(state) => tracing::info!(
                requested = %self.mode,
                backend = %state.resolved(),
                "Sentence backend resolved"
            ),
            Err(e) => tracing::error!(
                requested = %self.mode,
                error = %e,
                "Sentence backend unavailable"
            ),
        }

        state
    }

    fn select_auto(
        &self,
        punkt: Option<Result<PunktTokenizer, TokenizerError>>,
    ) -> Result<BackendState, ChunkingError> {
        match SegmenterTokenizer::load() {
            Ok(segmenter) => return Ok(BackendState::new(Box::new(segmenter))),
            Err(e) => tracing::debug!(error = %e, "Segmenter backend unavailable"),
        }

        match punkt {
            Some(Ok(punkt)) => return Ok(BackendState::new(Box::new(punkt))),
            Some(Err(e)) => tracing::debug!(error = %e, "Punkt backend unavailable"),
            None => {}
        }

        Ok(BackendState::new(Box::new(RegexTokenizer::new())))
    }
}

fn resolved_of(
    state: &Result<BackendState, ChunkingError>,
) -> Result<ResolvedBackend, ChunkingError> {
    state.as_ref().map(BackendState::resolved).map_err(Clone::clone)
}

fn unavailable(backend: ResolvedBackend, e: TokenizerError) -> ChunkingError {
    ChunkingError::BackendUnavailable {
        backend,
        reason: e.to_string(),
    }
}

fn no_punkt_parameters() -> TokenizerError {
    TokenizerError::ModelUnavailable("no punkt parameters file configured".to_string())
}

fn is_valid_span(text: &str, span: &Range<usize>) -> bool {
    span.start < span.end
        && span.end <= text.len()
        && text.is_char_boundary(span.start)
        && text.is_char_boundary(span.end)
}

/// Finds each sentence in order, scanning forward from the previous match.
/// Sentences that cannot be found are dropped.
fn locate_sentences(text: &str, sentences: &[String]) -> Vec<Range<usize>> {
    let mut spans = Vec::with_capacity(sentences.len());
    let mut cursor = 0;

    for sentence in sentences {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }

        match text[cursor..].find(sentence) {
            Some(pos) => {
                let start = cursor + pos;
                let end = start + sentence.len();
                spans.push(start..end);
                cursor = end;
            }
            None => tracing::debug!(
                sentence_bytes = sentence.len(),
                "Tokenized sentence not found in source, dropping"
            ),
        }
    }

    spans
}
