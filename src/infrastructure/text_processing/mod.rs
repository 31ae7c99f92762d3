mod char_offsets;
mod chunk_grouper;
mod chunker_factory;
mod fixed_chunker;
mod oversized_sentence_splitter;
mod page_aware_chunker;
mod punkt_tokenizer;
mod regex_tokenizer;
mod segmenter_tokenizer;
mod semantic_chunker;
mod sentence_extractor;

pub use chunk_grouper::ChunkGrouper;
pub use chunker_factory::ChunkerFactory;
pub use fixed_chunker::FixedChunker;
pub use oversized_sentence_splitter::OversizedSentenceSplitter;
pub use page_aware_chunker::PageAwareChunker;
pub use punkt_tokenizer::{PUNKT_BATCH_CHARS, PunktParameters, PunktTokenizer};
pub use regex_tokenizer::RegexTokenizer;
pub use segmenter_tokenizer::SegmenterTokenizer;
pub use semantic_chunker::SemanticChunker;
pub use sentence_extractor::{BackendState, SentenceExtractor};
