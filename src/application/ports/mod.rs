mod chunker;
mod search_result;
mod sentence_tokenizer;

pub use chunker::Chunker;
pub use search_result::ScoredPassage;
pub use sentence_tokenizer::{Segmentation, SentenceTokenizer, TokenizerError};
