use chunkwise::application::ports::Chunker;
use chunkwise::domain::{ChunkingError, ChunkingStrategyKind};
use chunkwise::infrastructure::text_processing::FixedChunker;

const CHUNK_SIZE: usize = 500;
const OVERLAP: usize = 50;

fn sample_text(len: usize) -> String {
    "abcdefghij".chars().cycle().take(len).collect()
}

#[test]
fn given_1000_chars_when_chunking_then_creates_three_windows_at_stride_offsets() {
    let chunker = FixedChunker::new(CHUNK_SIZE, OVERLAP).unwrap();
    let text = sample_text(1000);

    let windows = chunker.windows(&text);

    let starts: Vec<usize> = windows.iter().map(|(start, _)| *start).collect();
    let lengths: Vec<usize> = windows.iter().map(|(_, w)| w.chars().count()).collect();
    assert_eq!(starts, vec![0, 450, 900]);
    assert_eq!(lengths, vec![500, 500, 100]);
}

#[test]
fn given_empty_text_when_chunking_then_returns_no_chunks() {
    let chunker = FixedChunker::new(CHUNK_SIZE, OVERLAP).unwrap();

    assert!(chunker.chunk("").is_empty());
    assert!(chunker.chunk_text("").unwrap().is_empty());
}

#[test]
fn given_consecutive_windows_when_chunking_then_they_share_overlap_chars() {
    let chunker = FixedChunker::new(100, 20).unwrap();
    let text = sample_text(250);

    let chunks = chunker.chunk(&text);

    for pair in chunks.windows(2) {
        let tail: String = pair[0].chars().skip(80).collect();
        assert!(pair[1].starts_with(&tail));
    }
}

#[test]
fn given_whitespace_window_when_chunking_then_window_is_skipped() {
    let chunker = FixedChunker::new(10, 2).unwrap();
    let text = format!("a{}b", " ".repeat(20));

    let windows = chunker.windows(&text);

    let starts: Vec<usize> = windows.iter().map(|(start, _)| *start).collect();
    assert_eq!(starts, vec![0, 16]);
    assert!(windows.iter().all(|(_, w)| !w.trim().is_empty()));
}

#[test]
fn given_multibyte_text_when_chunking_then_windows_are_measured_in_chars() {
    let chunker = FixedChunker::new(10, 2).unwrap();
    let text = "é".repeat(30);

    let lengths: Vec<usize> = chunker
        .chunk(&text)
        .iter()
        .map(|c| c.chars().count())
        .collect();

    assert_eq!(lengths, vec![10, 10, 10, 6]);
}

#[test]
fn given_overlap_equal_to_chunk_size_when_creating_then_rejects_configuration() {
    let result = FixedChunker::new(100, 100);

    assert!(matches!(result, Err(ChunkingError::ConfigurationInvalid(_))));
}

#[test]
fn given_zero_overlap_when_creating_then_rejects_configuration() {
    let result = FixedChunker::new(100, 0);

    assert!(matches!(result, Err(ChunkingError::ConfigurationInvalid(_))));
}

#[test]
fn given_fixed_chunker_when_asked_for_strategy_then_reports_fixed() {
    let chunker = FixedChunker::new(CHUNK_SIZE, OVERLAP).unwrap();

    assert_eq!(chunker.strategy(), ChunkingStrategyKind::Fixed);
    assert_eq!(chunker.chunk_size(), CHUNK_SIZE);
    assert_eq!(chunker.overlap(), OVERLAP);
}
