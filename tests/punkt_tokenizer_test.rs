use chunkwise::application::ports::{Segmentation, SentenceTokenizer, TokenizerError};
use chunkwise::domain::ResolvedBackend;
use chunkwise::infrastructure::text_processing::{
    PUNKT_BATCH_CHARS, PunktParameters, PunktTokenizer,
};

fn tokenizer(json: &str) -> PunktTokenizer {
    PunktTokenizer::new(PunktParameters::from_json(json).unwrap())
}

#[test]
fn given_known_abbreviation_when_tokenizing_then_does_not_split_after_it() {
    let punkt = tokenizer(r#"{"abbreviations": ["dr", "inc"]}"#);

    let sentences = punkt.sentences("Dr. Watson works at Acme Inc. in London. He is busy.");

    assert_eq!(
        sentences,
        vec!["Dr. Watson works at Acme Inc. in London.", "He is busy."]
    );
}

#[test]
fn given_abbreviation_followed_by_sentence_starter_when_tokenizing_then_splits() {
    let punkt = tokenizer(r#"{"abbreviations": ["inc"], "sentence_starters": ["the"]}"#);

    let sentences = punkt.sentences("He joined Acme Inc. The rest is history.");

    assert_eq!(sentences, vec!["He joined Acme Inc.", "The rest is history."]);
}

#[test]
fn given_dotted_abbreviation_when_tokenizing_then_treats_it_as_abbreviation() {
    let punkt = PunktTokenizer::new(PunktParameters::default());

    let sentences = punkt.sentences("Use a tool, e.g. this one works. Then stop.");

    assert_eq!(sentences, vec!["Use a tool, e.g. this one works.", "Then stop."]);
}

#[test]
fn given_initial_when_tokenizing_then_does_not_split() {
    let punkt = PunktTokenizer::new(PunktParameters::default());

    let sentences = punkt.sentences("J. Smith wrote it. It sold well.");

    assert_eq!(sentences, vec!["J. Smith wrote it.", "It sold well."]);
}

#[test]
fn given_ellipsis_before_lowercase_when_tokenizing_then_keeps_sentence_together() {
    let punkt = PunktTokenizer::new(PunktParameters::default());

    let sentences = punkt.sentences("Wait... what happened? Nothing.");

    assert_eq!(sentences, vec!["Wait... what happened?", "Nothing."]);
}

#[test]
fn given_closing_quote_after_period_when_tokenizing_then_quote_stays_with_sentence() {
    let punkt = PunktTokenizer::new(PunktParameters::default());

    let sentences = punkt.sentences("She said \"Stop.\" Then she left.");

    assert_eq!(sentences, vec!["She said \"Stop.\"", "Then she left."]);
}

#[test]
fn given_mixed_case_parameters_when_parsing_then_normalizes_entries() {
    let params =
        PunktParameters::from_json(r#"{"abbreviations": ["Dr.", "INC"], "sentence_starters": ["The"]}"#)
            .unwrap();

    assert!(params.abbreviations.contains("dr"));
    assert!(params.abbreviations.contains("inc"));
    assert!(params.sentence_starters.contains("the"));
}

#[test]
fn given_invalid_json_when_parsing_parameters_then_returns_invalid_parameters() {
    let result = PunktParameters::from_json("{\"abbreviations\": 3}");

    assert!(matches!(result, Err(TokenizerError::InvalidParameters(_))));
}

#[test]
fn given_missing_file_when_loading_then_model_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let result = PunktTokenizer::from_file(&dir.path().join("missing.json"));

    assert!(matches!(result, Err(TokenizerError::ModelUnavailable(_))));
}

#[test]
fn given_punkt_tokenizer_when_used_as_backend_then_yields_texts_in_batches() {
    let punkt = PunktTokenizer::new(PunktParameters::default());

    let segmentation = punkt.tokenize("One. Two.").unwrap();

    assert_eq!(punkt.backend(), ResolvedBackend::Punkt);
    assert_eq!(punkt.batch_limit(), Some(PUNKT_BATCH_CHARS));
    assert_eq!(
        segmentation,
        Segmentation::Texts(vec!["One.".to_string(), "Two.".to_string()])
    );
}
