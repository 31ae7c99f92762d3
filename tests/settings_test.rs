use std::io::Write;
use std::path::Path;

use chunkwise::configuration::{ConfigurationError, Environment, Settings};
use chunkwise::domain::{
    ChunkingError, ChunkingStrategyKind, ExpansionMethod, SentenceBackend,
};

fn settings_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn given_no_settings_file_when_loading_then_uses_defaults() {
    let settings = Settings::load(Environment::Test).unwrap();

    let chunking = settings.chunking_config().unwrap();
    assert_eq!(chunking.strategy(), ChunkingStrategyKind::Semantic);
    assert_eq!(chunking.chunk_size(), 500);
    assert_eq!(chunking.overlap(), 50);
    assert_eq!(chunking.min_chunk_size(), 300);
    assert_eq!(chunking.max_chunk_size(), 700);
    assert_eq!(chunking.target_chunk_size(), 500);
    assert_eq!(chunking.backend(), SentenceBackend::Auto);

    let retrieval = settings.retrieval_config().unwrap();
    assert_eq!((retrieval.min_top_k, retrieval.max_top_k), (5, 25));
    assert!(retrieval.enable_adaptive_top_k);
    assert!(!retrieval.enable_query_expansion);
}

#[test]
fn given_settings_file_when_loading_then_overrides_defaults() {
    let file = settings_file(
        r#"
[chunking]
strategy = "fixed"
chunk_size = 800
chunk_overlap = 80
backend = "nltk"
punkt_parameters = "data/punkt.json"

[retrieval]
max_top_k = 40
enable_query_expansion = true
expansion_method = "llm"

[logging]
enable_json = true
"#,
    );

    let settings = Settings::load_from(file.path()).unwrap();
    let chunking = settings.chunking_config().unwrap();
    let retrieval = settings.retrieval_config().unwrap();

    assert_eq!(chunking.strategy(), ChunkingStrategyKind::Fixed);
    assert_eq!(chunking.chunk_size(), 800);
    assert_eq!(chunking.overlap(), 80);
    assert_eq!(chunking.target_chunk_size(), 800);
    assert_eq!(chunking.backend(), SentenceBackend::Punkt);
    assert_eq!(chunking.punkt_parameters(), Some(Path::new("data/punkt.json")));
    assert_eq!(retrieval.max_top_k, 40);
    assert!(retrieval.enable_query_expansion);
    assert_eq!(retrieval.expansion_method, ExpansionMethod::Llm);
    assert!(settings.logging.enable_json);
}

#[test]
fn given_overlap_above_chunk_size_when_converting_then_fails_validation() {
    let file = settings_file("[chunking]\nchunk_size = 100\nchunk_overlap = 200\n");

    let settings = Settings::load_from(file.path()).unwrap();

    assert!(matches!(
        settings.chunking_config(),
        Err(ConfigurationError::Invalid(ChunkingError::ConfigurationInvalid(_)))
    ));
}

#[test]
fn given_inverted_top_k_bounds_when_converting_then_fails_validation() {
    let file = settings_file("[retrieval]\nmin_top_k = 30\nmax_top_k = 10\n");

    let settings = Settings::load_from(file.path()).unwrap();

    assert!(matches!(
        settings.retrieval_config(),
        Err(ConfigurationError::InvalidRetrieval(_))
    ));
}

#[test]
fn given_unknown_strategy_in_file_when_loading_then_fails_to_load() {
    let file = settings_file("[chunking]\nstrategy = \"paragraph\"\n");

    let result = Settings::load_from(file.path());

    assert!(matches!(result, Err(ConfigurationError::Load(_))));
}

#[test]
fn given_missing_explicit_file_when_loading_then_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();

    let result = Settings::load_from(&dir.path().join("absent.toml"));

    assert!(matches!(result, Err(ConfigurationError::Load(_))));
}

#[test]
fn given_environment_variable_when_loading_then_it_overrides_the_file() {
    let file = settings_file("[retrieval]\nmax_query_variants = 3\n");
    // SAFETY: no other test reads or writes this variable.
    unsafe { std::env::set_var("APP_RETRIEVAL__MAX_QUERY_VARIANTS", "9") };

    let settings = Settings::load_from(file.path()).unwrap();

    unsafe { std::env::remove_var("APP_RETRIEVAL__MAX_QUERY_VARIANTS") };
    assert_eq!(settings.retrieval.max_query_variants, 9);
}

#[test]
fn given_logging_settings_when_building_tracing_config_then_carries_environment() {
    let settings = Settings::default();

    let tracing = settings.tracing_config(Environment::Prod);

    assert_eq!(tracing.environment, "prod");
    assert!(!tracing.json_format);
    assert_eq!(tracing.filter_directive(), "info,chunkwise=debug");
}

#[test]
fn given_environment_names_when_parsing_then_accepts_known_values() {
    assert_eq!(
        Environment::try_from("Production".to_string()),
        Ok(Environment::Prod)
    );
    assert_eq!(Environment::try_from("local".to_string()), Ok(Environment::Local));
    assert!(Environment::try_from("staging".to_string()).is_err());
    assert_eq!(Environment::Test.settings_file(), "appsettings.test");
}
