use super::ResolvedBackend;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChunkingError {
    #[error("{backend} backend unavailable: {reason}")]
    BackendUnavailable {
        backend: ResolvedBackend,
        reason: String,
    },
    #[error("sentence backend resolution did not complete")]
    ResolutionIncomplete,
    #[error("invalid chunking configuration: {0}")]
    ConfigurationInvalid(String),
    #[error("unknown chunking strategy: {0}. Expected: fixed or semantic")]
    UnknownStrategy(String),
}
