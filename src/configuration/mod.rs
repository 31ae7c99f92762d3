mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ChunkingSettings, ConfigurationError, LoggingSettings, RetrievalSettings, Settings,
};
