/// Settings for the global tracing subscriber.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub level: String,
    pub json_format: bool,
}

impl TracingConfig {
    /// Reads `APP_ENV`, `LOG_LEVEL` and `LOG_FORMAT` (`json` enables JSON output).
    pub fn from_env() -> Self {
        Self {
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
        }
    }

    /// Default filter directive when `RUST_LOG` is unset.
    pub fn filter_directive(&self) -> String {
        format!("{},chunkwise=debug", self.level)
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            level: "info".to_string(),
            json_format: false,
        }
    }
}
