/// Error type for the [`crate::config`] module. Captures errors related to
/// loading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error loading from environment variable
    #[error("missing or non-unicode environment variable: {0}")]
    Var(String),
    /// Error parsing a numeric environment variable
    #[error("failed to parse environment variable: {0}")]
    Parse(#[from] std::num::ParseIntError),
    /// Error parsing a URL environment variable
    #[error("failed to parse URL: {0}")]
    Url(#[from] url::ParseError),
    /// A value parsed but is out of range
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// The variable.
        key: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl ConfigError {
    /// Missing or non-unicode env var.
    pub fn missing(s: &str) -> Self {
        ConfigError::Var(s.to_string())
    }

    /// Out-of-range env var.
    pub fn invalid(key: &str, reason: &'static str) -> Self {
        ConfigError::Invalid { key: key.to_string(), reason }
    }
}
