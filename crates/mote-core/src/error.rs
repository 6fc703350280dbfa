//! Error types for mote

use thiserror::Error;

/// The main error type for mote operations
#[derive(Debug, Error)]
pub enum MoteError {
    /// Emitter configuration rejected at creation time. Nothing is created.
    #[error("Invalid emitter config: {0}")]
    InvalidConfig(String),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for mote operations
pub type Result<T> = std::result::Result<T, MoteError>;

impl From<toml::de::Error> for MoteError {
    fn from(err: toml::de::Error) -> Self {
        MoteError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_message() {
        let err = MoteError::InvalidConfig("lifetime must be >= 0".into());
        assert_eq!(
            err.to_string(),
            "Invalid emitter config: lifetime must be >= 0"
        );
    }

    #[test]
    fn toml_error_converts() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("gravity = [");
        let err: MoteError = parsed.unwrap_err().into();
        assert!(matches!(err, MoteError::TomlParseError(_)));
    }
}
