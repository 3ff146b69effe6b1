//! Error types for Musicrec core operations.

use thiserror::Error;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while wiring page behaviors.
#[derive(Debug, Error)]
pub enum Error {
    /// A browser global (window, document) is not available.
    #[error("Browser global not available: {0}")]
    MissingGlobal(&'static str),

    /// A DOM call failed.
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// Configuration JSON could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig {
        /// Dotted path of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl Error {
    /// Build an [`Error::InvalidConfig`] for an empty field.
    pub(crate) fn empty_field(field: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: "must not be empty".to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_global_display() {
        let err = Error::MissingGlobal("document");
        assert_eq!(err.to_string(), "Browser global not available: document");
    }

    #[test]
    fn test_invalid_config_display() {
        let err = Error::empty_field("elements.audio");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for elements.audio: must not be empty"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Config(_)));
    }
}
