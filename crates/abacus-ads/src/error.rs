//! # Ad Error Types
//!
//! Error types for the ad layer.
//!
//! Note what is NOT here: the coordinator never reports failures of the ad
//! provider itself. Requests and shows are fire-and-forget, and a missing
//! provider is a logged no-op. Only configuration can fail.

use thiserror::Error;

/// Result type alias for ad-layer operations.
pub type AdResult<T> = Result<T, AdError>;

/// Ad-layer error type.
#[derive(Debug, Error)]
pub enum AdError {
    /// Invalid ad configuration.
    #[error("Invalid ad configuration: {0}")]
    InvalidConfig(String),

    /// Provider enabled without an application token.
    #[error("Ad provider '{provider}' requires an application token")]
    MissingAppToken { provider: String },

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for AdError {
    fn from(err: std::io::Error) -> Self {
        AdError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for AdError {
    fn from(err: toml::de::Error) -> Self {
        AdError::ConfigLoadFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AdError::MissingAppToken {
            provider: "log".into(),
        };
        assert_eq!(
            err.to_string(),
            "Ad provider 'log' requires an application token"
        );
    }

    #[test]
    fn test_toml_error_converts_to_load_failure() {
        let err: AdError = toml::from_str::<toml::Table>("not = [valid")
            .unwrap_err()
            .into();
        assert!(matches!(err, AdError::ConfigLoadFailed(_)));
    }
}
