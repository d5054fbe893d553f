//! # API Error Type
//!
//! Unified error type for keypad commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Error Flow                                          │
//! │                                                                         │
//! │  CoreError (bad key label) ──┐                                          │
//! │                              ├──► ApiError { code, message } ──► UI     │
//! │  AdError (bad config) ───────┘                                          │
//! │                                                                         │
//! │  The calculator itself never fails: 1/0 shows "Infinity".               │
//! │  Ad provider failures are never observed.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use abacus_ads::AdError;
use abacus_core::CoreError;

/// Error returned from keypad commands.
///
/// ```json
/// {
///   "code": "INVALID_KEY",
///   "message": "Unknown key: 'x'"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Key label not on the keypad
    InvalidKey,

    /// Ad configuration could not be loaded
    ConfigError,

    /// I/O or serialization failure
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::new(ErrorCode::InvalidKey, err.to_string())
    }
}

impl From<AdError> for ApiError {
    fn from(err: AdError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("Terminal I/O failed: {}", err);
        ApiError::internal(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("Serialization failed: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
