//! # Error Types
//!
//! Error types for abacus-core.
//!
//! The engine itself never fails: division by zero and friends resolve to
//! `Infinity`/`NaN` display text. The only fallible step is turning raw key
//! labels coming from presentation into typed [`Key`](crate::Key) values.
//!
//! ```text
//! "7"  ──► Key::Digit(7)        ✔
//! "+"  ──► Key::Operator(Add)   ✔
//! "%"  ──► CoreError::UnknownKey("%")
//! ```

use thiserror::Error;

/// Input parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Character is not a decimal digit.
    #[error("'{0}' is not a digit")]
    InvalidDigit(char),

    /// Character is not one of `+ - * / =`.
    #[error("'{0}' is not an operator")]
    InvalidOperator(char),

    /// Label does not map to any keypad key.
    #[error("Unknown key: '{0}'")]
    UnknownKey(String),
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
