//! # Input Types
//!
//! The vocabulary of the keypad.
//!
//! ## Keypad Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Keypad → Key                                    │
//! │                                                                         │
//! │   ┌─────┬─────┬─────┬─────┐                                             │
//! │   │  C  │  7  │  8  │  /  │     C        → Key::Clear                   │
//! │   ├─────┼─────┼─────┼─────┤     0-9      → Key::Digit(Digit)            │
//! │   │  4  │  5  │  6  │  *  │     + - * /  → Key::Operator(Add..Divide)   │
//! │   ├─────┼─────┼─────┼─────┤     =        → Key::Operator(Evaluate)      │
//! │   │  1  │  2  │  3  │  -  │                                             │
//! │   ├─────┴─────┼─────┼─────┤                                             │
//! │   │     0     │  =  │  +  │                                             │
//! │   └───────────┴─────┴─────┘                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Digit
// =============================================================================

/// A single decimal digit, `0` through `9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    /// Returns the numeric value.
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the character shown on the key.
    #[inline]
    pub fn as_char(&self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<char> for Digit {
    type Error = CoreError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        c.to_digit(10)
            .map(|d| Digit(d as u8))
            .ok_or(CoreError::InvalidDigit(c))
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// =============================================================================
// Operator
// =============================================================================

/// An operator key.
///
/// `Evaluate` is an operator like the others: pressing `=` goes through the
/// same path as `+`, and afterwards sits in the pending slot as a no-op
/// operator that simply yields its right operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Evaluate,
}

impl Operator {
    /// Returns the keypad symbol.
    pub const fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Evaluate => '=',
        }
    }

    /// Parses a keypad symbol.
    pub fn from_symbol(symbol: char) -> CoreResult<Self> {
        match symbol {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            '=' => Ok(Operator::Evaluate),
            other => Err(CoreError::InvalidOperator(other)),
        }
    }

    /// Applies the operator in IEEE-754 double precision.
    ///
    /// Division by zero is not special-cased: `x / 0` is `±Infinity` and
    /// `0 / 0` is `NaN`.
    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => lhs / rhs,
            Operator::Evaluate => rhs,
        }
    }

    /// Returns true for the `=` key.
    #[inline]
    pub const fn is_evaluate(&self) -> bool {
        matches!(self, Operator::Evaluate)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// =============================================================================
// Key
// =============================================================================

/// A keypad press as delivered by presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Digit(Digit),
    Operator(Operator),
    Clear,
}

impl TryFrom<char> for Key {
    type Error = CoreError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c == 'C' || c == 'c' {
            return Ok(Key::Clear);
        }
        if let Ok(digit) = Digit::try_from(c) {
            return Ok(Key::Digit(digit));
        }
        Operator::from_symbol(c)
            .map(Key::Operator)
            .map_err(|_| CoreError::UnknownKey(c.to_string()))
    }
}

impl FromStr for Key {
    type Err = CoreError;

    /// Parses a key label such as `"7"`, `"+"` or `"C"`.
    ///
    /// Surrounding whitespace is ignored; anything longer than one
    /// character is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::try_from(c),
            _ => Err(CoreError::UnknownKey(label.to_string())),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Digit(d) => write!(f, "{}", d),
            Key::Operator(op) => write!(f, "{}", op),
            Key::Clear => write!(f, "C"),
        }
    }
}
