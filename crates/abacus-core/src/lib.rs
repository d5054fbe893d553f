//! # abacus-core: Pure Calculator Logic for Abacus
//!
//! This crate is the **heart** of Abacus. It holds the calculator state
//! machine as plain data plus deterministic operations, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Abacus Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (keypad, display)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ press_key / clear / get_display        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ abacus-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │  display  │  │  engine   │                  │   │
//! │  │   │   Digit   │  │  format   │  │ Calculator│                  │   │
//! │  │   │ Operator  │  │  parse    │  │  Engine   │                  │   │
//! │  │   │    Key    │  │           │  │           │                  │   │
//! │  │   └───────────┘  └───────────┘  └─────┬─────┘                  │   │
//! │  │                                       │ EvaluationCompleted     │   │
//! │  └───────────────────────────────────────┼─────────────────────────┘   │
//! │                                          ▼                              │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              abacus-ads (Ad-Trigger Coordinator)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Input vocabulary (Digit, Operator, Key)
//! - [`display`] - Number <-> display text conversion
//! - [`engine`] - `CalculatorState` and `CalculatorEngine`
//! - [`error`] - Input parsing errors
//!
//! ## Example Usage
//!
//! ```rust
//! use abacus_core::{CalculatorEngine, Key};
//!
//! let mut engine = CalculatorEngine::new();
//! for label in ["1", "+", "2", "*", "3", "="] {
//!     engine.press(label.parse::<Key>().unwrap());
//! }
//!
//! // Operations apply left to right: (1 + 2) * 3
//! assert_eq!(engine.display(), "9");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod display;
pub mod engine;
pub mod error;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use display::{format_number, parse_display};
pub use engine::{CalculatorEngine, CalculatorState, EvaluationCompleted};
pub use error::{CoreError, CoreResult};
pub use types::{Digit, Key, Operator};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Display text of a freshly created or cleared calculator.
pub const INITIAL_DISPLAY: &str = "0";
