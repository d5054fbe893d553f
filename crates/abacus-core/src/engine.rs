//! # Calculator Engine
//!
//! The calculator state machine.
//!
//! ## State Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Calculator State Machine                             │
//! │                                                                         │
//! │  Key            Engine Operation          State Change                  │
//! │  ───            ────────────────          ────────────                  │
//! │                                                                         │
//! │  0-9 ─────────► input_digit() ──────────► display = d  (fresh entry)    │
//! │                                           display += d (otherwise)      │
//! │                                                                         │
//! │  + - * / = ───► apply_operator() ───────► previous ⊕pending input       │
//! │                                           pending = pressed operator    │
//! │                       │                   awaiting_fresh_entry = true   │
//! │                       │                                                 │
//! │                       └── if '=' ───────► EvaluationCompleted ────►     │
//! │                                           (returned to the caller)      │
//! │                                                                         │
//! │  C ───────────► clear() ────────────────► back to defaults              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Left-to-Right Evaluation
//! The operator applied on each press is the one stored by the PREVIOUS
//! press, so `1 + 2 * 3 =` is `(1 + 2) * 3 = 9`.
//!
//! ## `=` Stays Pending
//! After `=`, the pending slot holds `Evaluate`. A following `4 +` therefore
//! applies `Evaluate` (which yields the right operand) and continues the
//! chain from `4`. Suspicious, but it is how the keypad has always behaved.

use serde::Serialize;
use ts_rs::TS;

use crate::display::{format_number, parse_display};
use crate::types::{Digit, Key, Operator};
use crate::INITIAL_DISPLAY;

// =============================================================================
// Calculator State
// =============================================================================

/// Numeric and display state of the calculator.
///
/// Only [`CalculatorEngine`] mutates it. Presentation reads it through
/// [`CalculatorEngine::state`].
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorState {
    /// Text of the entered or most recently computed number.
    display: String,

    /// Left operand waiting for an operation.
    previous_value: Option<f64>,

    /// Operator awaiting its right operand.
    pending_operation: Option<Operator>,

    /// The next digit starts a new number instead of appending.
    awaiting_fresh_entry: bool,
}

impl CalculatorState {
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn previous_value(&self) -> Option<f64> {
        self.previous_value
    }

    pub fn pending_operation(&self) -> Option<Operator> {
        self.pending_operation
    }

    pub fn awaiting_fresh_entry(&self) -> bool {
        self.awaiting_fresh_entry
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        CalculatorState {
            display: INITIAL_DISPLAY.to_string(),
            previous_value: None,
            pending_operation: None,
            awaiting_fresh_entry: false,
        }
    }
}

// =============================================================================
// Completion Signal
// =============================================================================

/// Signal that an `=` press just produced a result.
///
/// Carries no payload. It is neither `Clone` nor `Copy`, so whoever receives
/// it can act on it at most once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an evaluation signal should be handed to the ad-trigger coordinator"]
pub struct EvaluationCompleted {
    _private: (),
}

impl EvaluationCompleted {
    fn new() -> Self {
        EvaluationCompleted { _private: () }
    }
}

// =============================================================================
// Calculator Engine
// =============================================================================

/// Owns the single live [`CalculatorState`] and applies input to it.
///
/// ## Example
/// ```rust
/// use abacus_core::{CalculatorEngine, Key};
///
/// let mut engine = CalculatorEngine::new();
/// for key in "8/0".chars() {
///     engine.press(Key::try_from(key).unwrap());
/// }
/// let signal = engine.press("=".parse().unwrap());
///
/// assert_eq!(engine.display(), "Infinity");
/// assert!(signal.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CalculatorEngine {
    state: CalculatorState,
}

impl CalculatorEngine {
    /// Creates an engine showing `"0"` with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Current display text.
    pub fn display(&self) -> &str {
        &self.state.display
    }

    /// Dispatches a keypad press.
    ///
    /// Returns the completion signal when the key was `=`.
    pub fn press(&mut self, key: Key) -> Option<EvaluationCompleted> {
        match key {
            Key::Digit(digit) => {
                self.input_digit(digit);
                None
            }
            Key::Operator(op) => self.apply_operator(op),
            Key::Clear => {
                self.clear();
                None
            }
        }
    }

    /// Enters a digit.
    ///
    /// Replaces the display after an operator press or when it shows a bare
    /// `"0"`; appends otherwise. There is no length limit.
    pub fn input_digit(&mut self, digit: Digit) {
        let state = &mut self.state;

        if state.awaiting_fresh_entry {
            state.display = digit.to_string();
            state.awaiting_fresh_entry = false;
        } else if state.display == INITIAL_DISPLAY {
            state.display = digit.to_string();
        } else {
            state.display.push(digit.as_char());
        }
    }

    /// Resets to the initial state.
    pub fn clear(&mut self) {
        self.state = CalculatorState::default();
    }

    /// Applies an operator press, including `=`.
    ///
    /// ## Steps
    /// 1. Parse the display into the right operand
    /// 2. No left operand yet: store it, no arithmetic
    /// 3. Otherwise apply the operator stored by the previous press and show
    ///    the result
    /// 4. Store the pressed operator as pending, expect a fresh entry
    /// 5. If `op` is `=`, return the completion signal
    pub fn apply_operator(&mut self, op: Operator) -> Option<EvaluationCompleted> {
        let state = &mut self.state;
        let input_value = parse_display(&state.display);

        match (state.previous_value, state.pending_operation) {
            (None, _) => {
                state.previous_value = Some(input_value);
            }
            (Some(previous), Some(pending)) => {
                let new_value = pending.apply(left_operand(previous), input_value);
                state.display = format_number(new_value);
                state.previous_value = Some(new_value);
            }
            // Not reachable through the keypad: a left operand is always
            // stored together with an operator.
            (Some(_), None) => {
                state.display = format_number(input_value);
                state.previous_value = Some(input_value);
            }
        }

        state.awaiting_fresh_entry = true;
        state.pending_operation = Some(op);

        op.is_evaluate().then(EvaluationCompleted::new)
    }
}

/// Falsy left operands (`NaN`, `-0`) count as zero.
fn left_operand(previous: f64) -> f64 {
    if previous.is_nan() || previous == 0.0 {
        0.0
    } else {
        previous
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Presses every key in `keys`, returning how many completion signals
    /// were produced.
    fn press_all(engine: &mut CalculatorEngine, keys: &str) -> usize {
        keys.chars()
            .filter(|c| !c.is_whitespace())
            .filter_map(|c| engine.press(Key::try_from(c).unwrap()))
            .count()
    }

    fn run(keys: &str) -> CalculatorEngine {
        let mut engine = CalculatorEngine::new();
        press_all(&mut engine, keys);
        engine
    }

    #[test]
    fn test_initial_state() {
        let engine = CalculatorEngine::new();
        assert_eq!(engine.display(), "0");
        assert_eq!(engine.state().previous_value(), None);
        assert_eq!(engine.state().pending_operation(), None);
        assert!(!engine.state().awaiting_fresh_entry());
    }

    #[test]
    fn test_digits_concatenate() {
        assert_eq!(run("123").display(), "123");
        assert_eq!(run("9081726354").display(), "9081726354");
    }

    #[test]
    fn test_leading_zero_is_replaced() {
        assert_eq!(run("0").display(), "0");
        assert_eq!(run("000").display(), "0");
        assert_eq!(run("007").display(), "7");
        assert_eq!(run("7007").display(), "7007");
    }

    #[test]
    fn test_long_entry_is_kept_verbatim() {
        let digits = "1234567890".repeat(5);
        assert_eq!(run(&digits).display(), digits);
    }

    #[test]
    fn test_first_operator_stores_operand_without_arithmetic() {
        let engine = run("12+");
        assert_eq!(engine.display(), "12");
        assert_eq!(engine.state().previous_value(), Some(12.0));
        assert_eq!(engine.state().pending_operation(), Some(Operator::Add));
        assert!(engine.state().awaiting_fresh_entry());
    }

    #[test]
    fn test_digit_after_operator_starts_new_number() {
        let engine = run("12+3");
        assert_eq!(engine.display(), "3");
        assert!(!engine.state().awaiting_fresh_entry());
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(run("2+3=").display(), "5");
        assert_eq!(run("3-5=").display(), "-2");
        assert_eq!(run("6*7=").display(), "42");
        assert_eq!(run("8/2=").display(), "4");
        assert_eq!(run("1/3=").display(), "0.3333333333333333");
    }

    #[test]
    fn test_chain_applies_left_to_right() {
        // (1 + 2) * 3, not 1 + (2 * 3)
        assert_eq!(run("1+2*3=").display(), "9");
        assert_eq!(run("10-4/2=").display(), "3");
    }

    #[test]
    fn test_intermediate_result_shown_on_next_operator() {
        let engine = run("1+2*");
        assert_eq!(engine.display(), "3");
        assert_eq!(engine.state().previous_value(), Some(3.0));
        assert_eq!(engine.state().pending_operation(), Some(Operator::Multiply));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(run("5/0=").display(), "Infinity");
        assert_eq!(run("0/0=").display(), "NaN");
        assert_eq!(run("0-5=/0=").display(), "-Infinity");
    }

    #[test]
    fn test_multiplication_uses_double_precision() {
        assert_eq!(run("9999*9999=").display(), "99980001");
        assert_eq!(run("123456789*987654321=").display(), "121932631112635260");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut engine = run("12+34*");
        engine.clear();
        assert_eq!(engine.state(), &CalculatorState::default());

        let mut engine = run("5/0=");
        engine.press(Key::Clear);
        assert_eq!(engine.display(), "0");
        assert_eq!(engine.state().previous_value(), None);
        assert_eq!(engine.state().pending_operation(), None);
        assert!(!engine.state().awaiting_fresh_entry());
    }

    #[test]
    fn test_evaluate_emits_exactly_one_signal() {
        let mut engine = CalculatorEngine::new();
        assert_eq!(press_all(&mut engine, "2+3"), 0);
        assert_eq!(press_all(&mut engine, "="), 1);
        assert_eq!(press_all(&mut engine, "*4=="), 2);
    }

    #[test]
    fn test_evaluate_without_operand_still_signals() {
        let mut engine = CalculatorEngine::new();
        let signal = engine.press(Key::Operator(Operator::Evaluate));
        assert!(signal.is_some());
        assert_eq!(engine.display(), "0");
        assert_eq!(engine.state().previous_value(), Some(0.0));
    }

    #[test]
    fn test_signal_follows_display_update() {
        let mut engine = run("6*7");
        let signal = engine.apply_operator(Operator::Evaluate);
        assert!(signal.is_some());
        assert_eq!(engine.display(), "42");
    }

    #[test]
    fn test_evaluate_becomes_pending_operator() {
        let engine = run("2+3=");
        assert_eq!(engine.state().pending_operation(), Some(Operator::Evaluate));

        // "4 +" applies the pending '=' which just yields 4
        let engine = run("2+3=4+");
        assert_eq!(engine.display(), "4");
        assert_eq!(engine.state().previous_value(), Some(4.0));

        assert_eq!(run("2+3=4+1=").display(), "5");
    }

    #[test]
    fn test_repeated_equals_keeps_result() {
        assert_eq!(run("2+3===").display(), "5");
    }

    #[test]
    fn test_nan_left_operand_counts_as_zero() {
        // 0/0 = NaN; "+" folds NaN in via '='; then NaN + 2 starts from zero
        assert_eq!(run("0/0=+2=").display(), "2");
    }

    #[test]
    fn test_operator_after_result_continues_chain() {
        assert_eq!(run("2+3=*").display(), "5");
        assert_eq!(run("2+3=*").state().previous_value(), Some(5.0));
    }

    #[test]
    fn test_state_snapshot_serializes_camel_case() {
        let engine = run("12+");
        let json = serde_json::to_value(engine.state()).unwrap();
        assert_eq!(json["display"], "12");
        assert_eq!(json["previousValue"], 12.0);
        assert_eq!(json["pendingOperation"], "add");
        assert_eq!(json["awaitingFreshEntry"], true);
    }
}
