//! # Engine State
//!
//! Holds the one calculator engine for the session.
//!
//! ## Thread Safety
//! The engine sits behind `Arc<Mutex<_>>`. Key presses are short and all of
//! them mutate, so a plain mutex is enough. The lock is never held while
//! the ad coordinator runs.

use std::sync::{Arc, Mutex, PoisonError};

use abacus_core::CalculatorEngine;

/// Session-wide calculator engine.
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    engine: Arc<Mutex<CalculatorEngine>>,
}

impl EngineState {
    /// Creates state holding a fresh engine (display "0").
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the engine.
    pub fn with_engine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CalculatorEngine) -> R,
    {
        // Every engine operation leaves a valid state, so a poisoned lock
        // still guards usable data.
        let engine = self.engine.lock().unwrap_or_else(PoisonError::into_inner);
        f(&engine)
    }

    /// Executes a function with write access to the engine.
    pub fn with_engine_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CalculatorEngine) -> R,
    {
        let mut engine = self.engine.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut engine)
    }

    /// Current display text.
    pub fn display(&self) -> String {
        self.with_engine(|e| e.display().to_string())
    }
}
