//! # Ad State
//!
//! Owns the session's ad-trigger coordinator.

use std::sync::Arc;

use abacus_ads::{AdConfig, AdService, AdStats, AdTriggerCoordinator, ScheduledShow};
use abacus_core::EvaluationCompleted;

/// Session-wide ad coordinator.
#[derive(Debug)]
pub struct AdState {
    coordinator: AdTriggerCoordinator,
}

impl AdState {
    /// Builds the coordinator from the configured provider.
    pub fn from_config(config: &AdConfig) -> Self {
        AdState {
            coordinator: AdTriggerCoordinator::from_config(config),
        }
    }

    /// Builds the coordinator around an explicit capability.
    pub fn with_service(config: &AdConfig, service: Option<Arc<dyn AdService>>) -> Self {
        AdState {
            coordinator: AdTriggerCoordinator::new(config, service),
        }
    }

    pub fn is_available(&self) -> bool {
        self.coordinator.is_available()
    }

    /// Runs the provider startup calls (initialize, banner).
    pub fn initialize(&self) {
        self.coordinator.initialize();
    }

    /// Forwards a completion signal to the coordinator.
    pub fn on_evaluation_completed(&self, signal: EvaluationCompleted) -> Option<ScheduledShow> {
        self.coordinator.on_evaluation_completed(signal)
    }

    pub fn stats(&self) -> AdStats {
        self.coordinator.stats()
    }

    /// Stops pending show timers; call once at exit.
    pub fn shutdown(&self) {
        self.coordinator.shutdown();
    }
}
