//! # abacus-ads: Ad-Trigger Coordinator for Abacus
//!
//! Listens for completed evaluations from `abacus-core` and drives an
//! external ad provider: one interstitial request immediately, one show a
//! fixed delay later.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ad Trigger Flow                                  │
//! │                                                                         │
//! │  CalculatorEngine ── '=' ──► EvaluationCompleted                        │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                        ┌──────────────────────────┐                     │
//! │                        │  AdTriggerCoordinator    │                     │
//! │                        │                          │                     │
//! │                        │  service: Option<Arc<..>>│                     │
//! │                        └──────┬───────────┬───────┘                     │
//! │                     now       │           │   after show_delay          │
//! │                               ▼           ▼   (tokio task)              │
//! │                 request_interstitial   show_interstitial                │
//! │                               │           │                             │
//! │                        ┌──────▼───────────▼───────┐                     │
//! │                        │   dyn AdService          │                     │
//! │                        │   (SDK bridge / Log)     │                     │
//! │                        └──────────────────────────┘                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - `AdConfig` (TOML + env) and `AdProvider` selection
//! - [`coordinator`] - `AdTriggerCoordinator` and `ScheduledShow`
//! - [`service`] - `AdService` capability trait and built-in providers
//! - [`error`] - Configuration errors
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use abacus_ads::{AdConfig, AdTriggerCoordinator};
//! use abacus_core::{CalculatorEngine, Key};
//!
//! # async fn run() {
//! let config = AdConfig::load_or_default(None);
//! let coordinator = AdTriggerCoordinator::from_config(&config);
//! coordinator.initialize();
//!
//! let mut engine = CalculatorEngine::new();
//! for label in ["6", "*", "7", "="] {
//!     if let Some(signal) = engine.press(label.parse::<Key>().unwrap()) {
//!         coordinator.on_evaluation_completed(signal);
//!     }
//! }
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod coordinator;
pub mod error;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{AdConfig, AdProvider};
pub use coordinator::{AdStats, AdTriggerCoordinator, ScheduledShow};
pub use error::{AdError, AdResult};
pub use service::{AdService, TracingAdService};

#[cfg(any(test, feature = "test-util"))]
pub use service::{AdCall, RecordingAdService};
