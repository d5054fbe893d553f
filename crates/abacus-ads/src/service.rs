//! # Ad Service Capability
//!
//! The contract between Abacus and an ad provider SDK.
//!
//! ## Call Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        AdService Calls                                  │
//! │                                                                         │
//! │  startup ──► initialize(app_token)                                      │
//! │          └─► load_banner(zone_id, 320)                                  │
//! │                                                                         │
//! │  '=' ──────► request_interstitial(zone_id)                              │
//! │               ... 1000 ms ...                                           │
//! │          └─► show_interstitial()                                        │
//! │                                                                         │
//! │  All calls are fire-and-forget: nothing is returned, nothing awaited.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::info;

// =============================================================================
// Capability Trait
// =============================================================================

/// An ad provider (implemented by SDK bridges).
///
/// Implementations must be cheap to call from any thread; the coordinator
/// invokes `show_interstitial` from a timer task.
pub trait AdService: Send + Sync {
    /// One-time setup with the application credential.
    fn initialize(&self, credential: &str);

    /// Requests a persistent banner placement.
    fn load_banner(&self, zone_id: &str, width_hint: u32);

    /// Starts preparing a full-screen ad.
    fn request_interstitial(&self, zone_id: &str);

    /// Presents the most recently prepared full-screen ad.
    fn show_interstitial(&self);
}

// =============================================================================
// Tracing Stand-in
// =============================================================================

/// Provider stand-in that turns every call into a log line.
///
/// Used where no SDK bridge exists (terminal builds, demos).
#[derive(Debug, Default)]
pub struct TracingAdService;

impl TracingAdService {
    pub fn new() -> Self {
        TracingAdService
    }
}

impl AdService for TracingAdService {
    fn initialize(&self, credential: &str) {
        info!(token_len = credential.len(), "ad provider initialized");
    }

    fn load_banner(&self, zone_id: &str, width_hint: u32) {
        info!(zone_id, width_hint, "banner requested");
    }

    fn request_interstitial(&self, zone_id: &str) {
        info!(zone_id, "interstitial requested");
    }

    fn show_interstitial(&self) {
        info!("interstitial shown");
    }
}

// =============================================================================
// Recording Service (for tests)
// =============================================================================

/// A single recorded provider call.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdCall {
    Initialize { credential: String },
    LoadBanner { zone_id: String, width_hint: u32 },
    RequestInterstitial { zone_id: String },
    ShowInterstitial,
}

/// Provider double that records every call with the tokio clock time.
///
/// Timestamps come from `tokio::time::Instant`, so tests running with a
/// paused clock see exact, deterministic delays.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct RecordingAdService {
    calls: std::sync::Mutex<Vec<(tokio::time::Instant, AdCall)>>,
}

#[cfg(any(test, feature = "test-util"))]
impl RecordingAdService {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls in order.
    pub fn calls(&self) -> Vec<AdCall> {
        self.timed_calls().into_iter().map(|(_, call)| call).collect()
    }

    /// All calls in order, with the instant each was made.
    pub fn timed_calls(&self) -> Vec<(tokio::time::Instant, AdCall)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of `request_interstitial` calls.
    pub fn request_count(&self) -> usize {
        self.count(|c| matches!(c, AdCall::RequestInterstitial { .. }))
    }

    /// Number of `show_interstitial` calls.
    pub fn show_count(&self) -> usize {
        self.count(|c| matches!(c, AdCall::ShowInterstitial))
    }

    fn count(&self, predicate: impl Fn(&AdCall) -> bool) -> usize {
        self.calls().iter().filter(|c| predicate(c)).count()
    }

    fn record(&self, call: AdCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((tokio::time::Instant::now(), call));
        }
    }
}

#[cfg(any(test, feature = "test-util"))]
impl AdService for RecordingAdService {
    fn initialize(&self, credential: &str) {
        self.record(AdCall::Initialize {
            credential: credential.to_string(),
        });
    }

    fn load_banner(&self, zone_id: &str, width_hint: u32) {
        self.record(AdCall::LoadBanner {
            zone_id: zone_id.to_string(),
            width_hint,
        });
    }

    fn request_interstitial(&self, zone_id: &str) {
        self.record(AdCall::RequestInterstitial {
            zone_id: zone_id.to_string(),
        });
    }

    fn show_interstitial(&self) {
        self.record(AdCall::ShowInterstitial);
    }
}
