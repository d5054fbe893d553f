//! # Ad-Trigger Coordinator
//!
//! Turns each completed evaluation into one interstitial request/show pair.
//!
//! ## Sequence Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Sequence per '=' Press                           │
//! │                                                                         │
//! │   ┌──────┐  request_interstitial()  ┌───────────┐                       │
//! │   │ Idle │ ───────────────────────► │ Requested │                       │
//! │   └──────┘                          └─────┬─────┘                       │
//! │      ▲                                    │ show_delay elapsed           │
//! │      │                                    ▼ (tokio timer task)          │
//! │      │       show_interstitial()    ┌───────────┐                       │
//! │      └───────────────────────────── │   Shown   │                       │
//! │                                     └───────────┘                       │
//! │                                                                         │
//! │  • Sequences overlap freely: two quick '=' presses give two timers.     │
//! │  • Clearing the calculator or evaluating again cancels nothing.         │
//! │  • The show step does not wait for the request to finish loading;       │
//! │    the delay stands in for a load-completed callback.                   │
//! │  • Only shutdown() (process exit) stops pending show timers.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use abacus_core::EvaluationCompleted;

use crate::config::AdConfig;
use crate::service::AdService;

// =============================================================================
// Statistics
// =============================================================================

/// Snapshot of coordinator activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdStats {
    /// Interstitials requested since startup.
    pub requested: u64,

    /// Interstitials shown since startup.
    pub shown: u64,

    /// Sequences requested but not yet shown.
    pub in_flight: usize,
}

#[derive(Debug, Default)]
struct Counters {
    requested: AtomicU64,
    shown: AtomicU64,
    in_flight: AtomicUsize,
}

// =============================================================================
// Scheduled Show Handle
// =============================================================================

/// Handle to one in-flight request/show sequence.
///
/// Dropping it does not cancel anything; the show step runs regardless.
#[derive(Debug)]
pub struct ScheduledShow {
    id: Uuid,
    requested_at: DateTime<Utc>,
    show_at: Instant,
    task: JoinHandle<()>,
}

impl ScheduledShow {
    /// Identifier used in the sequence's log lines.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wall-clock time of the request call.
    pub fn requested_at(&self) -> DateTime<Utc> {
        self.requested_at
    }

    /// Instant at which the show step fires.
    pub fn show_at(&self) -> Instant {
        self.show_at
    }

    /// Returns true once the show step has run (or was dropped at shutdown).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the show step to finish.
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            warn!(sequence = %self.id, ?e, "Interstitial show task failed");
        }
    }
}

// =============================================================================
// Coordinator
// =============================================================================

/// Issues ad sequences in response to completed evaluations.
///
/// The capability is injected once as an `Option`; availability never
/// changes afterwards.
pub struct AdTriggerCoordinator {
    /// Provider capability (`None` = ads not available).
    service: Option<Arc<dyn AdService>>,

    /// Credential for `initialize`.
    app_token: String,

    /// Zone for banner and interstitial placements.
    zone_id: String,

    /// Banner width hint.
    banner_width: u32,

    /// Request-to-show delay.
    show_delay: Duration,

    /// Parent of every show timer's token; cancelled only by `shutdown`.
    shutdown: CancellationToken,

    /// Activity counters shared with timer tasks.
    counters: Arc<Counters>,
}

impl AdTriggerCoordinator {
    /// Creates a coordinator with an explicit capability.
    pub fn new(config: &AdConfig, service: Option<Arc<dyn AdService>>) -> Self {
        AdTriggerCoordinator {
            service,
            app_token: config.app_token.clone(),
            zone_id: config.zone_id.clone(),
            banner_width: config.banner_width,
            show_delay: config.show_delay(),
            shutdown: CancellationToken::new(),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Creates a coordinator backed by the configured provider.
    pub fn from_config(config: &AdConfig) -> Self {
        Self::new(config, config.provider.build())
    }

    /// Returns true if an ad capability was injected.
    pub fn is_available(&self) -> bool {
        self.service.is_some()
    }

    /// Zone id used for placements.
    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    /// Request-to-show delay.
    pub fn show_delay(&self) -> Duration {
        self.show_delay
    }

    /// Current activity counters.
    pub fn stats(&self) -> AdStats {
        AdStats {
            requested: self.counters.requested.load(Ordering::SeqCst),
            shown: self.counters.shown.load(Ordering::SeqCst),
            in_flight: self.counters.in_flight.load(Ordering::SeqCst),
        }
    }

    /// Startup calls: initialize the provider and load the banner.
    ///
    /// Without a capability this only logs a warning.
    pub fn initialize(&self) {
        match &self.service {
            Some(service) => {
                service.initialize(&self.app_token);
                service.load_banner(&self.zone_id, self.banner_width);
                info!(
                    zone_id = %self.zone_id,
                    banner_width = self.banner_width,
                    "Ad service initialized"
                );
            }
            None => warn!("Ad service not available"),
        }
    }

    /// Handles one completed evaluation.
    ///
    /// ## Steps
    /// 1. No capability: log and return `None`
    /// 2. Call `request_interstitial(zone_id)` now
    /// 3. Spawn a timer task that calls `show_interstitial()` once
    ///    `show_delay` has elapsed since step 2
    ///
    /// Must be called from within a tokio runtime; outside one the
    /// sequence is skipped with a warning.
    pub fn on_evaluation_completed(&self, _signal: EvaluationCompleted) -> Option<ScheduledShow> {
        let Some(service) = self.service.clone() else {
            warn!("Ad service not available, skipping interstitial");
            return None;
        };

        if self.shutdown.is_cancelled() {
            debug!("Coordinator shut down, skipping interstitial");
            return None;
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(?e, "No async runtime, skipping interstitial");
                return None;
            }
        };

        let id = Uuid::new_v4();
        let requested_at = Utc::now();

        service.request_interstitial(&self.zone_id);
        let show_at = Instant::now() + self.show_delay;
        self.counters.requested.fetch_add(1, Ordering::SeqCst);
        self.counters.in_flight.fetch_add(1, Ordering::SeqCst);
        debug!(
            sequence = %id,
            zone_id = %self.zone_id,
            requested_at = %requested_at,
            "Interstitial requested"
        );

        let cancel = self.shutdown.child_token();
        let counters = self.counters.clone();

        let task = runtime.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(
                        sequence = %id,
                        requested_at = %requested_at,
                        "Interstitial show dropped at shutdown"
                    );
                }
                _ = tokio::time::sleep_until(show_at) => {
                    service.show_interstitial();
                    counters.shown.fetch_add(1, Ordering::SeqCst);
                    debug!(sequence = %id, requested_at = %requested_at, "Interstitial shown");
                }
            }
            counters.in_flight.fetch_sub(1, Ordering::SeqCst);
        });

        Some(ScheduledShow {
            id,
            requested_at,
            show_at,
            task,
        })
    }

    /// Stops pending show timers. Called once, at process exit.
    pub fn shutdown(&self) {
        let in_flight = self.counters.in_flight.load(Ordering::SeqCst);
        info!(in_flight, "Shutting down ad-trigger coordinator");
        self.shutdown.cancel();
    }
}

impl std::fmt::Debug for AdTriggerCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdTriggerCoordinator")
            .field("available", &self.is_available())
            .field("zone_id", &self.zone_id)
            .field("show_delay", &self.show_delay)
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdProvider;
    use crate::service::{AdCall, RecordingAdService};
    use abacus_core::{CalculatorEngine, Operator};

    fn evaluation() -> EvaluationCompleted {
        CalculatorEngine::new()
            .apply_operator(Operator::Evaluate)
            .expect("'=' always signals")
    }

    fn config() -> AdConfig {
        AdConfig {
            provider: AdProvider::Log,
            app_token: "app-token".to_string(),
            zone_id: "7".to_string(),
            ..Default::default()
        }
    }

    fn recording() -> (Arc<RecordingAdService>, AdTriggerCoordinator) {
        let service = Arc::new(RecordingAdService::new());
        let coordinator = AdTriggerCoordinator::new(&config(), Some(service.clone()));
        (service, coordinator)
    }

    #[test]
    fn test_initialize_calls_provider() {
        let (service, coordinator) = recording();
        coordinator.initialize();

        assert_eq!(
            service.calls(),
            vec![
                AdCall::Initialize {
                    credential: "app-token".into()
                },
                AdCall::LoadBanner {
                    zone_id: "7".into(),
                    width_hint: 320
                },
            ]
        );
    }

    #[test]
    fn test_unavailable_is_silent_no_op() {
        let coordinator = AdTriggerCoordinator::new(&config(), None);
        assert!(!coordinator.is_available());

        coordinator.initialize();
        assert!(coordinator.on_evaluation_completed(evaluation()).is_none());
        assert_eq!(coordinator.stats(), AdStats::default());
    }

    #[test]
    fn test_outside_runtime_skips_sequence() {
        let (service, coordinator) = recording();
        assert!(coordinator.on_evaluation_completed(evaluation()).is_none());
        assert!(service.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_is_immediate_and_show_is_delayed() {
        let (service, coordinator) = recording();

        let scheduled = coordinator
            .on_evaluation_completed(evaluation())
            .expect("capability is available");

        assert_eq!(service.request_count(), 1);
        assert_eq!(service.show_count(), 0);
        assert_eq!(coordinator.stats().in_flight, 1);

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(service.show_count(), 0);

        scheduled.join().await;
        assert_eq!(service.show_count(), 1);

        let calls = service.timed_calls();
        assert_eq!(calls[0].1, AdCall::RequestInterstitial { zone_id: "7".into() });
        assert_eq!(calls[1].1, AdCall::ShowInterstitial);
        assert_eq!(calls[1].0 - calls[0].0, Duration::from_millis(1000));

        assert_eq!(
            coordinator.stats(),
            AdStats {
                requested: 1,
                shown: 1,
                in_flight: 0
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequence_records_request_time() {
        let (_service, coordinator) = recording();

        let before = Utc::now();
        let scheduled = coordinator.on_evaluation_completed(evaluation()).unwrap();
        let after = Utc::now();

        assert!(before <= scheduled.requested_at());
        assert!(scheduled.requested_at() <= after);
        assert_eq!(scheduled.show_at() - Instant::now(), Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_sequences_are_independent() {
        let (service, coordinator) = recording();

        let first = coordinator.on_evaluation_completed(evaluation()).unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        let second = coordinator.on_evaluation_completed(evaluation()).unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(second.show_at() - first.show_at(), Duration::from_millis(300));
        assert_eq!(service.request_count(), 2);
        assert_eq!(coordinator.stats().in_flight, 2);

        first.join().await;
        assert_eq!(service.show_count(), 1);
        second.join().await;
        assert_eq!(service.show_count(), 2);

        let requests: Vec<_> = service
            .timed_calls()
            .into_iter()
            .filter(|(_, c)| matches!(c, AdCall::RequestInterstitial { .. }))
            .map(|(at, _)| at)
            .collect();
        let shows: Vec<_> = service
            .timed_calls()
            .into_iter()
            .filter(|(_, c)| matches!(c, AdCall::ShowInterstitial))
            .map(|(at, _)| at)
            .collect();
        for (request, show) in requests.iter().zip(&shows) {
            assert_eq!(*show - *request, Duration::from_millis(1000));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_show_delay() {
        let service = Arc::new(RecordingAdService::new());
        let config = AdConfig {
            show_delay_ms: 2500,
            ..config()
        };
        let coordinator = AdTriggerCoordinator::new(&config, Some(service.clone()));

        let start = Instant::now();
        coordinator
            .on_evaluation_completed(evaluation())
            .unwrap()
            .join()
            .await;
        assert_eq!(Instant::now() - start, Duration::from_millis(2500));
        assert_eq!(service.show_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_drops_pending_shows() {
        let (service, coordinator) = recording();

        let scheduled = coordinator.on_evaluation_completed(evaluation()).unwrap();
        assert!(!scheduled.is_finished());
        coordinator.shutdown();
        while !scheduled.is_finished() {
            tokio::task::yield_now().await;
        }
        scheduled.join().await;

        assert_eq!(service.request_count(), 1);
        assert_eq!(service.show_count(), 0);
        assert_eq!(coordinator.stats().in_flight, 0);

        // No new sequences after shutdown
        assert!(coordinator.on_evaluation_completed(evaluation()).is_none());
        assert_eq!(service.request_count(), 1);
    }
}
