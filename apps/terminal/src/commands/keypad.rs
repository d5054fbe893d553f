//! # Keypad Commands
//!
//! Commands behind the calculator keys and the display.
//!
//! ## Key Press Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    press_key("=")                                       │
//! │                                                                         │
//! │  1. Parse label ──────────► Key::Operator(Evaluate)                     │
//! │  2. Lock engine, press ───► display updated, EvaluationCompleted        │
//! │  3. Unlock engine                                                       │
//! │  4. Signal? ──────────────► AdState::on_evaluation_completed            │
//! │                              (request now, show after delay)            │
//! │  5. Return DisplayResponse { display, adAvailable }                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use abacus_core::Key;

use crate::error::ApiError;
use crate::state::{AdState, EngineState};

/// What the display area shows after a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayResponse {
    /// Calculator display text
    pub display: String,

    /// False when the UI should show "ads not available"
    pub ad_available: bool,
}

/// Presses one keypad key.
///
/// ## Arguments
/// * `label` - Key label: `0`-`9`, `+ - * / =`, or `C`
///
/// ## Errors
/// `INVALID_KEY` for any other label; the engine is left untouched.
pub fn press_key(
    engine: &EngineState,
    ads: &AdState,
    label: &str,
) -> Result<DisplayResponse, ApiError> {
    debug!(label, "press_key command");

    let key: Key = label.parse()?;
    let signal = engine.with_engine_mut(|e| e.press(key));

    if let Some(signal) = signal {
        if let Some(scheduled) = ads.on_evaluation_completed(signal) {
            debug!(sequence = %scheduled.id(), "Interstitial scheduled");
        }
    }

    Ok(get_display(engine, ads))
}

/// Resets the calculator. Pending ad shows are left alone.
pub fn clear_display(engine: &EngineState, ads: &AdState) -> DisplayResponse {
    debug!("clear_display command");
    engine.with_engine_mut(|e| e.clear());
    get_display(engine, ads)
}

/// Reads the current display.
pub fn get_display(engine: &EngineState, ads: &AdState) -> DisplayResponse {
    DisplayResponse {
        display: engine.display(),
        ad_available: ads.is_available(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use abacus_ads::{AdConfig, AdProvider, AdStats, RecordingAdService};
    use std::sync::Arc;
    use std::time::Duration;

    fn press_all(engine: &EngineState, ads: &AdState, labels: &str) -> DisplayResponse {
        let mut last = get_display(engine, ads);
        for c in labels.chars() {
            last = press_key(engine, ads, &c.to_string()).unwrap();
        }
        last
    }

    fn no_ads() -> AdState {
        AdState::with_service(&AdConfig::default(), None)
    }

    fn recorded_ads() -> (Arc<RecordingAdService>, AdState) {
        let service = Arc::new(RecordingAdService::new());
        let config = AdConfig {
            provider: AdProvider::Log,
            app_token: "token".to_string(),
            ..Default::default()
        };
        let state = AdState::with_service(&config, Some(service.clone()));
        (service, state)
    }

    #[test]
    fn test_basic_arithmetic() {
        let engine = EngineState::new();
        let ads = no_ads();

        assert_eq!(press_all(&engine, &ads, "12+3=").display, "15");
        clear_display(&engine, &ads);
        assert_eq!(press_all(&engine, &ads, "9999*9999=").display, "99980001");
        clear_display(&engine, &ads);
        assert_eq!(press_all(&engine, &ads, "1/0=").display, "Infinity");
    }

    #[test]
    fn test_invalid_label_leaves_engine_alone() {
        let engine = EngineState::new();
        let ads = no_ads();
        press_all(&engine, &ads, "42");

        let err = press_key(&engine, &ads, "x").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidKey);

        let err = press_key(&engine, &ads, "12").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidKey);

        assert_eq!(engine.display(), "42");
    }

    #[test]
    fn test_unavailable_ads_reported_and_idle() {
        let engine = EngineState::new();
        let ads = no_ads();

        let response = press_all(&engine, &ads, "2+2=3=C5*5=");
        assert_eq!(
            response,
            DisplayResponse {
                display: "25".into(),
                ad_available: false
            }
        );
        assert_eq!(ads.stats(), AdStats::default());
    }

    #[test]
    fn test_clear_returns_zero() {
        let engine = EngineState::new();
        let ads = no_ads();
        press_all(&engine, &ads, "123+");

        assert_eq!(clear_display(&engine, &ads).display, "0");
        assert_eq!(press_key(&engine, &ads, "c").unwrap().display, "0");
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_evaluate_requests_one_interstitial() {
        let engine = EngineState::new();
        let (service, ads) = recorded_ads();

        let response = press_all(&engine, &ads, "2+3=");
        assert!(response.ad_available);
        assert_eq!(service.request_count(), 1);

        // Operators other than '=' never trigger
        press_all(&engine, &ads, "+4-1*2/");
        assert_eq!(service.request_count(), 1);

        press_all(&engine, &ads, "=");
        assert_eq!(service.request_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_does_not_cancel_pending_show() {
        let engine = EngineState::new();
        let (service, ads) = recorded_ads();

        press_all(&engine, &ads, "2+3=");
        clear_display(&engine, &ads);
        assert_eq!(service.show_count(), 0);

        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert_eq!(service.show_count(), 1);
        assert_eq!(engine.display(), "0");
    }
}
