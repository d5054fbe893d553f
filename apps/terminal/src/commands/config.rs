//! # Config Commands
//!
//! Read-only configuration and ad activity.

use tracing::debug;

use abacus_ads::AdStats;

use crate::state::{AdState, ConfigState};

/// Gets the non-secret configuration loaded at startup.
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

/// Gets interstitial counters (requested, shown, in flight).
pub fn get_ad_stats(ads: &AdState) -> AdStats {
    debug!("get_ad_stats command");
    ads.stats()
}
