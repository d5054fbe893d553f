//! # Configuration State
//!
//! Read-only view of the ad configuration loaded at startup.
//!
//! The application token is never exposed here; only whether one is set.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use abacus_ads::AdConfig;

/// Non-secret configuration summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Ad provider name ("none", "log")
    pub ad_provider: String,

    /// Whether an application token is configured
    pub has_app_token: bool,

    /// Zone id for banner and interstitials
    pub zone_id: String,

    /// Banner width hint
    pub banner_width: u32,

    /// Request-to-show delay in milliseconds
    pub show_delay_ms: u64,

    /// Config file consulted at startup, if any
    pub config_path: Option<String>,
}

impl ConfigState {
    /// Summarizes a loaded configuration.
    pub fn from_ad_config(config: &AdConfig, config_path: Option<PathBuf>) -> Self {
        ConfigState {
            ad_provider: config.provider.to_string(),
            has_app_token: !config.app_token.is_empty(),
            zone_id: config.zone_id.clone(),
            banner_width: config.banner_width,
            show_delay_ms: config.show_delay_ms,
            config_path: config_path.map(|p| p.display().to_string()),
        }
    }
}

impl Default for ConfigState {
    fn default() -> Self {
        Self::from_ad_config(&AdConfig::default(), None)
    }
}
