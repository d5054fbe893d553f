//! # Ad Configuration
//!
//! Configuration for the ad provider and the interstitial trigger.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ABACUS_AD_PROVIDER=log                                             │
//! │     ABACUS_APP_TOKEN=...                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/abacus/ads.toml (Linux)                                  │
//! │     ~/Library/Application Support/com.abacus.calculator/ads.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     provider = none, zone_id = "1", 320px banner, 1000 ms delay        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # ads.toml
//! provider = "log"
//! app_token = "0123456789abcdef"
//! zone_id = "1"
//! banner_width = 320
//! show_delay_ms = 1000
//! ```
//!
//! The token and zone id are opaque: they are handed to the provider
//! verbatim and never interpreted here.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{AdError, AdResult};
use crate::service::{AdService, TracingAdService};

// =============================================================================
// Ad Provider
// =============================================================================

/// Which [`AdService`] backs the coordinator.
///
/// ```text
/// NONE (Default)                       LOG
/// ──────────────                       ───
/// • No capability is injected          • TracingAdService stand-in
/// • Every trigger is a logged no-op    • Each call becomes a log line
/// • UI shows "ads not available"       • For terminals and demos
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdProvider {
    /// Ads disabled: the capability is absent.
    #[default]
    None,

    /// Log every provider call through `tracing`.
    Log,
}

impl AdProvider {
    /// Returns true if this provider supplies a capability.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, AdProvider::None)
    }

    /// Builds the capability for this provider, if any.
    pub fn build(&self) -> Option<Arc<dyn AdService>> {
        match self {
            AdProvider::None => None,
            AdProvider::Log => Some(Arc::new(TracingAdService::new())),
        }
    }
}

impl std::fmt::Display for AdProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdProvider::None => write!(f, "none"),
            AdProvider::Log => write!(f, "log"),
        }
    }
}

impl std::str::FromStr for AdProvider {
    type Err = AdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "off" | "disabled" => Ok(AdProvider::None),
            "log" | "tracing" => Ok(AdProvider::Log),
            other => Err(AdError::InvalidConfig(format!(
                "Unknown ad provider: '{}'. Valid options: none, log",
                other
            ))),
        }
    }
}

// =============================================================================
// Ad Configuration
// =============================================================================

/// Complete ad configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdConfig {
    /// Ad provider backing the capability.
    #[serde(default)]
    pub provider: AdProvider,

    /// Application credential passed to `AdService::initialize`.
    #[serde(default)]
    pub app_token: String,

    /// Placement/zone identifier for the banner and interstitials.
    #[serde(default = "default_zone_id")]
    pub zone_id: String,

    /// Width hint for the banner placement, in points.
    #[serde(default = "default_banner_width")]
    pub banner_width: u32,

    /// Delay between requesting and showing an interstitial (milliseconds).
    #[serde(default = "default_show_delay_ms")]
    pub show_delay_ms: u64,
}

fn default_zone_id() -> String {
    "1".to_string()
}

fn default_banner_width() -> u32 {
    320
}

fn default_show_delay_ms() -> u64 {
    1000
}

impl Default for AdConfig {
    fn default() -> Self {
        AdConfig {
            provider: AdProvider::default(),
            app_token: String::new(),
            zone_id: default_zone_id(),
            banner_width: default_banner_width(),
            show_delay_ms: default_show_delay_ms(),
        }
    }
}

impl AdConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (ads.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AdResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading ad config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load ad config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AdResult<()> {
        if !self.provider.is_enabled() {
            return Ok(());
        }

        if self.app_token.trim().is_empty() {
            return Err(AdError::MissingAppToken {
                provider: self.provider.to_string(),
            });
        }

        if self.zone_id.trim().is_empty() {
            return Err(AdError::InvalidConfig("zone_id must not be empty".into()));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key/value source.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(provider) = lookup("ABACUS_AD_PROVIDER") {
            match provider.parse() {
                Ok(parsed) => {
                    debug!(provider = %provider, "Overriding ad provider from environment");
                    self.provider = parsed;
                }
                Err(_) => warn!(provider = %provider, "Unknown ad provider in environment"),
            }
        }

        if let Some(token) = lookup("ABACUS_APP_TOKEN") {
            self.app_token = token;
        }

        if let Some(zone_id) = lookup("ABACUS_ZONE_ID") {
            debug!(zone_id = %zone_id, "Overriding zone id from environment");
            self.zone_id = zone_id;
        }

        if let Some(width) = lookup("ABACUS_BANNER_WIDTH") {
            if let Ok(w) = width.parse::<u32>() {
                self.banner_width = w;
            }
        }

        if let Some(delay) = lookup("ABACUS_SHOW_DELAY_MS") {
            if let Ok(ms) = delay.parse::<u64>() {
                debug!(delay_ms = ms, "Overriding show delay from environment");
                self.show_delay_ms = ms;
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "abacus", "calculator")
            .map(|dirs| dirs.config_dir().join("ads.toml"))
    }

    /// Returns the request-to-show delay.
    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.show_delay_ms)
    }
}
