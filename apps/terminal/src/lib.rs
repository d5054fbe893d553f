//! # Abacus Terminal Library
//!
//! Keypad front end for the Abacus calculator.
//!
//! ## Module Organization
//! ```text
//! abacus_terminal/
//! ├── lib.rs          ◄─── You are here (startup & keypad loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── calculator.rs ◄─ Engine behind a mutex
//! │   ├── ads.rs      ◄─── Ad-trigger coordinator
//! │   └── config.rs   ◄─── Non-secret config summary
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── keypad.rs   ◄─── press_key, clear_display, get_display
//! │   └── config.rs   ◄─── get_config, get_ad_stats
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Keypad Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin line            action                       stdout              │
//! │  ──────────            ──────                       ──────              │
//! │  "12+3="               one press_key per char       "15"                │
//! │  "C"                   clear                        "0"                 │
//! │  "config"              get_config                   JSON                │
//! │  "stats"               get_ad_stats                 JSON                │
//! │  "quit" / "exit"       leave loop, shut down ads                        │
//! │                                                                         │
//! │  Logs go to stderr so stdout carries only the display.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use abacus_ads::AdConfig;

use error::ApiError;
use state::{AdState, ConfigState, EngineState};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "ABACUS_CONFIG";

/// Label shown in place of the banner when no ad provider is configured.
pub const ADS_UNAVAILABLE_LABEL: &str = "ads not available";

/// All state for one keypad session.
#[derive(Debug)]
pub struct Session {
    pub engine: EngineState,
    pub ads: AdState,
    pub config: ConfigState,
}

impl Session {
    /// Creates a session from a loaded configuration.
    pub fn new(config: &AdConfig, config_path: Option<PathBuf>) -> Self {
        Session {
            engine: EngineState::new(),
            ads: AdState::from_config(config),
            config: ConfigState::from_ad_config(config, config_path),
        }
    }
}

/// Runs the terminal application on stdin/stdout.
///
/// ## Startup Sequence
/// 1. Initialize logging (tracing-subscriber, env filter)
/// 2. Load ad config: `ABACUS_CONFIG` path (strict) or the platform
///    default (falls back to defaults on error)
/// 3. Build state and run the ad provider startup calls
/// 4. Run the keypad loop
/// 5. Shut down the ad coordinator
pub async fn run() -> Result<(), ApiError> {
    init_tracing();

    info!("Starting Abacus");

    let (config, config_path) = load_config()?;
    info!(provider = %config.provider, zone_id = %config.zone_id, "Ad config loaded");

    let session = Session::new(&config, config_path);
    session.ads.initialize();

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let result = run_session(&session, stdin, &mut stdout).await;

    session.ads.shutdown();
    info!(stats = ?session.ads.stats(), "Abacus stopped");

    result
}

/// Loads the ad configuration for this process.
fn load_config() -> Result<(AdConfig, Option<PathBuf>), ApiError> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => {
            let path = PathBuf::from(path);
            let config = AdConfig::load(Some(path.clone()))?;
            Ok((config, Some(path)))
        }
        Err(_) => {
            let path = AdConfig::default_config_path();
            Ok((AdConfig::load_or_default(path.clone()), path))
        }
    }
}

/// Drives the keypad loop until end of input or `quit`.
pub async fn run_session<R, W>(session: &Session, input: R, output: &mut W) -> Result<(), ApiError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if !session.ads.is_available() {
        write_line(output, &format!("[{}]", ADS_UNAVAILABLE_LABEL)).await?;
    }
    write_line(output, &commands::keypad::get_display(&session.engine, &session.ads).display)
        .await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();

        match line {
            "" => continue,
            "quit" | "exit" => break,
            "config" => {
                let config = commands::config::get_config(&session.config);
                write_line(output, &serde_json::to_string_pretty(&config)?).await?;
            }
            "stats" => {
                let stats = commands::config::get_ad_stats(&session.ads);
                write_line(output, &serde_json::to_string(&stats)?).await?;
            }
            keys => {
                let display = press_keys(session, keys);
                write_line(output, &display).await?;
            }
        }
    }

    Ok(())
}

/// Presses each non-whitespace character as one key, returning the final
/// display. Bad keys are logged and skipped.
fn press_keys(session: &Session, keys: &str) -> String {
    for c in keys.chars().filter(|c| !c.is_whitespace()) {
        if let Err(e) = commands::keypad::press_key(&session.engine, &session.ads, &c.to_string())
        {
            warn!(key = %c, "{}", e.message);
        }
    }
    session.engine.display()
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, line: &str) -> Result<(), ApiError> {
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}

/// Initializes the tracing subscriber, writing to stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=abacus_ads=trace` - Trace the ad coordinator only
/// - Default: INFO, DEBUG for abacus crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,abacus=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use abacus_ads::AdProvider;

    async fn run_script(session: &Session, script: &str) -> String {
        let mut output = Vec::new();
        run_session(session, script.as_bytes(), &mut output)
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_session_prints_display_per_line() {
        let session = Session::new(&AdConfig::default(), None);
        let output = run_script(&session, "12+3=\nC\n9999 * 9999 =\n1/0=\n").await;

        assert_eq!(
            output,
            "[ads not available]\n0\n15\n0\n99980001\nInfinity\n"
        );
    }

    #[tokio::test]
    async fn test_session_stops_at_quit() {
        let session = Session::new(&AdConfig::default(), None);
        let output = run_script(&session, "7\nquit\n8\n").await;

        assert_eq!(output, "[ads not available]\n0\n7\n");
        assert_eq!(session.engine.display(), "7");
    }

    #[tokio::test]
    async fn test_session_skips_bad_keys() {
        let session = Session::new(&AdConfig::default(), None);
        let output = run_script(&session, "4x2\n").await;
        assert!(output.ends_with("42\n"));
    }

    #[tokio::test]
    async fn test_config_command_outputs_json() {
        let config = AdConfig {
            provider: AdProvider::Log,
            app_token: "hidden".into(),
            zone_id: "9".into(),
            ..Default::default()
        };
        let session = Session::new(&config, None);
        let output = run_script(&session, "config\n").await;

        // Log provider is available, so no unavailable banner
        assert!(output.starts_with("0\n"));
        assert!(output.contains("\"zoneId\": \"9\""));
        assert!(!output.contains("hidden"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stats_command_counts_requests() {
        let config = AdConfig {
            provider: AdProvider::Log,
            app_token: "t".into(),
            ..Default::default()
        };
        let session = Session::new(&config, None);
        let output = run_script(&session, "1+1=\n=\nstats\n").await;

        assert!(output.contains(r#"{"requested":2,"shown":0,"inFlight":2}"#));
    }
}
