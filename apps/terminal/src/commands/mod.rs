//! # Commands Module
//!
//! Every operation the keypad loop can invoke.
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── keypad.rs   ◄─── press_key, clear_display, get_display
//! └── config.rs   ◄─── get_config, get_ad_stats
//! ```
//!
//! Each command borrows only the state it needs:
//! ```rust,ignore
//! fn get_display(engine: &EngineState, ads: &AdState) -> DisplayResponse
//! fn get_config(config: &ConfigState) -> ConfigState
//! ```

pub mod config;
pub mod keypad;
