//! # State Module
//!
//! Runtime state for the terminal front end, one focused type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Terminal State Types                                 │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐    │
//! │  │   EngineState    │ │     AdState      │ │    ConfigState       │    │
//! │  │                  │ │                  │ │                      │    │
//! │  │  • Calculator    │ │  • Coordinator   │ │  • Provider, zone    │    │
//! │  │    engine        │ │  • Availability  │ │  • Delay, banner     │    │
//! │  │  • Mutex-guarded │ │  • Ad timers     │ │  • No secrets        │    │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘    │
//! │                                                                         │
//! │  Commands borrow only the state they need.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod ads;
mod calculator;
mod config;

pub use ads::AdState;
pub use calculator::EngineState;
pub use config::ConfigState;
