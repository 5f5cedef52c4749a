//! Ambient plumbing: constants, configuration, errors, logging and the
//! platform-facing loop.

pub mod config;
pub mod constants;
pub mod error;
pub mod game_loop;
pub mod logging;

pub use config::GameConfig;
pub use constants::*;
pub use error::GameError;
pub use game_loop::{run, MonotonicClock, Platform, RunSummary, TickLimiter};
