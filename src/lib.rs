//! T-Rex Run - Terminal Side-Scrolling Runner Library
//!
//! This module exposes the game logic for testing and external use.

pub mod build_info;
pub mod core;
pub mod runner;

pub use crate::core::{GameConfig, GameError};
pub use runner::{new_session, GamePhase, Session, TickInput};

// UI module is not exposed as it's tightly coupled to the terminal
