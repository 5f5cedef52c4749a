//! Terminal frontend: draws render frames with ratatui and turns crossterm
//! events into game input.

pub mod game_common;
pub mod scene;
pub mod terminal;
mod viewport;

pub use terminal::TerminalPlatform;
