//! Error type shared by configuration loading and session setup.

use std::io;
use thiserror::Error;

/// Everything that can go wrong outside the tick arithmetic itself.
#[derive(Debug, Error)]
pub enum GameError {
    /// A configuration value is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Rejection sampling could not find a position honouring the minimum
    /// obstacle gap within the attempt budget.
    #[error("could not place obstacle {index} after {attempts} attempts (minimum gap unsatisfiable)")]
    ObstaclePlacement { index: usize, attempts: u32 },
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed config file: {0}")]
    Parse(#[from] serde_json::Error),
}
