//! Error types
//!
//! The simulation itself has no fallible I/O. These cover invariant
//! violations at construction time and the settings loader.

use std::io;

use thiserror::Error;

/// Invariant violations detected by the simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Terrain needs at least two points with strictly increasing x
    #[error("invalid terrain: {points} point(s) with strictly increasing x required (at least 2)")]
    InvalidTerrain { points: usize },

    /// A turn action that the current turn state does not allow
    #[error("illegal turn action while {state}")]
    IllegalTurnAction { state: &'static str },

    /// A settings value that would break a simulation invariant
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Errors from loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] SimError),
}
