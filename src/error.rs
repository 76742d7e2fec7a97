//! Error types
//!
//! Fallible setup paths (config validation, spawn placement) return these
//! through `Result`. Nothing inside a running round can fail.

use thiserror::Error;

/// Spawn placement failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    /// The disc cannot hold that many points at the requested separation
    #[error("could not place {requested} sheep (placed {placed}) within range {range} at separation {min_separation}")]
    Infeasible {
        placed: usize,
        requested: usize,
        range: f32,
        min_separation: f32,
    },

    #[error("invalid spawn range {0}")]
    InvalidRange(f32),

    #[error("invalid spawn separation {0}")]
    InvalidSeparation(f32),
}

/// Level catalog problems, reported before any round starts
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("level catalog is empty")]
    NoLevels,

    #[error("duplicate level id: {0}")]
    DuplicateLevel(String),

    #[error("unknown level id: {0}")]
    UnknownLevel(String),

    #[error("level {level}: {reason}")]
    InvalidLevel { level: String, reason: String },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that can stop a round from being built
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}
