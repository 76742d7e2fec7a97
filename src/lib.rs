//! Sheep Counter - find and click every sheep in the field
//!
//! Core modules:
//! - `sim`: Deterministic simulation (sampling, placement, wandering sheep, level progress)
//! - `config`: Data-driven level catalog
//! - `session`: Top-level orchestrator that owns the current round
//! - `error`: Error types

pub mod config;
pub mod error;
pub mod session;
pub mod sim;

pub use config::{GameConfig, LevelConfig};
pub use error::{ConfigError, GameError, PlacementError};
pub use session::Session;

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz physics tick)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Minimum distance between two spawn points
    pub const DEFAULT_MIN_SEPARATION: f32 = 1.0;
    /// Candidate draws allowed per accepted spawn point before giving up
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

    /// Height of a sheep's center above the ground plane
    pub const SHEEP_HEIGHT: f32 = 0.5;
    /// Sheep collision radius
    pub const SHEEP_RADIUS: f32 = 0.4;
    /// Default sheep mass
    pub const SHEEP_MASS: f32 = 1.0;
    /// Default approach speed cap
    pub const SHEEP_SPEED: f32 = 1.0;
    /// A seeking sheep has arrived once this close to its target
    pub const ARRIVAL_EPSILON: f32 = 0.01;

    /// Click feedback: scale factor and how long it is held
    pub const PULSE_SCALE: f32 = 1.5;
    pub const PULSE_DURATION: f32 = 0.1;

    /// How long intro/win/lose overlays stay up (seconds)
    pub const PRESENTATION_HOLD: f32 = 2.0;

    /// Extra room past the spawn range before the field wall
    pub const FIELD_MARGIN: f32 = 2.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Lift a field point onto the ground plane at the given height.
///
/// The field is laid out in x/z; `p.y` becomes world z.
#[inline]
pub fn to_ground(p: Vec2, height: f32) -> Vec3 {
    Vec3::new(p.x, height, p.y)
}

/// Project a world position onto the field plane
#[inline]
pub fn from_ground(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.z)
}
