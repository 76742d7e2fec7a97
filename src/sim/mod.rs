//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by sheep ID)
//! - No rendering or platform dependencies

pub mod gaussian;
pub mod level;
pub mod physics;
pub mod sheep;
pub mod spawn;
pub mod state;
pub mod tick;

pub use gaussian::Gaussian;
pub use level::{ClockReading, Level, LevelPhase, Overlay, RoundTimer, format_clock};
pub use physics::{Contact, RigidBody, detect_contacts, field_wall_contact, resolve_contact};
pub use sheep::{ClickOutcome, Sheep, SheepConfig, WanderPhase};
pub use spawn::{place_agents, random_in_disc};
pub use state::{GameEvent, GameState};
pub use tick::{FrameClock, TickInput, tick};
