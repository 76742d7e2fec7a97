//! Sheep wander/seek behavior
//!
//! Each sheep cycles forever: wait out a grazing pause, pick a nearby spot,
//! walk there, graze again. Waits are deadlines counted down by `update`;
//! walking is a force command issued every physics tick by `fixed_update`.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::gaussian::Gaussian;
use super::physics::RigidBody;
use super::spawn::random_in_disc;
use crate::consts::*;
use crate::to_ground;

/// Per-level sheep tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheepConfig {
    /// Seconds spent standing still between walks
    pub graze: Gaussian,
    /// Radius of the circle the next walk target is picked from
    pub search: Gaussian,
    /// Approach speed cap
    pub speed: f32,
    #[serde(default = "default_mass")]
    pub mass: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
}

fn default_mass() -> f32 {
    SHEEP_MASS
}

fn default_radius() -> f32 {
    SHEEP_RADIUS
}

impl Default for SheepConfig {
    fn default() -> Self {
        Self {
            graze: Gaussian::new(2.0, 0.5),
            search: Gaussian::new(2.0, 0.5),
            speed: SHEEP_SPEED,
            mass: SHEEP_MASS,
            radius: SHEEP_RADIUS,
        }
    }
}

/// Where a sheep is in its wander cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WanderPhase {
    /// One-time start delay so the flock doesn't move in lockstep
    Dormant { remaining: f32 },
    /// Standing still
    Grazing { remaining: f32 },
    /// Walking toward `target`
    Seeking { target: Vec3 },
}

/// Result of clicking a sheep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First click on this sheep
    Counted,
    /// The sheep was already counted
    DoubleCounted,
}

/// A wandering sheep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheep {
    pub id: u32,
    pub body: RigidBody,
    pub config: SheepConfig,
    pub phase: WanderPhase,
    /// Cleared by arrival or by bumping into something
    moving: bool,
    counted: bool,
    /// Render scale (click pulse)
    pub scale: f32,
    pulse_remaining: f32,
}

impl Sheep {
    /// Spawn a sheep at a field position with a random start delay in `[0, graze.mean)`
    pub fn spawn<R: Rng + ?Sized>(id: u32, ground_pos: Vec2, config: SheepConfig, rng: &mut R) -> Self {
        let delay = if config.graze.mean.is_finite() && config.graze.mean > 0.0 {
            rng.random_range(0.0..config.graze.mean)
        } else {
            0.0
        };

        Self {
            id,
            body: RigidBody::new(to_ground(ground_pos, SHEEP_HEIGHT), config.mass, config.radius),
            config,
            phase: WanderPhase::Dormant { remaining: delay },
            moving: false,
            counted: false,
            scale: 1.0,
            pulse_remaining: 0.0,
        }
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    #[inline]
    pub fn is_counted(&self) -> bool {
        self.counted
    }

    /// Current walk target, only while seeking
    pub fn target(&self) -> Option<Vec3> {
        match self.phase {
            WanderPhase::Seeking { target } if self.moving => Some(target),
            _ => None,
        }
    }

    /// Advance waits and the arrival check (frame tick)
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        match self.phase {
            WanderPhase::Dormant { remaining } | WanderPhase::Grazing { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    if matches!(self.phase, WanderPhase::Dormant { .. }) {
                        self.start_grazing(rng);
                    } else {
                        self.start_seeking(rng);
                    }
                } else {
                    self.set_remaining(remaining);
                }
            }
            WanderPhase::Seeking { target } => {
                if !self.moving || self.body.position.distance(target) <= ARRIVAL_EPSILON {
                    self.moving = false;
                    self.start_grazing(rng);
                }
            }
        }
    }

    /// Issue this tick's motion command (physics tick)
    ///
    /// Proportional speed matching: push toward the target by the gap between
    /// the desired speed and the current one. Desired speed shrinks with the
    /// remaining distance so the sheep doesn't overshoot.
    pub fn fixed_update(&mut self) {
        if !self.moving {
            return;
        }
        let WanderPhase::Seeking { target } = self.phase else {
            return;
        };

        let to_target = target - self.body.position;
        let d = to_target.length();
        let u = self.body.speed();
        let v = d.min(self.config.speed);
        let a = v - u;
        self.body
            .apply_force(to_target.normalize_or_zero() * self.body.mass * a);
    }

    /// Bumped into another body or the field wall: stop walking
    pub fn on_collision(&mut self) {
        if self.moving {
            log::debug!("Sheep {} interrupted by collision", self.id);
        }
        self.moving = false;
    }

    /// Handle a click on this sheep
    pub fn on_click(&mut self) -> ClickOutcome {
        if self.counted {
            return ClickOutcome::DoubleCounted;
        }
        self.counted = true;
        self.scale = PULSE_SCALE;
        self.pulse_remaining = PULSE_DURATION;
        ClickOutcome::Counted
    }

    /// Count down the click pulse and restore the normal scale
    pub fn update_pulse(&mut self, dt: f32) {
        if self.pulse_remaining > 0.0 {
            self.pulse_remaining -= dt;
            if self.pulse_remaining <= 0.0 {
                self.pulse_remaining = 0.0;
                self.scale = 1.0;
            }
        }
    }

    fn set_remaining(&mut self, value: f32) {
        match &mut self.phase {
            WanderPhase::Dormant { remaining } | WanderPhase::Grazing { remaining } => {
                *remaining = value;
            }
            WanderPhase::Seeking { .. } => {}
        }
    }

    fn start_grazing<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        // A negative sample just means "don't wait"
        let wait = self.config.graze.sample(rng).max(0.0);
        self.phase = WanderPhase::Grazing { remaining: wait };
        log::debug!("Sheep {} grazing for {:.2}s", self.id, wait);
    }

    fn start_seeking<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let radius = self.config.search.sample(rng).abs();
        let offset = random_in_disc(rng, radius);
        let target = self.body.position + to_ground(offset, 0.0);
        self.phase = WanderPhase::Seeking { target };
        self.moving = true;
        log::debug!("Sheep {} seeking {:?}", self.id, target);
    }
}
