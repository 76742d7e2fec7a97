//! Fixed timestep simulation tick
//!
//! Core loop that advances a round deterministically.

use super::physics::{detect_contacts, field_wall_contact, resolve_contact};
use super::state::GameState;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Sheep clicked since the last tick, in click order
    pub clicks: Vec<u32>,
}

/// Advance the round by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    for &id in &input.clicks {
        state.click_sheep(id);
    }

    state.time_ticks += 1;

    // A decided round stops the flock; only cosmetics and the outro run on
    if !state.level.is_terminal() {
        step_flock(state, dt);
    }

    for sheep in &mut state.sheep {
        sheep.update_pulse(dt);
    }

    state.level.update(dt, &mut state.events);
}

fn step_flock(state: &mut GameState, dt: f32) {
    // Wander waits and motion commands
    for sheep in &mut state.sheep {
        sheep.update(dt, &mut state.rng);
        sheep.fixed_update();
    }

    for sheep in &mut state.sheep {
        sheep.body.integrate(dt);
    }

    // Contacts in id order so resolution is deterministic
    let contacts = {
        let bodies: Vec<_> = state.sheep.iter().map(|s| &s.body).collect();
        detect_contacts(&bodies)
    };
    for contact in &contacts {
        let (head, tail) = state.sheep.split_at_mut(contact.b);
        let a = &mut head[contact.a];
        let b = &mut tail[0];
        resolve_contact(&mut a.body, &mut b.body, contact);
        a.on_collision();
        b.on_collision();
    }

    for sheep in &mut state.sheep {
        if field_wall_contact(&mut sheep.body, state.field_radius) {
            sheep.on_collision();
        }
    }
}

/// Turns variable frame deltas into whole fixed ticks
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `SIM_DT` ticks to run for this frame.
    ///
    /// Caps at `MAX_SUBSTEPS` and drops the backlog beyond it.
    pub fn ticks_for(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = if frame_dt.is_finite() { frame_dt } else { 0.0 };
        self.accumulator += frame_dt.clamp(0.0, 0.1);
        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        ticks
    }
}
