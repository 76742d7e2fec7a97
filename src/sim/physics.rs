//! Minimal rigid-body world for the flock
//!
//! Sheep only ever push on their bodies with forces; this module integrates
//! those forces, keeps everyone on the ground plane, and reports contacts so a
//! sheep can abandon its current walk when it bumps into something.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::{from_ground, to_ground};

/// Default velocity decay per second (ground friction)
pub const DEFAULT_LINEAR_DAMPING: f32 = 1.0;

/// Extra gap left between bodies after separating them
const CONTACT_SLOP: f32 = 1e-4;

/// A body constrained to slide on the ground plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f32,
    pub radius: f32,
    pub linear_damping: f32,
    /// Forces accumulated since the last integration step
    #[serde(skip)]
    force: Vec3,
}

impl RigidBody {
    pub fn new(position: Vec3, mass: f32, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            mass,
            radius,
            linear_damping: DEFAULT_LINEAR_DAMPING,
            force: Vec3::ZERO,
        }
    }

    /// Queue a force for the next integration step
    #[inline]
    pub fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Current speed (velocity magnitude)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Force queued for the next step
    #[inline]
    pub fn pending_force(&self) -> Vec3 {
        self.force
    }

    /// Position projected onto the field plane
    #[inline]
    pub fn ground_pos(&self) -> Vec2 {
        from_ground(self.position)
    }

    /// Semi-implicit Euler step. Clears the force accumulator.
    pub fn integrate(&mut self, dt: f32) {
        if self.mass > 0.0 {
            self.velocity += self.force / self.mass * dt;
        }
        self.velocity *= 1.0 / (1.0 + self.linear_damping * dt);
        // Locked to the ground plane
        self.velocity.y = 0.0;
        self.position += self.velocity * dt;
        self.force = Vec3::ZERO;
    }

    fn inverse_mass(&self) -> f32 {
        if self.mass > 0.0 { 1.0 / self.mass } else { 0.0 }
    }
}

/// Overlap between two bodies, in the ground plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub a: usize,
    pub b: usize,
    /// Unit normal pointing from `a` toward `b`
    pub normal: Vec2,
    pub penetration: f32,
}

/// Find every overlapping pair, ordered by (a, b)
pub fn detect_contacts(bodies: &[&RigidBody]) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for (i, a) in bodies.iter().enumerate() {
        for (j, b) in bodies.iter().enumerate().skip(i + 1) {
            let delta = b.ground_pos() - a.ground_pos();
            let dist = delta.length();
            let reach = a.radius + b.radius;
            if dist < reach {
                // Coincident centers: any consistent direction will do
                let normal = if dist > 1e-6 { delta / dist } else { Vec2::X };
                contacts.push(Contact {
                    a: i,
                    b: j,
                    normal,
                    penetration: reach - dist,
                });
            }
        }
    }
    contacts
}

/// Push two overlapping bodies apart and cancel their closing velocity
pub fn resolve_contact(a: &mut RigidBody, b: &mut RigidBody, contact: &Contact) {
    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return;
    }

    let n = to_ground(contact.normal, 0.0);
    let correction = (contact.penetration + CONTACT_SLOP) / inv_sum;
    a.position -= n * correction * inv_a;
    b.position += n * correction * inv_b;

    // Inelastic: only remove the approaching component
    let closing = (b.velocity - a.velocity).dot(n);
    if closing < 0.0 {
        let impulse = -closing / inv_sum;
        a.velocity -= n * impulse * inv_a;
        b.velocity += n * impulse * inv_b;
    }
}

/// Keep a body inside the circular field. Returns true if it hit the wall.
pub fn field_wall_contact(body: &mut RigidBody, field_radius: f32) -> bool {
    let p = body.ground_pos();
    let r = p.length();
    if r + body.radius <= field_radius {
        return false;
    }

    let outward = if r > 1e-6 { p / r } else { Vec2::X };
    let inside = outward * (field_radius - body.radius).max(0.0);
    body.position.x = inside.x;
    body.position.z = inside.y;

    let n = to_ground(outward, 0.0);
    let outward_speed = body.velocity.dot(n);
    if outward_speed > 0.0 {
        body.velocity -= n * outward_speed;
    }
    true
}
