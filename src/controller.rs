//! Force accumulation and velocity integration.
//!
//! Free functions over [`Actor`] state, run in a fixed order by the
//! simulation step:
//!
//! 1. [`apply_input_control`] — turn input intent into a control force
//! 2. [`consume_forces`] — sum gravity plus queued forces, drain the list
//! 3. [`integrate_velocity`] — semi-implicit Euler
//! 4. [`apply_ground_friction`] / [`apply_air_drag`] — state-dependent decay

use glam::Vec3;

use crate::actor::Actor;

/// Convert a pending desired velocity into a proportional control force.
///
/// The force steers the horizontal velocity toward the target instead of
/// writing it directly, so the actor cannot teleport its velocity through
/// a wall. The intent is cleared after use; calling without a pending
/// intent is a no-op.
pub fn apply_input_control(actor: &mut Actor, control_factor: f32) {
    let Some(desired) = actor.desired_velocity.take() else {
        return;
    };
    let current = Vec3::new(actor.velocity.x, 0.0, actor.velocity.z);
    let force = (desired - current) * control_factor * actor.mass;
    // Control acts on the horizontal plane only.
    actor.forces.push(Vec3::new(force.x, 0.0, force.z));
}

/// Sum gravity plus every queued force and drain the accumulator.
///
/// Called exactly once per step; the next `add_force` starts a fresh
/// accumulation.
pub fn consume_forces(actor: &mut Actor, gravity: Vec3) -> Vec3 {
    let mut total = gravity * actor.mass;
    for force in actor.forces.drain(..) {
        total += force;
    }
    total
}

/// Semi-implicit Euler velocity update: `a = F / m`, `v += a * dt`.
pub fn integrate_velocity(actor: &mut Actor, total_force: Vec3, dt: f32) {
    actor.acceleration = total_force / actor.mass;
    actor.velocity += actor.acceleration * dt;
}

/// Exponential decay of horizontal velocity while on the ground.
///
/// Vertical velocity is untouched.
pub fn apply_ground_friction(actor: &mut Actor, friction: f32, dt: f32) {
    let horizontal = Vec3::new(actor.velocity.x, 0.0, actor.velocity.z);
    let decayed = horizontal - horizontal * friction * dt;
    actor.velocity = Vec3::new(decayed.x, actor.velocity.y, decayed.z);
}

/// Horizontal drag while airborne. Vertical velocity is left to gravity.
pub fn apply_air_drag(actor: &mut Actor, drag: f32, dt: f32) {
    let horizontal = Vec3::new(actor.velocity.x, 0.0, actor.velocity.z);
    actor.velocity -= horizontal * drag * dt;
}
