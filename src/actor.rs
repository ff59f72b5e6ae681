//! Actor state: the simulated moving entity.
//!
//! The actor owns every piece of mutable simulation state — position,
//! velocity, the per-tick force accumulator, the pending input intent —
//! so steps are deterministic and multiple actors are independent.

use glam::Vec3;

use crate::error::LocomotionError;

/// A mass-bearing entity moved by the locomotion simulation.
///
/// Kinematic fields are public so collaborators (camera, triggers,
/// footstep audio) can read them directly after a step. The force
/// accumulator and input intent are managed through methods to keep the
/// drain-once-per-tick discipline.
#[derive(Debug, Clone)]
pub struct Actor {
    /// World-space feet reference point.
    pub position: Vec3,
    pub velocity: Vec3,
    /// Acceleration computed by the most recent step.
    pub acceleration: Vec3,
    /// Mass in kilograms. Always positive.
    pub mass: f32,
    /// Bounding-sphere radius used for all collision queries. Always positive.
    pub collision_radius: f32,
    /// True while the actor rests on the ground plane.
    pub grounded: bool,
    /// Forces applied at the next step. Drained once per tick.
    pub(crate) forces: Vec<Vec3>,
    /// Pending input intent, consumed at most once per tick.
    pub(crate) desired_velocity: Option<Vec3>,
}

impl Actor {
    /// Create an actor at a spawn position.
    ///
    /// Rejects non-positive or non-finite mass and collision radius before
    /// any state exists, so a step can never divide by zero mass.
    pub fn new(spawn: Vec3, mass: f32, collision_radius: f32) -> Result<Self, LocomotionError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(LocomotionError::InvalidMass(mass));
        }
        if !collision_radius.is_finite() || collision_radius <= 0.0 {
            return Err(LocomotionError::InvalidRadius(collision_radius));
        }
        Ok(Self {
            position: spawn,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            mass,
            collision_radius,
            grounded: true,
            forces: Vec::new(),
            desired_velocity: None,
        })
    }

    /// Queue a force to be applied at the next step.
    pub fn add_force(&mut self, force: Vec3) {
        self.forces.push(force);
    }

    /// Set the horizontal velocity the actor should steer toward.
    ///
    /// This is an intent, not a velocity write: the next step converts it
    /// into a proportional control force and clears it, so movement stays
    /// physically continuous.
    pub fn set_desired_velocity(&mut self, velocity: Vec3) {
        self.desired_velocity = Some(velocity);
    }

    /// Jump with the given initial vertical speed.
    ///
    /// Honored only while grounded. Prior vertical velocity is replaced
    /// rather than accumulated, so jump height is deterministic; the
    /// grounded flag flips immediately, ruling out double jumps unless
    /// external logic re-grants one.
    pub fn request_jump(&mut self, vertical_speed: f32) {
        if !self.grounded {
            return;
        }
        self.velocity.y = vertical_speed;
        self.grounded = false;
        tracing::debug!(vertical_speed, "jump");
    }
}
