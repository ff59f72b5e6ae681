//! Locomotion step orchestration: forces, integration, collision
//! resolution, and the grounded state machine.
//!
//! One step runs to completion per game-loop tick before anything reads
//! the resulting actor state. `dt` is the wall-clock time of the previous
//! frame (variable timestep); at very large `dt` the single discrete
//! collision pass can overshoot thin geometry, an accepted tradeoff of
//! not sweeping continuously.

use glam::Vec3;

use crate::actor::Actor;
use crate::collision::sphere_triangle_contact;
use crate::controller;
use crate::error::LocomotionError;
use crate::geometry::TriangleMesh;

/// Height above the ground plane at which the actor counts as grounded,
/// and to which it is clamped while grounded.
pub const GROUND_EPSILON: f32 = 0.01;

/// Tuning for the locomotion simulation.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Gravity vector. Default: (0, -15, 0).
    pub gravity: Vec3,
    /// Horizontal velocity decay rate while grounded. Default: 8.0.
    pub ground_friction: f32,
    /// Horizontal velocity decay rate while airborne. Default: 2.0.
    pub air_drag: f32,
    /// Responsiveness of the desired-velocity control force. Default: 20.0.
    pub control_factor: f32,
    /// World-space height of the ground plane. Default: 0.0.
    pub ground_height: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -15.0, 0.0),
            ground_friction: 8.0,
            air_drag: 2.0,
            control_factor: 20.0,
            ground_height: 0.0,
        }
    }
}

/// The locomotion simulation.
///
/// Holds only configuration. All mutable state lives on the [`Actor`],
/// so steps are bit-for-bit repeatable and per-actor parallelism is safe
/// as long as geometry is not mutated concurrently.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    /// Create a simulation with the given configuration.
    pub fn new(config: SimulationConfig) -> Result<Self, LocomotionError> {
        if !config.gravity.is_finite() || !config.ground_height.is_finite() {
            return Err(LocomotionError::InvalidConfig(
                "gravity and ground height must be finite",
            ));
        }
        for (value, name) in [
            (config.ground_friction, "ground friction"),
            (config.air_drag, "air drag"),
            (config.control_factor, "control factor"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LocomotionError::InvalidConfig(name));
            }
        }
        Ok(Self { config })
    }

    /// Create a simulation with the default tuning.
    pub fn with_defaults() -> Self {
        Self {
            config: SimulationConfig::default(),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Height at/below which the actor is grounded (and clamped).
    pub fn ground_threshold(&self) -> f32 {
        self.config.ground_height + GROUND_EPSILON
    }

    /// Advance the actor one tick against the given geometry.
    ///
    /// Either fully completes and commits the new actor state, or rejects
    /// an invalid `dt` before any mutation occurs.
    pub fn step<M: TriangleMesh + ?Sized>(
        &self,
        actor: &mut Actor,
        mesh: &M,
        dt: f32,
    ) -> Result<(), LocomotionError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(LocomotionError::InvalidDeltaTime(dt));
        }

        // 1. Input control, then force consumption.
        controller::apply_input_control(actor, self.config.control_factor);
        let total_force = controller::consume_forces(actor, self.config.gravity);

        // 2. Integration and grounded/airborne decay.
        controller::integrate_velocity(actor, total_force, dt);
        if actor.grounded {
            controller::apply_ground_friction(actor, self.config.ground_friction, dt);
        } else {
            controller::apply_air_drag(actor, self.config.air_drag, dt);
        }

        // 3-5. Trial position, brute-force collision pass, push-out.
        let trial = actor.position + actor.velocity * dt;
        let correction = accumulate_push_out(trial, actor.collision_radius, mesh);
        actor.position = trial + correction;

        // 6. Slide: cancel the velocity component pointing into the
        // surface, keep the tangential part.
        if correction.length_squared() > 0.0 {
            let normal = correction.normalize();
            let into = actor.velocity.dot(normal);
            if into < 0.0 {
                actor.velocity -= normal * into;
            }
        }

        // 7. Grounded state, re-derived from the resolved position.
        let threshold = self.ground_threshold();
        if actor.position.y <= threshold {
            actor.position.y = threshold;
            actor.velocity.y = 0.0;
            if !actor.grounded {
                tracing::debug!(x = actor.position.x, z = actor.position.z, "landed");
            }
            actor.grounded = true;
        } else if actor.grounded {
            actor.grounded = false;
            tracing::debug!("left ground");
        }

        Ok(())
    }
}

/// Sum push-out corrections from every penetrated triangle.
///
/// Corrections are summed, not averaged or prioritized: simultaneous
/// contacts at a concave corner can over-correct. Known limitation of
/// the single-pass resolution, kept for predictable behavior.
fn accumulate_push_out<M: TriangleMesh + ?Sized>(center: Vec3, radius: f32, mesh: &M) -> Vec3 {
    let mut correction = Vec3::ZERO;
    for tri in mesh.world_triangles() {
        if let Some(contact) = sphere_triangle_contact(center, radius, &tri) {
            correction += contact.push_out();
        }
    }
    correction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::closest_point_on_triangle;
    use crate::geometry::{Level, Obstacle, Triangle};

    const EPS: f32 = 1e-4;

    fn spawn_actor(position: Vec3) -> Actor {
        Actor::new(position, 80.0, 0.3).unwrap()
    }

    /// Two triangles spanning x = 0, y in [0, 4], z in [-2, 2], facing +x.
    fn wall_facing_pos_x() -> Vec<Triangle> {
        vec![
            Triangle::new(
                Vec3::new(0.0, 0.0, -2.0),
                Vec3::new(0.0, 4.0, -2.0),
                Vec3::new(0.0, 4.0, 2.0),
            ),
            Triangle::new(
                Vec3::new(0.0, 0.0, -2.0),
                Vec3::new(0.0, 4.0, 2.0),
                Vec3::new(0.0, 0.0, 2.0),
            ),
        ]
    }

    #[test]
    fn test_step_rejects_negative_dt() {
        let sim = Simulation::with_defaults();
        let mut actor = spawn_actor(Vec3::new(0.0, 5.0, 0.0));
        let before = actor.clone();

        let err = sim.step(&mut actor, &Level::new(), -0.016).unwrap_err();
        assert_eq!(err, LocomotionError::InvalidDeltaTime(-0.016));
        // Rejected before any mutation.
        assert_eq!(actor.position, before.position);
        assert_eq!(actor.velocity, before.velocity);

        assert!(sim.step(&mut actor, &Level::new(), f32::NAN).is_err());
    }

    #[test]
    fn test_config_validation() {
        let config = SimulationConfig {
            ground_friction: -1.0,
            ..SimulationConfig::default()
        };
        assert!(Simulation::new(config).is_err());

        let config = SimulationConfig {
            gravity: Vec3::new(0.0, f32::NAN, 0.0),
            ..SimulationConfig::default()
        };
        assert!(Simulation::new(config).is_err());

        assert!(Simulation::new(SimulationConfig::default()).is_ok());
    }

    #[test]
    fn test_free_fall_integration() {
        // Mass 80, gravity (0, -15, 0), dt 0.5: the actor accelerates to
        // -7.5 and stays well above the ground threshold.
        let sim = Simulation::with_defaults();
        let mut actor = spawn_actor(Vec3::new(0.0, 5.0, 0.0));

        sim.step(&mut actor, &Level::new(), 0.5).unwrap();
        assert!((actor.acceleration - Vec3::new(0.0, -15.0, 0.0)).length() < EPS);
        assert!((actor.velocity - Vec3::new(0.0, -7.5, 0.0)).length() < EPS);
        assert!((actor.position - Vec3::new(0.0, 1.25, 0.0)).length() < EPS);
        assert!(!actor.grounded);
    }

    #[test]
    fn test_fall_clamps_to_ground_threshold() {
        // Same scenario with dt 1.0: the trial position crosses the ground
        // plane, so the threshold logic clamps exactly and zeroes vertical
        // velocity.
        let sim = Simulation::with_defaults();
        let mut actor = spawn_actor(Vec3::new(0.0, 5.0, 0.0));

        sim.step(&mut actor, &Level::new(), 1.0).unwrap();
        assert!((actor.acceleration - Vec3::new(0.0, -15.0, 0.0)).length() < EPS);
        assert!(actor.grounded);
        assert!((actor.position.y - sim.ground_threshold()).abs() < EPS);
        assert_eq!(actor.velocity.y, 0.0);
        assert_eq!(actor.position.x, 0.0);
        assert_eq!(actor.position.z, 0.0);
    }

    #[test]
    fn test_grounded_actor_stays_clamped() {
        let sim = Simulation::with_defaults();
        let mut actor = spawn_actor(Vec3::new(0.0, sim.ground_threshold(), 0.0));

        for _ in 0..10 {
            sim.step(&mut actor, &Level::new(), 1.0 / 60.0).unwrap();
            assert!(actor.grounded);
            assert!((actor.position.y - sim.ground_threshold()).abs() < EPS);
            assert_eq!(actor.velocity.y, 0.0);
        }
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let sim = Simulation::with_defaults();
        let mut actor = spawn_actor(Vec3::new(0.0, sim.ground_threshold(), 0.0));
        let level = Level::new();
        let dt = 1.0 / 60.0;

        actor.request_jump(5.0);
        assert!(!actor.grounded);

        let mut peak = actor.position.y;
        let mut landed = false;
        for _ in 0..240 {
            sim.step(&mut actor, &level, dt).unwrap();
            peak = peak.max(actor.position.y);
            if actor.grounded {
                landed = true;
                break;
            }
        }
        assert!(peak > 0.5, "jump should gain height, peak = {peak}");
        assert!(landed, "actor should land within 4 seconds");
        assert!((actor.position.y - sim.ground_threshold()).abs() < EPS);
    }

    #[test]
    fn test_desired_velocity_accelerates_actor() {
        let sim = Simulation::with_defaults();
        let mut actor = spawn_actor(Vec3::new(0.0, sim.ground_threshold(), 0.0));
        let level = Level::new();
        let dt = 1.0 / 60.0;

        for _ in 0..120 {
            actor.set_desired_velocity(Vec3::new(1.4, 0.0, 0.0));
            sim.step(&mut actor, &level, dt).unwrap();
        }
        // Control force and friction reach an equilibrium near the target.
        assert!(actor.velocity.x > 0.8, "vx = {}", actor.velocity.x);
        assert!(actor.velocity.x < 1.5, "vx = {}", actor.velocity.x);
        assert!(actor.position.x > 0.5);
        assert!(actor.velocity.z.abs() < EPS);
    }

    #[test]
    fn test_slide_preserves_tangential_motion() {
        let sim = Simulation::with_defaults();
        let wall = wall_facing_pos_x();
        let dt = 1.0 / 60.0;

        // Airborne actor overlapping the wall, moving diagonally into it.
        let mut actor = spawn_actor(Vec3::new(0.25, 2.0, -1.5));
        actor.grounded = false;
        actor.velocity = Vec3::new(-2.0, 0.0, 3.0);

        sim.step(&mut actor, &wall[..], dt).unwrap();

        // Into-wall component removed, never reversed past zero.
        assert!(actor.velocity.x >= 0.0, "vx = {}", actor.velocity.x);
        assert!(actor.velocity.x < EPS, "vx = {}", actor.velocity.x);
        // Tangential component materially unchanged (air drag only).
        assert!((actor.velocity.z - 3.0 * (1.0 - 2.0 * dt)).abs() < 1e-3);
        // Pushed back out to exactly the collision radius.
        assert!(actor.position.x >= 0.3 - EPS);
    }

    #[test]
    fn test_no_penetration_after_step() {
        let sim = Simulation::with_defaults();
        let mut level = Level::new();
        level.push(Obstacle::cuboid(2.0, 3.0, 2.0).at(Vec3::new(2.0, 0.0, 0.0)));

        let mut actor = spawn_actor(Vec3::new(0.0, sim.ground_threshold(), 0.0));
        let dt = 1.0 / 60.0;

        // Walk into the wall for two seconds.
        for _ in 0..120 {
            actor.set_desired_velocity(Vec3::new(2.0, 0.0, 0.0));
            sim.step(&mut actor, &level, dt).unwrap();
        }

        for tri in level.world_triangles() {
            let closest = closest_point_on_triangle(actor.position, tri.a, tri.b, tri.c);
            let dist = (actor.position - closest).length();
            assert!(
                dist >= actor.collision_radius - 1e-3,
                "penetrating triangle {tri:?}: dist = {dist}"
            );
        }
    }

    #[test]
    fn test_deterministic_repeatability() {
        let sim = Simulation::with_defaults();
        let mut level = Level::new();
        level.push(Obstacle::cuboid(2.0, 3.0, 2.0).at(Vec3::new(1.0, 0.0, 0.0)));

        let run = |sim: &Simulation| {
            let mut actor = spawn_actor(Vec3::new(-1.0, 0.5, 0.0));
            for _ in 0..60 {
                actor.set_desired_velocity(Vec3::new(1.4, 0.0, 0.7));
                actor.add_force(Vec3::new(0.0, 0.0, 5.0));
                sim.step(&mut actor, &level, 1.0 / 60.0).unwrap();
            }
            (actor.position, actor.velocity)
        };

        let (pos_a, vel_a) = run(&sim);
        let (pos_b, vel_b) = run(&sim);
        // Bit-for-bit identical: no hidden mutable state outside the actor.
        assert_eq!(pos_a, pos_b);
        assert_eq!(vel_a, vel_b);
    }

    #[test]
    fn test_concave_corner_sums_corrections() {
        // Two perpendicular wall triangles both penetrated at once: the
        // corrections add, which is the documented (over-correcting)
        // behavior rather than a max-penetration pick.
        let sim = Simulation::with_defaults();
        let mut tris = wall_facing_pos_x();
        // Perpendicular wall at z = 0 facing +z.
        tris.push(Triangle::new(
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 4.0, 0.0),
        ));
        tris.push(Triangle::new(
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(2.0, 4.0, 0.0),
            Vec3::new(-2.0, 4.0, 0.0),
        ));

        let mut actor = spawn_actor(Vec3::new(0.2, 2.0, 0.2));
        actor.grounded = false;
        actor.velocity = Vec3::new(0.0, 15.0, 0.0);

        sim.step(&mut actor, &tris[..], 1.0 / 60.0).unwrap();
        // Pushed away from both planes simultaneously.
        assert!(actor.position.x > 0.2);
        assert!(actor.position.z > 0.2);
    }
}
