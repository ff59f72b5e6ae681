//! First-person locomotion over static triangle-mesh geometry.
//!
//! A mass-bearing actor is pushed by accumulated forces, integrated into
//! a velocity and position each tick, then corrected against the
//! surrounding level geometry so it slides along walls, floors, and
//! ceilings instead of penetrating them.
//!
//! # Architecture
//!
//! One locomotion step runs these stages in order:
//!
//! 1. Convert input intent into a proportional control force
//! 2. Sum and drain the force accumulator (gravity included)
//! 3. Integrate velocity; apply ground friction or air drag
//! 4. Sphere-test the trial position against every level triangle
//! 5. Push the actor out along the summed correction
//! 6. Cancel the into-surface velocity component (slide)
//! 7. Re-derive the grounded state from the resolved position
//!
//! Geometry is read-only after construction and all mutable state lives
//! on the [`Actor`], so steps are deterministic and independent per
//! actor. Collision is brute force over every triangle each tick; there
//! is no broad phase and no continuous sweep.

pub mod actor;
pub mod collision;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod simulation;
pub mod trigger;

pub use actor::Actor;
pub use collision::{closest_point_on_triangle, sphere_triangle_contact, Contact};
pub use error::LocomotionError;
pub use geometry::{Level, Obstacle, Triangle, TriangleMesh};
pub use simulation::{Simulation, SimulationConfig, GROUND_EPSILON};
pub use trigger::{PickupZone, TeleportPad, TeleportPhase, TriggerEvent, TriggerZone};

// Re-export glam for convenience
pub use glam;
