//! Error types for simulation configuration and stepping.

use thiserror::Error;

/// Errors produced when constructing an actor or stepping the simulation.
///
/// The taxonomy is deliberately narrow: this is a pure simulation core with
/// no I/O. Degenerate geometry and zero-length normalizations are handled
/// defensively inside the collision queries and never surface here.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum LocomotionError {
    /// Actor mass must be positive and finite.
    #[error("actor mass must be positive and finite, got {0}")]
    InvalidMass(f32),

    /// Collision radius must be positive and finite.
    #[error("collision radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    /// Delta time must be non-negative and finite.
    #[error("delta time must be non-negative and finite, got {0}")]
    InvalidDeltaTime(f32),

    /// A simulation configuration field is out of range.
    #[error("invalid simulation config: {0}")]
    InvalidConfig(&'static str),
}
