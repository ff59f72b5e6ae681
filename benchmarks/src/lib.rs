//! Shared setup helpers for the locomotion benchmarks.

use glam::Vec3;
use strider::{Actor, Level, Obstacle};

/// A square room of `n x n` wall blocks on a regular grid, 12 triangles
/// each.
pub fn setup_wall_grid(n: usize) -> Level {
    let mut level = Level::new();
    for ix in 0..n {
        for iz in 0..n {
            let position = Vec3::new(ix as f32 * 4.0, 0.0, iz as f32 * 4.0);
            level.push(Obstacle::cuboid(2.0, 3.0, 2.0).at(position));
        }
    }
    level
}

/// An actor standing between the first row of wall blocks.
pub fn setup_actor() -> Actor {
    Actor::new(Vec3::new(2.0, 0.01, 2.0), 80.0, 0.3).expect("valid actor parameters")
}
