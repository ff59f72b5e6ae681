//! Static level geometry: triangles, obstacles, and the mesh seam the
//! locomotion core collides against.
//!
//! Geometry is immutable after construction. Nothing in this module knows
//! about rendering; whatever owns the level (map loader, editor, tests)
//! hands the simulation a [`TriangleMesh`] and the core only ever
//! enumerates world-space triangles from it.

use glam::Vec3;

/// A single triangle in world space.
///
/// Winding defines the outward face normal: `(b - a).cross(c - a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Normalized outward face normal. Zero for a degenerate triangle.
    pub fn normal(&self) -> Vec3 {
        (self.b - self.a).cross(self.c - self.a).normalize_or_zero()
    }

    /// This triangle with all three vertices translated by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            a: self.a + offset,
            b: self.b + offset,
            c: self.c + offset,
        }
    }
}

/// Source of world-space collision triangles.
///
/// The locomotion core depends only on this seam. Obstacles, obstacle
/// slices, and whole levels all implement it, so a step can run against
/// anything that yields triangles.
pub trait TriangleMesh {
    /// Enumerate every triangle in world coordinates.
    fn world_triangles(&self) -> Box<dyn Iterator<Item = Triangle> + '_>;
}

/// A static obstacle: an indexed triangle mesh plus a world-space
/// translation applied to every vertex when enumerated.
#[derive(Debug, Clone)]
pub struct Obstacle {
    vertices: Vec<Vec3>,
    indices: Vec<[u32; 3]>,
    /// World-space translation applied to every vertex.
    pub position: Vec3,
}

impl Obstacle {
    /// Build an obstacle from pre-parsed mesh data.
    ///
    /// Indices must be in range for `vertices`; level data is trusted
    /// after load, so this is only checked in debug builds.
    pub fn from_mesh(vertices: Vec<Vec3>, indices: Vec<[u32; 3]>) -> Self {
        debug_assert!(indices
            .iter()
            .flatten()
            .all(|&i| (i as usize) < vertices.len()));
        Self {
            vertices,
            indices,
            position: Vec3::ZERO,
        }
    }

    /// An axis-aligned box used for walls: base at y = 0, centered on x/z.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let w = width / 2.0;
        let h = height;
        let d = depth / 2.0;

        // Four vertices per face so every face keeps its own outward winding.
        let vertices = vec![
            // Front (+z)
            Vec3::new(-w, 0.0, d),
            Vec3::new(w, 0.0, d),
            Vec3::new(w, h, d),
            Vec3::new(-w, h, d),
            // Back (-z)
            Vec3::new(w, 0.0, -d),
            Vec3::new(-w, 0.0, -d),
            Vec3::new(-w, h, -d),
            Vec3::new(w, h, -d),
            // Left (-x)
            Vec3::new(-w, 0.0, -d),
            Vec3::new(-w, 0.0, d),
            Vec3::new(-w, h, d),
            Vec3::new(-w, h, -d),
            // Right (+x)
            Vec3::new(w, 0.0, d),
            Vec3::new(w, 0.0, -d),
            Vec3::new(w, h, -d),
            Vec3::new(w, h, d),
            // Top (+y)
            Vec3::new(-w, h, d),
            Vec3::new(w, h, d),
            Vec3::new(w, h, -d),
            Vec3::new(-w, h, -d),
            // Bottom (-y)
            Vec3::new(-w, 0.0, -d),
            Vec3::new(w, 0.0, -d),
            Vec3::new(w, 0.0, d),
            Vec3::new(-w, 0.0, d),
        ];

        let indices = vec![
            [0, 1, 2],
            [0, 2, 3],
            [4, 5, 6],
            [4, 6, 7],
            [8, 9, 10],
            [8, 10, 11],
            [12, 13, 14],
            [12, 14, 15],
            [16, 17, 18],
            [16, 18, 19],
            [20, 21, 22],
            [20, 22, 23],
        ];

        Self::from_mesh(vertices, indices)
    }

    /// Move the obstacle so its translation offset is `position`.
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }
}

impl TriangleMesh for Obstacle {
    fn world_triangles(&self) -> Box<dyn Iterator<Item = Triangle> + '_> {
        Box::new(self.indices.iter().map(move |&[i0, i1, i2]| Triangle {
            a: self.vertices[i0 as usize] + self.position,
            b: self.vertices[i1 as usize] + self.position,
            c: self.vertices[i2 as usize] + self.position,
        }))
    }
}

impl TriangleMesh for [Obstacle] {
    fn world_triangles(&self) -> Box<dyn Iterator<Item = Triangle> + '_> {
        Box::new(self.iter().flat_map(|o| o.world_triangles()))
    }
}

impl TriangleMesh for [Triangle] {
    fn world_triangles(&self) -> Box<dyn Iterator<Item = Triangle> + '_> {
        Box::new(self.iter().copied())
    }
}

/// All static obstacles of a loaded level.
///
/// Read-only once populated; the actor is checked against the union of
/// every obstacle each tick.
#[derive(Debug, Clone, Default)]
pub struct Level {
    obstacles: Vec<Obstacle>,
}

impl Level {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

impl TriangleMesh for Level {
    fn world_triangles(&self) -> Box<dyn Iterator<Item = Triangle> + '_> {
        self.obstacles[..].world_triangles()
    }
}
