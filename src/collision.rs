//! Sphere-triangle collision queries.
//!
//! Pure geometric functions with no state. The closest-point routine is
//! the standard region-test algorithm: vertex Voronoi regions, edge
//! regions, then the interior barycentric region, decided by dot-product
//! sign tests. Every division is guarded so degenerate triangles yield
//! the nearest valid feature instead of NaN.

use glam::Vec3;

use crate::geometry::Triangle;

/// Result of a sphere-triangle penetration query.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Separating direction (unit length), from the triangle toward the
    /// sphere center.
    pub normal: Vec3,
    /// Penetration depth along `normal`.
    pub penetration: f32,
    /// Closest point on the triangle to the sphere center.
    pub point: Vec3,
}

impl Contact {
    /// Minimal translation that moves the sphere center out of penetration.
    #[inline]
    pub fn push_out(&self) -> Vec3 {
        self.normal * self.penetration
    }
}

/// Find the closest point on triangle `abc` to point `p`.
pub fn closest_point_on_triangle(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    // Vertex region A
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return a;
    }

    // Vertex region B
    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return b;
    }

    // Edge region AB
    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let denom = d1 - d3;
        if denom <= 0.0 {
            // Zero-length edge
            return a;
        }
        return a + ab * (d1 / denom);
    }

    // Vertex region C
    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return c;
    }

    // Edge region AC
    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let denom = d2 - d6;
        if denom <= 0.0 {
            return a;
        }
        return a + ac * (d2 / denom);
    }

    // Edge region BC
    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let denom = (d4 - d3) + (d5 - d6);
        if denom <= 0.0 {
            return b;
        }
        let w = (d4 - d3) / denom;
        return b + (c - b) * w;
    }

    // Interior: project onto the face plane via barycentric coordinates.
    let n = ab.cross(ac);
    let denom = n.dot(n);
    if denom <= f32::EPSILON {
        // Degenerate triangle that slipped past the region tests.
        return nearest_vertex(p, a, b, c);
    }
    let u = ap.cross(ac).dot(n) / denom;
    let v = ab.cross(ap).dot(n) / denom;
    a + ab * u + ac * v
}

/// Test a sphere against a triangle, returning contact data on penetration.
///
/// A contact is signaled when the closest point on the triangle lies
/// strictly inside the sphere. If the center sits exactly on the triangle
/// surface the separating direction is undefined, so world-up is
/// substituted as a stable normal.
pub fn sphere_triangle_contact(center: Vec3, radius: f32, tri: &Triangle) -> Option<Contact> {
    let closest = closest_point_on_triangle(center, tri.a, tri.b, tri.c);
    let diff = center - closest;
    let dist_sq = diff.length_squared();

    if dist_sq >= radius * radius {
        return None;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > 1e-6 { diff / dist } else { Vec3::Y };

    Some(Contact {
        normal,
        penetration: radius - dist,
        point: closest,
    })
}

fn nearest_vertex(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let mut best = a;
    let mut best_dist = p.distance_squared(a);
    for v in [b, c] {
        let dist = p.distance_squared(v);
        if dist < best_dist {
            best_dist = dist;
            best = v;
        }
    }
    best
}
