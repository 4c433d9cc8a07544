use crate::math::{Point, Vector, DEFAULT_EPSILON};

/// Computes the unit normal of the triangle `(a, b, c)`.
///
/// The normal follows the right-hand rule on the corner order, that is
/// `(b - a) × (c - b)`. Returns `None` if the triangle is degenerate.
#[inline]
pub fn ccw_face_normal(pts: [&Point; 3]) -> Option<Vector> {
    let ab = pts[1] - pts[0];
    let bc = pts[2] - pts[1];
    ab.cross(&bc).try_normalize(DEFAULT_EPSILON)
}
