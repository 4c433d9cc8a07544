//! Functions checking if a point lies inside the prism spanned by a triangle.

use crate::math::{Point, Vector};

/// Returns `true` if `p` projects inside the triangle `(a, b, c)`.
///
/// The test is done against the three edge planes perpendicular to the
/// triangle plane, so the distance of `p` to the plane is ignored. Points on
/// an edge are considered inside.
pub fn point_in_triangle(p: &Point, a: &Point, b: &Point, c: &Point) -> bool {
    let normal = (b - a).cross(&(c - b));
    point_in_triangle_with_normal(p, a, b, c, &normal)
}

/// Same as [`point_in_triangle`] with a precomputed triangle normal.
///
/// `normal` does not need to be normalized but must point to the side given
/// by the right-hand rule on `(a, b, c)`.
pub fn point_in_triangle_with_normal(
    p: &Point,
    a: &Point,
    b: &Point,
    c: &Point,
    normal: &Vector,
) -> bool {
    let edge_test = |from: &Point, to: &Point| (to - from).cross(&(p - from)).dot(normal) >= 0.0;
    edge_test(a, b) && edge_test(b, c) && edge_test(c, a)
}
