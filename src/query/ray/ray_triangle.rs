use crate::math::{Point, Real, Vector, PARALLEL_EPSILON};
use crate::query::Ray;
use crate::utils;

/// Distance along `ray` to the triangle `(a, b, c)`.
///
/// The triangle is two-sided. Rays nearly parallel to its plane never hit.
#[inline]
pub fn ray_hits_triangle(ray: &Ray, a: &Point, b: &Point, c: &Point) -> Option<Real> {
    let normal = (b - a).cross(&(c - b));
    ray_hits_triangle_with_normal(ray, a, b, c, &normal)
}

/// Same as [`ray_hits_triangle`] with a precomputed triangle normal.
pub fn ray_hits_triangle_with_normal(
    ray: &Ray,
    a: &Point,
    b: &Point,
    c: &Point,
    normal: &Vector,
) -> Option<Real> {
    let dot = ray.dir.dot(normal);

    if dot.abs() <= PARALLEL_EPSILON {
        return None;
    }

    let lambda = (a - ray.origin).dot(normal) / dot;

    if lambda <= 0.0 {
        return None;
    }

    let hit = ray.point_at(lambda);

    if utils::point_in_triangle_with_normal(&hit, a, b, c, normal) {
        Some(lambda)
    } else {
        None
    }
}
