use crate::math::{Point, Real, Vector};
use crate::query::details::closest_point_on_ray;

/// Distance between `point` and the infinite line through `origin` along `dir`.
#[inline]
pub fn point_ray_distance(origin: &Point, dir: &Vector, point: &Point) -> Real {
    (point - closest_point_on_ray(origin, dir, point)).norm()
}
