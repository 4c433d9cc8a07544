use crate::math::{Point, Real, Vector};
use crate::query::Ray;

/// Parameter of the intersection between the line supporting `ray` and a plane.
///
/// The plane passes through `plane_point` with the normal `plane_normal`.
/// The returned parameter may be negative if the plane lies behind the ray
/// origin. Returns `None` if the ray is parallel to the plane.
#[inline]
pub fn ray_plane(plane_point: &Point, plane_normal: &Vector, ray: &Ray) -> Option<Real> {
    let denom = plane_normal.dot(&ray.dir);

    if denom == 0.0 {
        None
    } else {
        Some(plane_normal.dot(&(plane_point - ray.origin)) / denom)
    }
}
