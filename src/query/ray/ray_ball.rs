use crate::math::{Point, Real};
use crate::query::Ray;

/// Parameter of the first intersection between the line supporting `ray`
/// and a sphere.
///
/// The nearest root is returned unless it lies behind the origin, in which
/// case the farthest one is returned. Both roots may be negative if the
/// sphere lies entirely behind the ray. Returns `None` if the line misses
/// the sphere.
pub fn ray_sphere(ray: &Ray, center: &Point, radius: Real) -> Option<Real> {
    let a = ray.dir.norm_squared();

    if a == 0.0 {
        return None;
    }

    let diff = ray.origin - center;
    let b = diff.dot(&ray.dir);
    let c = diff.norm_squared() - radius * radius;
    let disc = b * b - a * c;

    if disc < 0.0 {
        return None;
    }

    let disc = disc.sqrt();
    let lambda = (-b - disc) / a;

    if lambda < 0.0 {
        Some((-b + disc) / a)
    } else {
        Some(lambda)
    }
}

/// Distance along `ray` to the surface of a sphere.
///
/// If the origin is inside the sphere the distance to the exit point is
/// returned. Returns `None` if the sphere lies behind the ray or is missed.
#[inline]
pub fn ray_hits_sphere(ray: &Ray, center: &Point, radius: Real) -> Option<Real> {
    ray_sphere(ray, center, radius).filter(|lambda| *lambda >= 0.0)
}
