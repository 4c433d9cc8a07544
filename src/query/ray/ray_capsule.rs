use crate::math::{Point, Real, Vector, DEFAULT_EPSILON};
use crate::query::{nearest_hit, quadratic_roots, Ray};

use super::ray_hits_sphere;

/// Distance along `ray` to the surface of a Y-aligned capsule.
///
/// The capsule is the set of points within `radius` of the segment joining
/// `center - half_height * Y` and `center + half_height * Y`.
pub fn ray_hits_capsule(ray: &Ray, center: &Point, half_height: Real, radius: Real) -> Option<Real> {
    let origin = ray.origin - center;
    let dir = &ray.dir;
    let mut best = None;

    let a = dir.x * dir.x + dir.z * dir.z;
    let b = 2.0 * (origin.x * dir.x + origin.z * dir.z);
    let c = origin.x * origin.x + origin.z * origin.z - radius * radius;

    if let Some(roots) = quadratic_roots(a, b, c) {
        for lambda in roots {
            if lambda >= 0.0 {
                let y = origin.y + dir.y * lambda;

                if y > -half_height && y < half_height {
                    best = nearest_hit(best, lambda);
                }
            }
        }
    }

    let local_ray = Ray::new(Point::from(origin), *dir);

    for cap in [half_height, -half_height] {
        if let Some(lambda) = ray_hits_sphere(&local_ray, &Point::new(0.0, cap, 0.0), radius) {
            best = nearest_hit(best, lambda);
        }
    }

    best
}

/// Distance along `ray` to the surface of a Y-aligned tapered capsule.
///
/// The tapered capsule is the convex hull of a sphere of `bottom_radius` at
/// `center - half_height * Y` and a sphere of `top_radius` at
/// `center + half_height * Y`. When one sphere contains the other, only the
/// biggest one is tested.
pub fn ray_hits_tapered_capsule(
    ray: &Ray,
    center: &Point,
    half_height: Real,
    top_radius: Real,
    bottom_radius: Real,
) -> Option<Real> {
    if half_height <= DEFAULT_EPSILON {
        return ray_hits_sphere(ray, center, top_radius.max(bottom_radius));
    }

    // Angle between the cone side and the capsule axis.
    let sin_a = (bottom_radius - top_radius) / (2.0 * half_height);

    if sin_a.abs() >= 1.0 {
        let (y, radius) = if top_radius > bottom_radius {
            (half_height, top_radius)
        } else {
            (-half_height, bottom_radius)
        };
        return ray_hits_sphere(ray, &(center + Vector::y() * y), radius);
    }

    let cos_a = (1.0 - sin_a * sin_a).sqrt();
    let origin = ray.origin - center;
    let dir = &ray.dir;
    let mut best = None;

    // The cone touches both spheres on circles shifted along the axis.
    let shift = bottom_radius * sin_a;
    let cone_half_height = half_height + (top_radius * sin_a - shift) * 0.5;
    let cone_top = top_radius * cos_a;
    let cone_bottom = bottom_radius * cos_a;
    let radius_diff = cone_top - cone_bottom;

    let f1 = cone_bottom * radius_diff / cone_half_height;
    let f2 = (radius_diff * radius_diff) / (4.0 * cone_half_height * cone_half_height);
    let f3 = origin.y + half_height - shift;

    let a = dir.x * dir.x + dir.z * dir.z - f2 * dir.y * dir.y;
    let b = 2.0 * (origin.x * dir.x + origin.z * dir.z) - dir.y * (f2 * 2.0 * f3 + f1);
    let c = origin.x * origin.x + origin.z * origin.z
        - cone_bottom * cone_bottom
        - f3 * (f1 + f2 * f3);

    if let Some(roots) = quadratic_roots(a, b, c) {
        for lambda in roots {
            if lambda >= 0.0 {
                let y = f3 + dir.y * lambda;

                if y > 0.0 && y < 2.0 * cone_half_height {
                    best = nearest_hit(best, lambda);
                }
            }
        }
    }

    let local_ray = Ray::new(Point::from(origin), *dir);

    for (y, radius) in [(half_height, top_radius), (-half_height, bottom_radius)] {
        if let Some(lambda) = ray_hits_sphere(&local_ray, &Point::new(0.0, y, 0.0), radius) {
            best = nearest_hit(best, lambda);
        }
    }

    best
}
