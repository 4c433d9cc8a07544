use crate::math::{Point, Real, DEFAULT_EPSILON, RAY_EPSILON};
use crate::query::{nearest_hit, quadratic_roots, Ray};

/// Distance along `ray` to the surface of a Y-aligned cylinder.
///
/// The cylinder is centered on `center`, extends `half_height` along `+Y`
/// and `-Y` and has the given `radius`.
pub fn ray_hits_cylinder(
    ray: &Ray,
    center: &Point,
    half_height: Real,
    radius: Real,
) -> Option<Real> {
    ray_hits_tapered_cylinder(ray, center, half_height, radius, radius)
}

/// Distance along `ray` to the surface of a Y-aligned tapered cylinder.
///
/// The radius varies linearly from `bottom_radius` at `-half_height` to
/// `top_radius` at `+half_height`. A cylinder without height only exposes
/// its two caps.
pub fn ray_hits_tapered_cylinder(
    ray: &Ray,
    center: &Point,
    half_height: Real,
    top_radius: Real,
    bottom_radius: Real,
) -> Option<Real> {
    let origin = ray.origin - center;
    let dir = &ray.dir;
    let mut best = None;

    // Hull.
    if half_height > DEFAULT_EPSILON {
        let radius_diff = top_radius - bottom_radius;
        let f1 = bottom_radius * radius_diff / half_height;
        let f2 = (radius_diff * radius_diff) / (4.0 * half_height * half_height);
        let f3 = origin.y + half_height;

        let a = dir.x * dir.x + dir.z * dir.z - f2 * dir.y * dir.y;
        let b = 2.0 * (origin.x * dir.x + origin.z * dir.z) - dir.y * (f2 * 2.0 * f3 + f1);
        let c = origin.x * origin.x + origin.z * origin.z
            - bottom_radius * bottom_radius
            - f3 * (f1 + f2 * f3);

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
    }

    // Caps.
    if dir.y.abs() > RAY_EPSILON {
        let inv_dir = 1.0 / dir.y;

        for (y, radius) in [(half_height, top_radius), (-half_height, bottom_radius)] {
            let lambda = (y - origin.y) * inv_dir;

            if lambda >= 0.0 {
                let x = origin.x + dir.x * lambda;
                let z = origin.z + dir.z * lambda;

                if x * x + z * z <= radius * radius {
                    best = nearest_hit(best, lambda);
                }
            }
        }
    }

    best
}
