use crate::math::{Point, Real};

/// Intersection test between two spheres. Touching spheres intersect.
#[inline]
pub fn sphere_hits_sphere(center1: &Point, radius1: Real, center2: &Point, radius2: Real) -> bool {
    let radius_sum = radius1 + radius2;
    (center2 - center1).norm_squared() <= radius_sum * radius_sum
}
