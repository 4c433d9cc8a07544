use crate::math::{Point, Real, Vector, RAY_EPSILON};
use crate::query::{nearest_hit, Ray};

/// Distance along `ray` to the surface of an axis-aligned box.
///
/// The box is given by its `center` and its non-negative `half_extents`.
/// Each face is tested separately and the nearest hit is kept, so a ray
/// starting inside the box reports the distance to its exit face.
pub fn ray_hits_box(ray: &Ray, center: &Point, half_extents: &Vector) -> Option<Real> {
    let origin = ray.origin - center;
    let mut best = None;

    for i in 0..3 {
        if ray.dir[i].abs() <= RAY_EPSILON {
            continue;
        }

        let (j, k) = ((i + 1) % 3, (i + 2) % 3);
        let inv_dir = 1.0 / ray.dir[i];

        for face in [half_extents[i], -half_extents[i]] {
            let lambda = (face - origin[i]) * inv_dir;

            if lambda < 0.0 {
                continue;
            }

            let hit_j = origin[j] + ray.dir[j] * lambda;
            let hit_k = origin[k] + ray.dir[k] * lambda;

            if hit_j.abs() <= half_extents[j] && hit_k.abs() <= half_extents[k] {
                best = nearest_hit(best, lambda);
            }
        }
    }

    best
}

#[cfg(test)]
mod test {
    use super::ray_hits_box;
    use crate::math::{Point, Vector};
    use crate::query::Ray;

    #[test]
    fn ray_hits_box_nearest_face() {
        let ray = Ray::new(Point::new(-5.0, 0.5, 0.0), Vector::x());
        let hit = ray_hits_box(&ray, &Point::origin(), &Vector::repeat(1.0)).unwrap();
        assert_relative_eq!(hit, 4.0);
    }

    #[test]
    fn ray_misses_box_sideways() {
        let ray = Ray::new(Point::new(-5.0, 1.5, 0.0), Vector::x());
        assert_eq!(
            ray_hits_box(&ray, &Point::origin(), &Vector::repeat(1.0)),
            None
        );
    }

    #[test]
    fn ray_pointing_away_misses_box() {
        let ray = Ray::new(Point::new(-5.0, 0.0, 0.0), -Vector::x());
        assert_eq!(
            ray_hits_box(&ray, &Point::origin(), &Vector::repeat(1.0)),
            None
        );
    }
}
