use crate::math::{Point, Real, Vector, DEFAULT_EPSILON};
use crate::query::{quadratic_roots, SweepHit};

/// Time of impact of a sphere moving by `displacement` against a stationary one.
///
/// Spheres overlapping before moving hit at time zero, with a normal along
/// the center difference, or against the displacement if the centers
/// coincide.
pub fn sphere_move_hits_sphere(
    stationary_center: &Point,
    stationary_radius: Real,
    moving_center: &Point,
    moving_radius: Real,
    displacement: &Vector,
) -> Option<SweepHit> {
    let diff = moving_center - stationary_center;
    let radius_sum = stationary_radius + moving_radius;
    let rr = radius_sum * radius_sum;
    let dist_squared = diff.norm_squared();

    if dist_squared <= rr {
        let normal = if diff.norm() <= 1.0e-6 {
            -displacement
        } else {
            diff
        };
        let normal = normal.try_normalize(DEFAULT_EPSILON).unwrap_or_else(|| {
            log::debug!("Overlapping concentric spheres without displacement, using +Y as normal.");
            Vector::y()
        });
        return Some(SweepHit::new(0.0, normal));
    }

    let a = displacement.norm_squared();
    let b = diff.dot(displacement) * 2.0;
    let disc = b * b - a * (dist_squared - rr) * 4.0;

    if disc < 0.0 || a == 0.0 {
        return None;
    }

    let disc = disc.sqrt();
    let factor = 1.0 / (a * 2.0);
    let mut lambda = (-b - disc) * factor;

    if lambda < 0.0 {
        lambda = (-b + disc) * factor;
    }

    if lambda <= 0.0 || lambda >= 1.0 {
        return None;
    }

    let normal = (moving_center + displacement * lambda - stationary_center).normalize();
    Some(SweepHit::new(lambda, normal))
}

/// Earliest time at which `offset + velocity * t` reaches the length `radius`.
///
/// The result may lie outside of `[0, 1)`, callers filter it.
pub(crate) fn earliest_contact(offset: &Vector, velocity: &Vector, radius: Real) -> Option<Real> {
    let a = velocity.norm_squared();
    let b = 2.0 * offset.dot(velocity);
    let c = offset.norm_squared() - radius * radius;
    quadratic_roots(a, b, c).map(|[t1, t2]| t1.min(t2))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sphere_move_hits_sphere_head_on() {
        let hit = sphere_move_hits_sphere(
            &Point::new(10.0, 0.0, 0.0),
            1.0,
            &Point::origin(),
            1.0,
            &Vector::new(20.0, 0.0, 0.0),
        )
        .unwrap();

        assert_relative_eq!(hit.time_of_impact, 0.4, epsilon = 1.0e-5);
        assert_relative_eq!(hit.normal, -Vector::x(), epsilon = 1.0e-5);
    }

    #[test]
    fn sphere_move_hits_sphere_overlap_and_miss() {
        let hit = sphere_move_hits_sphere(
            &Point::origin(),
            1.0,
            &Point::new(0.0, 1.5, 0.0),
            1.0,
            &Vector::x(),
        )
        .unwrap();
        assert_eq!(hit.time_of_impact, 0.0);
        assert_relative_eq!(hit.normal, Vector::y());

        let concentric =
            sphere_move_hits_sphere(&Point::origin(), 1.0, &Point::origin(), 1.0, &Vector::x())
                .unwrap();
        assert_relative_eq!(concentric.normal, -Vector::x());

        // Too short.
        assert_eq!(
            sphere_move_hits_sphere(
                &Point::new(10.0, 0.0, 0.0),
                1.0,
                &Point::origin(),
                1.0,
                &Vector::new(5.0, 0.0, 0.0),
            ),
            None
        );

        // Passing by.
        assert_eq!(
            sphere_move_hits_sphere(
                &Point::new(10.0, 3.0, 0.0),
                1.0,
                &Point::origin(),
                1.0,
                &Vector::new(20.0, 0.0, 0.0),
            ),
            None
        );
    }
}
