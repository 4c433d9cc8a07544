use crate::math::{Point, Real, DEFAULT_EPSILON};
use na::RealField;

const ANGLE_SUM_TOLERANCE: Real = 0.005;

/// Tests if `p` lies inside the planar quad `(a, b, c, d)`.
///
/// The angles subtended by the four edges as seen from `p` sum to a full
/// turn if and only if `p` is inside the quad, up to a tolerance. Points
/// out of the quad plane subtend a smaller angle sum. A point on a corner
/// is inside.
pub fn point_in_quad(a: &Point, b: &Point, c: &Point, d: &Point, p: &Point) -> bool {
    let mut dirs = [a - p, b - p, c - p, d - p];

    for dir in &mut dirs {
        match dir.try_normalize(DEFAULT_EPSILON) {
            Some(unit) => *dir = unit,
            None => return true,
        }
    }

    let arc_sum: Real = (0..4)
        .map(|i| dirs[i].dot(&dirs[(i + 1) % 4]).clamp(-1.0, 1.0).acos())
        .sum();

    (arc_sum - Real::two_pi()).abs() <= ANGLE_SUM_TOLERANCE
}
