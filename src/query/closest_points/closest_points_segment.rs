use crate::math::{Point, Vector, DEFAULT_EPSILON};

/// Closest point to `point` on the segment `[from, to]`.
///
/// A degenerate segment collapses to `from`.
#[inline]
pub fn closest_point_on_line(from: &Point, to: &Point, point: &Point) -> Point {
    let dir = to - from;
    let len_squared = dir.norm_squared();

    if len_squared <= DEFAULT_EPSILON {
        return *from;
    }

    let lambda = dir.dot(&(point - from)) / len_squared;

    if lambda <= 0.0 {
        *from
    } else if lambda >= 1.0 {
        *to
    } else {
        from + dir * lambda
    }
}

/// Closest point to `point` on the infinite line through `origin` along `dir`.
///
/// The parameter is not clamped, the point may lie behind `origin`. A zero
/// direction collapses to `origin`.
#[inline]
pub fn closest_point_on_ray(origin: &Point, dir: &Vector, point: &Point) -> Point {
    let len_squared = dir.norm_squared();

    if len_squared <= DEFAULT_EPSILON {
        return *origin;
    }

    origin + dir * (dir.dot(&(point - origin)) / len_squared)
}
