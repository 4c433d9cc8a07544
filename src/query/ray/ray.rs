//! The ray structure shared by every ray cast.

use crate::math::{Point, Real, Vector, RAY_EPSILON};

/// A ray for ray-casting queries.
///
/// A ray is a half-infinite line starting at `origin` and extending along
/// `dir`. Points along the ray are `origin + dir * t` for `t >= 0`. The
/// direction does not need to be normalized: hit distances are expressed in
/// multiples of `dir`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point,
    /// Direction of the ray.
    pub dir: Vector,
}

impl Ray {
    /// Creates a new ray starting from `origin` and with the direction `dir`.
    #[inline]
    pub fn new(origin: Point, dir: Vector) -> Ray {
        Ray { origin, dir }
    }

    /// Translates this ray by the given vector. Its direction is left unchanged.
    #[inline]
    pub fn translate_by(&self, v: Vector) -> Self {
        Self::new(self.origin + v, self.dir)
    }

    /// Computes the point at the given parameter on this ray.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point {
        self.origin + self.dir * t
    }
}

/// Keeps the smallest of the recorded hit and `candidate`.
#[inline]
pub(crate) fn nearest_hit(best: Option<Real>, candidate: Real) -> Option<Real> {
    match best {
        Some(best) if best <= candidate => Some(best),
        _ => Some(candidate),
    }
}

/// Both roots of `a t² + b t + c = 0`.
///
/// Returns `None` if the discriminant is not strictly positive or if the
/// equation is not quadratic.
#[inline]
pub(crate) fn quadratic_roots(a: Real, b: Real, c: Real) -> Option<[Real; 2]> {
    let disc = b * b - 4.0 * a * c;

    if disc <= RAY_EPSILON || a.abs() <= RAY_EPSILON {
        return None;
    }

    let disc = disc.sqrt();
    Some([(disc - b) / (2.0 * a), -(disc + b) / (2.0 * a)])
}
