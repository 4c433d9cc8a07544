use crate::math::{Real, Vector};

/// The first contact between a moving volume and a stationary one.
///
/// Swept tests return `Option<SweepHit>`: `None` means the moving volume
/// travels its whole displacement without hitting anything.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweepHit {
    /// Fraction of the displacement travelled before the contact, in `[0, 1)`.
    ///
    /// Zero means the volumes already overlap before moving.
    pub time_of_impact: Real,
    /// Unit contact normal pointing from the stationary volume toward the
    /// moving one.
    pub normal: Vector,
}

impl SweepHit {
    /// Creates a new sweep hit.
    #[inline]
    pub fn new(time_of_impact: Real, normal: Vector) -> Self {
        Self {
            time_of_impact,
            normal,
        }
    }

    /// The same hit seen from the other volume, i.e. with a negated normal.
    ///
    /// Used when a swept test is answered by swapping the roles of the
    /// moving and stationary volumes and negating the displacement.
    #[inline]
    #[must_use]
    pub fn swapped(self) -> Self {
        Self::new(self.time_of_impact, -self.normal)
    }

    /// The time of impact of an optional hit, `1.0` meaning no hit.
    #[inline]
    pub fn time_of_impact_or_one(hit: Option<SweepHit>) -> Real {
        hit.map_or(1.0, |hit| hit.time_of_impact)
    }
}
