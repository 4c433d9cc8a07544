use crate::math::Point;

/// Three-way classification of a volume against another one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Intersection {
    /// The volume is fully contained in the other one.
    Inside,
    /// The volume straddles the boundary of the other one.
    Partial,
    /// The volumes do not overlap.
    Outside,
}

impl Intersection {
    /// Does this classification mean the volumes overlap?
    #[inline]
    pub fn intersects(self) -> bool {
        self != Intersection::Outside
    }
}

/// Classifies the box `[mins1, maxs1]` against the box `[mins2, maxs2]`.
///
/// Returns [`Intersection::Inside`] if the first box is contained in the
/// second one (touching faces included).
pub fn aabb_intersects_aabb(
    mins1: &Point,
    maxs1: &Point,
    mins2: &Point,
    maxs2: &Point,
) -> Intersection {
    for i in 0..3 {
        if maxs1[i] < mins2[i] || mins1[i] > maxs2[i] {
            return Intersection::Outside;
        }
    }

    for i in 0..3 {
        if mins1[i] < mins2[i] || maxs1[i] > maxs2[i] {
            return Intersection::Partial;
        }
    }

    Intersection::Inside
}
