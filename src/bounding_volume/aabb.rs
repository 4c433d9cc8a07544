//! Axis Aligned Bounding Box.

use crate::bounding_volume::BoundingVolume;
use crate::math::{Point, Vector};
use crate::query::details::aabb_intersects_aabb;
use crate::query::Intersection;

/// An Axis-Aligned Bounding Box (AABB).
///
/// An AABB is defined by its minimum and maximum corners, with
/// `mins.x ≤ maxs.x`, `mins.y ≤ maxs.y` and `mins.z ≤ maxs.z`. It is the
/// bounding volume used to classify octree nodes.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point,
    /// The point with maximum coordinates.
    pub maxs: Point,
}

impl Aabb {
    /// Creates a new AABB.
    ///
    /// # Arguments:
    ///   - `mins` - position of the point with the smallest coordinates.
    ///   - `maxs` - position of the point with the highest coordinates. Each component of `mins`
    ///     must be smaller than the related components of `maxs`.
    #[inline]
    pub fn new(mins: Point, maxs: Point) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates a new AABB from its center and its half-extents.
    #[inline]
    pub fn from_half_extents(center: Point, half_extents: Vector) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Creates the smallest AABB enclosing all the given points.
    ///
    /// Returns `None` if there is no point.
    pub fn from_points<'a, I>(pts: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut it = pts.into_iter();
        let first = it.next()?;
        let mut res = Aabb::new(*first, *first);

        for pt in it {
            res.take_point(*pt);
        }

        Some(res)
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector {
        (self.maxs - self.mins) * 0.5
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector {
        self.maxs - self.mins
    }

    /// Enlarges this AABB so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point) {
        self.mins = self.mins.inf(&pt);
        self.maxs = self.maxs.sup(&pt);
    }

    /// Does this AABB contain the given point? Points on the boundary are inside.
    #[inline]
    pub fn contains_local_point(&self, point: &Point) -> bool {
        (0..3).all(|i| point[i] >= self.mins[i] && point[i] <= self.maxs[i])
    }

    /// Classifies this AABB against `other`.
    ///
    /// Returns [`Intersection::Inside`] if `self` is contained in `other`.
    #[inline]
    pub fn classify(&self, other: &Aabb) -> Intersection {
        aabb_intersects_aabb(&self.mins, &self.maxs, &other.mins, &other.maxs)
    }
}

impl BoundingVolume for Aabb {
    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    #[inline]
    fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }
}
