/// Coarse volume used to cull the exact collision tests.
///
/// Implementors answer overlap and inclusion queries in constant time.
pub trait BoundingVolume {
    /// Do `self` and `other` overlap? Touching volumes overlap.
    fn intersects(&self, other: &Self) -> bool;

    /// Is `other` fully inside `self`?
    fn contains(&self, other: &Self) -> bool;
}
