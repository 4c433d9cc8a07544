use crate::shape::{Capsule, Cuboid, Cylinder, Frustum, Sphere, Triangle};

/// Visitor of collision volumes, called back with the concrete volume type.
///
/// Every method does nothing by default, implementors override the ones
/// they care about.
pub trait CollisionVolumeVisitor {
    /// Visits a sphere.
    fn visit_sphere(&mut self, _sphere: &Sphere) {}

    /// Visits a cylinder.
    fn visit_cylinder(&mut self, _cylinder: &Cylinder) {}

    /// Visits a capsule.
    fn visit_capsule(&mut self, _capsule: &Capsule) {}

    /// Visits a box.
    fn visit_cuboid(&mut self, _cuboid: &Cuboid) {}

    /// Visits a triangle.
    fn visit_triangle(&mut self, _triangle: &Triangle) {}

    /// Visits a frustum.
    fn visit_frustum(&mut self, _frustum: &Frustum) {}
}
