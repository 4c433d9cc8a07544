use crate::math::{Point, Real, Vector, DEFAULT_EPSILON};
use crate::query::details::{ray_hits_sphere, sphere_hits_sphere, sphere_move_hits_sphere};
use crate::query::{Ray, SweepHit};
use crate::shape::{
    Capsule, CollisionVolume, CollisionVolumeVisitor, Cuboid, Cylinder, Frustum, Triangle,
    TypedVolume, VolumeType,
};

/// A sphere given by its center and radius.
///
/// The squared radius is cached and always equal to `radius * radius`.
#[derive(PartialEq, Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sphere {
    center: Point,
    radius: Real,
    squared_radius: Real,
}

impl Default for Sphere {
    /// A unit sphere at the origin.
    fn default() -> Self {
        Self::new(Point::origin(), 1.0)
    }
}

impl Sphere {
    /// Creates a new sphere. A negative radius is clamped to zero.
    #[inline]
    pub fn new(center: Point, radius: Real) -> Sphere {
        let radius = radius.max(0.0);
        Sphere {
            center,
            radius,
            squared_radius: radius * radius,
        }
    }

    /// The center of this sphere.
    #[inline]
    pub fn center(&self) -> &Point {
        &self.center
    }

    /// The radius of this sphere.
    #[inline]
    pub fn radius(&self) -> Real {
        self.radius
    }

    /// The squared radius of this sphere.
    #[inline]
    pub fn squared_radius(&self) -> Real {
        self.squared_radius
    }

    /// Moves the center of this sphere.
    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    /// Sets the radius of this sphere. A negative radius is clamped to zero.
    pub fn set_radius(&mut self, radius: Real) {
        self.radius = radius.max(0.0);
        self.squared_radius = self.radius * self.radius;
    }

    /// Sets both the center and the radius of this sphere.
    pub fn set_all(&mut self, center: Point, radius: Real) {
        self.set_center(center);
        self.set_radius(radius);
    }

    /// Translates this sphere.
    pub fn move_by(&mut self, offset: &Vector) {
        self.center += offset;
    }
}

impl CollisionVolume for Sphere {
    fn volume_type(&self) -> VolumeType {
        VolumeType::Sphere
    }

    fn as_typed_volume(&self) -> TypedVolume<'_> {
        TypedVolume::Sphere(self)
    }

    fn volume_hits_volume(&self, other: &dyn CollisionVolume) -> bool {
        other.sphere_hits_volume(self)
    }

    fn volume_move_hits_volume(
        &self,
        other: &dyn CollisionVolume,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        other.sphere_move_hits_volume(self, displacement)
    }

    fn sphere_hits_volume(&self, sphere: &Sphere) -> bool {
        sphere_hits_sphere(&self.center, self.radius, &sphere.center, sphere.radius)
    }

    fn cylinder_hits_volume(&self, cylinder: &Cylinder) -> bool {
        cylinder.sphere_hits_volume(self)
    }

    fn capsule_hits_volume(&self, capsule: &Capsule) -> bool {
        capsule.sphere_hits_volume(self)
    }

    fn cuboid_hits_volume(&self, cuboid: &Cuboid) -> bool {
        cuboid.sphere_hits_volume(self)
    }

    fn triangle_hits_volume(&self, triangle: &Triangle) -> bool {
        triangle.sphere_hits_volume(self)
    }

    fn frustum_hits_volume(&self, frustum: &Frustum) -> bool {
        frustum.sphere_hits_volume(self)
    }

    fn sphere_move_hits_volume(&self, sphere: &Sphere, displacement: &Vector) -> Option<SweepHit> {
        sphere_move_hits_sphere(
            &self.center,
            self.radius,
            &sphere.center,
            sphere.radius,
            displacement,
        )
    }

    fn cylinder_move_hits_volume(
        &self,
        cylinder: &Cylinder,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        cylinder
            .sphere_move_hits_volume(self, &-displacement)
            .map(SweepHit::swapped)
    }

    fn capsule_move_hits_volume(
        &self,
        capsule: &Capsule,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        capsule
            .sphere_move_hits_volume(self, &-displacement)
            .map(SweepHit::swapped)
    }

    fn cuboid_move_hits_volume(&self, cuboid: &Cuboid, displacement: &Vector) -> Option<SweepHit> {
        cuboid
            .sphere_move_hits_volume(self, &-displacement)
            .map(SweepHit::swapped)
    }

    fn triangle_move_hits_volume(
        &self,
        triangle: &Triangle,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        triangle
            .sphere_move_hits_volume(self, &-displacement)
            .map(SweepHit::swapped)
    }

    fn frustum_move_hits_volume(
        &self,
        frustum: &Frustum,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        frustum
            .sphere_move_hits_volume(self, &-displacement)
            .map(SweepHit::swapped)
    }

    fn point_move_hits_volume(&self, point: &Point, displacement: &Vector) -> Option<SweepHit> {
        // A point is a sphere without radius.
        sphere_move_hits_sphere(&self.center, self.radius, point, 0.0, displacement)
    }

    fn enclosing_sphere(&self) -> Sphere {
        *self
    }

    fn enclosing_box(&self) -> Cuboid {
        Cuboid::new(self.center, Vector::repeat(self.radius))
    }

    fn is_point_inside(&self, point: &Point) -> bool {
        (point - self.center).norm_squared() <= self.squared_radius
    }

    fn closest_point_to(&self, point: &Point) -> Point {
        let diff = point - self.center;

        if diff.norm_squared() <= self.squared_radius {
            *point
        } else {
            self.center + diff.normalize() * self.radius
        }
    }

    fn normal_at_point(&self, point: &Point) -> Vector {
        (point - self.center)
            .try_normalize(DEFAULT_EPSILON)
            .unwrap_or_else(Vector::y)
    }

    fn ray_hits_volume(&self, ray: &Ray) -> Option<Real> {
        ray_hits_sphere(ray, &self.center, self.radius)
    }

    fn visit(&self, visitor: &mut dyn CollisionVolumeVisitor) {
        visitor.visit_sphere(self)
    }
}
