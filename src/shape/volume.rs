use crate::math::{Point, Real, Vector};
use crate::query::{Ray, SweepHit};
use crate::shape::{
    Capsule, CollisionVolumeVisitor, Cuboid, Cylinder, Frustum, Sphere, Triangle,
};
use downcast_rs::{impl_downcast, DowncastSync};
use num_derive::FromPrimitive;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
/// Enum representing the type of a collision volume.
pub enum VolumeType {
    /// A sphere.
    Sphere = 0,
    /// A possibly tapered cylinder.
    Cylinder,
    /// A possibly tapered capsule.
    Capsule,
    /// A possibly oriented box.
    Cuboid,
    /// A triangle.
    Triangle,
    /// A view frustum.
    Frustum,
}

#[derive(Copy, Clone, Debug)]
/// Enum representing the collision volume with its actual type.
pub enum TypedVolume<'a> {
    /// A sphere.
    Sphere(&'a Sphere),
    /// A possibly tapered cylinder.
    Cylinder(&'a Cylinder),
    /// A possibly tapered capsule.
    Capsule(&'a Capsule),
    /// A possibly oriented box.
    Cuboid(&'a Cuboid),
    /// A triangle.
    Triangle(&'a Triangle),
    /// A view frustum.
    Frustum(&'a Frustum),
}

/// Errors raised when building a collision volume.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum VolumeError {
    /// The frustum planes do not bound a finite region.
    #[error("the frustum planes do not enclose a finite region")]
    DegenerateFrustum,
}

/// Trait implemented by all collision volumes.
///
/// Collisions between two volumes of unknown concrete types are resolved by
/// double dispatch: [`CollisionVolume::volume_hits_volume`] calls the
/// `*_hits_volume` method of the other volume matching the concrete type of
/// `self`. Every pair of volume kinds is answered by exactly one of the two
/// implementations, the other one forwarding to it.
///
/// Swept tests move one volume by a displacement against the other,
/// stationary, volume. When answered by the other volume, the displacement
/// is negated and so is the resulting normal (see [`SweepHit::swapped`]).
///
/// Pairs without an exact algorithm report no collision.
pub trait CollisionVolume: DowncastSync {
    /// The type of this volume.
    fn volume_type(&self) -> VolumeType;

    /// Gets a reference to the concrete volume behind this trait object.
    fn as_typed_volume(&self) -> TypedVolume<'_>;

    /// Does this volume intersect `other`? Touching volumes intersect.
    fn volume_hits_volume(&self, other: &dyn CollisionVolume) -> bool;

    /// First contact of this volume moving by `displacement` against the
    /// stationary `other`.
    fn volume_move_hits_volume(
        &self,
        other: &dyn CollisionVolume,
        displacement: &Vector,
    ) -> Option<SweepHit>;

    /// Does `sphere` intersect this volume?
    fn sphere_hits_volume(&self, sphere: &Sphere) -> bool;

    /// Does `cylinder` intersect this volume?
    fn cylinder_hits_volume(&self, cylinder: &Cylinder) -> bool;

    /// Does `capsule` intersect this volume?
    fn capsule_hits_volume(&self, capsule: &Capsule) -> bool;

    /// Does `cuboid` intersect this volume?
    fn cuboid_hits_volume(&self, cuboid: &Cuboid) -> bool;

    /// Does `triangle` intersect this volume?
    fn triangle_hits_volume(&self, triangle: &Triangle) -> bool;

    /// Does `frustum` intersect this volume?
    fn frustum_hits_volume(&self, frustum: &Frustum) -> bool;

    /// First contact of `sphere` moving by `displacement` against this volume.
    fn sphere_move_hits_volume(&self, sphere: &Sphere, displacement: &Vector) -> Option<SweepHit>;

    /// First contact of `cylinder` moving by `displacement` against this volume.
    fn cylinder_move_hits_volume(
        &self,
        cylinder: &Cylinder,
        displacement: &Vector,
    ) -> Option<SweepHit>;

    /// First contact of `capsule` moving by `displacement` against this volume.
    fn capsule_move_hits_volume(
        &self,
        capsule: &Capsule,
        displacement: &Vector,
    ) -> Option<SweepHit>;

    /// First contact of `cuboid` moving by `displacement` against this volume.
    fn cuboid_move_hits_volume(&self, cuboid: &Cuboid, displacement: &Vector) -> Option<SweepHit>;

    /// First contact of `triangle` moving by `displacement` against this volume.
    fn triangle_move_hits_volume(
        &self,
        triangle: &Triangle,
        displacement: &Vector,
    ) -> Option<SweepHit>;

    /// First contact of `frustum` moving by `displacement` against this volume.
    fn frustum_move_hits_volume(
        &self,
        frustum: &Frustum,
        displacement: &Vector,
    ) -> Option<SweepHit>;

    /// First contact of `point` moving by `displacement` against this volume.
    ///
    /// The default implementation casts the displacement as a ray and takes
    /// the normal at the hit point. A point starting inside the volume hits
    /// at time zero.
    fn point_move_hits_volume(&self, point: &Point, displacement: &Vector) -> Option<SweepHit> {
        if self.is_point_inside(point) {
            return Some(SweepHit::new(0.0, self.normal_at_point(point)));
        }

        let toi = self
            .ray_hits_volume(&Ray::new(*point, *displacement))
            .filter(|toi| *toi < 1.0)?;
        let hit = point + displacement * toi;
        Some(SweepHit::new(toi, self.normal_at_point(&hit)))
    }

    /// A sphere enclosing this volume. Never smaller than the volume.
    fn enclosing_sphere(&self) -> Sphere;

    /// An axis-aligned box enclosing this volume. Never smaller than the volume.
    fn enclosing_box(&self) -> Cuboid;

    /// Is `point` inside this volume? Points on the surface are inside.
    fn is_point_inside(&self, point: &Point) -> bool;

    /// Closest point on this volume to `point`.
    ///
    /// Solid volumes return points located inside them unchanged.
    fn closest_point_to(&self, point: &Point) -> Point;

    /// Unit surface normal of this volume at, or nearest to, `point`.
    fn normal_at_point(&self, point: &Point) -> Vector;

    /// Distance along `ray` to this volume, in multiples of the ray direction.
    fn ray_hits_volume(&self, ray: &Ray) -> Option<Real>;

    /// Calls the visitor method matching the concrete type of this volume.
    fn visit(&self, visitor: &mut dyn CollisionVolumeVisitor);
}

impl_downcast!(sync CollisionVolume);

impl dyn CollisionVolume {
    /// Converts this abstract volume to the given concrete volume, if it is one.
    pub fn as_volume<T: CollisionVolume>(&self) -> Option<&T> {
        self.downcast_ref()
    }

    /// Converts this abstract volume to a sphere, if it is one.
    pub fn as_sphere(&self) -> Option<&Sphere> {
        self.downcast_ref()
    }

    /// Converts this abstract volume to a cylinder, if it is one.
    pub fn as_cylinder(&self) -> Option<&Cylinder> {
        self.downcast_ref()
    }

    /// Converts this abstract volume to a capsule, if it is one.
    pub fn as_capsule(&self) -> Option<&Capsule> {
        self.downcast_ref()
    }

    /// Converts this abstract volume to a box, if it is one.
    pub fn as_cuboid(&self) -> Option<&Cuboid> {
        self.downcast_ref()
    }

    /// Converts this abstract volume to a triangle, if it is one.
    pub fn as_triangle(&self) -> Option<&Triangle> {
        self.downcast_ref()
    }

    /// Converts this abstract volume to a frustum, if it is one.
    pub fn as_frustum(&self) -> Option<&Frustum> {
        self.downcast_ref()
    }
}

/// Reports a pair of volume kinds without collision algorithm.
#[inline]
pub(crate) fn unsupported_pair(volume: VolumeType, other: VolumeType) -> bool {
    log::trace!(
        "No collision test between {:?} and {:?}, reporting no collision.",
        volume,
        other
    );
    false
}

/// Reports a pair of volume kinds without swept collision algorithm.
#[inline]
pub(crate) fn unsupported_move(moving: VolumeType, stationary: VolumeType) -> Option<SweepHit> {
    log::trace!(
        "No swept test of {:?} against {:?}, reporting no collision.",
        moving,
        stationary
    );
    None
}
