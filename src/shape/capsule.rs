use crate::math::{Point, Real, Rotation, Vector, DEFAULT_EPSILON, TAPER_EPSILON};
use crate::query::details::{ray_hits_capsule, ray_hits_tapered_capsule, segment_segment_distance};
use crate::query::{Ray, SweepHit};
use crate::shape::local_frame::{profile_to_local, to_profile, LocalFrame};
use crate::shape::volume::{unsupported_move, unsupported_pair};
use crate::shape::{
    CollisionVolume, CollisionVolumeVisitor, Cuboid, Cylinder, Frustum, Sphere, Triangle,
    TypedVolume, VolumeType,
};

/// A capsule shape, possibly tapered, aligned with its local Y axis.
///
/// A capsule is the convex hull of a sphere of radius `bottom_radius` at
/// `-half_height` and a sphere of radius `top_radius` at `+half_height`
/// along its local Y axis.
#[derive(PartialEq, Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Capsule {
    frame: LocalFrame,
    half_height: Real,
    top_radius: Real,
    bottom_radius: Real,
}

impl Capsule {
    /// Creates a new capsule with the same radius at both ends.
    ///
    /// Negative dimensions are clamped to zero.
    pub fn new(center: Point, half_height: Real, radius: Real) -> Capsule {
        Self::new_tapered(center, half_height, radius, radius)
    }

    /// Creates a new capsule with different radii at its ends.
    pub fn new_tapered(
        center: Point,
        half_height: Real,
        top_radius: Real,
        bottom_radius: Real,
    ) -> Capsule {
        Capsule {
            frame: LocalFrame::new(center),
            half_height: half_height.max(0.0),
            top_radius: top_radius.max(0.0),
            bottom_radius: bottom_radius.max(0.0),
        }
    }

    /// Creates a new, possibly tapered, capsule rotated by `orientation`.
    pub fn with_orientation(
        center: Point,
        half_height: Real,
        top_radius: Real,
        bottom_radius: Real,
        orientation: Rotation,
    ) -> Capsule {
        let mut res = Self::new_tapered(center, half_height, top_radius, bottom_radius);
        res.set_orientation(orientation);
        res
    }

    /// The center of this capsule.
    #[inline]
    pub fn position(&self) -> &Point {
        &self.frame.origin
    }

    /// The orientation of this capsule.
    #[inline]
    pub fn orientation(&self) -> &Rotation {
        &self.frame.orientation
    }

    /// The three local axes of this capsule, in world space.
    #[inline]
    pub fn axes(&self) -> &[Vector; 3] {
        &self.frame.axes
    }

    /// Half the distance between the centers of the two end spheres.
    #[inline]
    pub fn half_height(&self) -> Real {
        self.half_height
    }

    /// The radius of the sphere at `+half_height`.
    #[inline]
    pub fn top_radius(&self) -> Real {
        self.top_radius
    }

    /// The radius of the sphere at `-half_height`.
    #[inline]
    pub fn bottom_radius(&self) -> Real {
        self.bottom_radius
    }

    /// The biggest of the two radii.
    #[inline]
    pub fn max_radius(&self) -> Real {
        self.top_radius.max(self.bottom_radius)
    }

    /// Do the two end radii differ?
    #[inline]
    pub fn is_tapered(&self) -> bool {
        (self.top_radius - self.bottom_radius).abs() > TAPER_EPSILON
    }

    /// Is this capsule rotated with respect to the world axes?
    #[inline]
    pub fn is_oriented(&self) -> bool {
        self.frame.oriented
    }

    /// Moves the center of this capsule.
    pub fn set_position(&mut self, position: Point) {
        self.frame.origin = position;
    }

    /// Sets the orientation of this capsule.
    pub fn set_orientation(&mut self, orientation: Rotation) {
        self.frame.set_orientation(orientation);
    }

    /// Aligns this capsule with the world axes.
    pub fn clear_orientation(&mut self) {
        self.frame.clear_orientation();
    }

    /// Sets the half height. Negative values are clamped to zero.
    pub fn set_half_height(&mut self, half_height: Real) {
        self.half_height = half_height.max(0.0);
    }

    /// Sets both radii. Negative values are clamped to zero.
    pub fn set_radius(&mut self, radius: Real) {
        self.set_top_radius(radius);
        self.set_bottom_radius(radius);
    }

    /// Sets the top radius. Negative values are clamped to zero.
    pub fn set_top_radius(&mut self, radius: Real) {
        self.top_radius = radius.max(0.0);
    }

    /// Sets the bottom radius. Negative values are clamped to zero.
    pub fn set_bottom_radius(&mut self, radius: Real) {
        self.bottom_radius = radius.max(0.0);
    }

    /// Transforms a world-space point into the local space of this capsule.
    #[inline]
    pub fn world_to_local(&self, point: &Point) -> Point {
        self.frame.world_to_local(point)
    }

    /// Transforms a point from the local space of this capsule into world space.
    #[inline]
    pub fn local_to_world(&self, point: &Point) -> Point {
        self.frame.local_to_world(point)
    }

    /// Rotates a world-space direction into the local space of this capsule.
    #[inline]
    pub fn normal_world_to_local(&self, normal: &Vector) -> Vector {
        self.frame.normal_world_to_local(normal)
    }

    /// Rotates a direction from the local space of this capsule into world space.
    #[inline]
    pub fn normal_local_to_world(&self, normal: &Vector) -> Vector {
        self.frame.normal_local_to_world(normal)
    }

    /// The world-space segment joining the centers of the end spheres.
    pub fn segment(&self) -> [Point; 2] {
        let offset = self.frame.axes[1] * self.half_height;
        [self.frame.origin - offset, self.frame.origin + offset]
    }

    /// Closest profile point to `q`, the outward profile normal there and the
    /// signed distance from the surface to `q`.
    fn profile_feature(&self, q: &Point) -> (Point, Vector, Real) {
        let h = self.half_height;
        let (rt, rb) = (self.top_radius, self.bottom_radius);

        let end_sphere = |y: Real, radius: Real| {
            let center = Point::new(0.0, y, 0.0);
            let diff = q - center;
            let dist = diff.norm();
            let dir = if dist > DEFAULT_EPSILON {
                diff / dist
            } else {
                Vector::y() * y.signum()
            };
            (center + dir * radius, dir, dist - radius)
        };

        // Angle between the cone side and the capsule axis.
        let sin_a = if h > DEFAULT_EPSILON {
            (rb - rt) / (2.0 * h)
        } else {
            Real::MAX
        };

        if sin_a.abs() >= 1.0 {
            // One end sphere contains the other one.
            return if rt > rb {
                end_sphere(h, rt)
            } else {
                end_sphere(-h, rb)
            };
        }

        let cos_a = (1.0 - sin_a * sin_a).sqrt();
        let side_normal = Vector::new(cos_a, sin_a, 0.0);
        let side_dir = Vector::new(-sin_a, cos_a, 0.0);
        let side_start = Point::new(0.0, -h, 0.0) + side_normal * rb;
        let along = (q - side_start).dot(&side_dir);

        if along <= 0.0 {
            end_sphere(-h, rb)
        } else if along >= 2.0 * h * cos_a {
            end_sphere(h, rt)
        } else {
            let dist = (q - side_start).dot(&side_normal);
            (q - side_normal * dist, side_normal, dist)
        }
    }
}

impl CollisionVolume for Capsule {
    fn volume_type(&self) -> VolumeType {
        VolumeType::Capsule
    }

    fn as_typed_volume(&self) -> TypedVolume<'_> {
        TypedVolume::Capsule(self)
    }

    fn volume_hits_volume(&self, other: &dyn CollisionVolume) -> bool {
        other.capsule_hits_volume(self)
    }

    fn volume_move_hits_volume(
        &self,
        other: &dyn CollisionVolume,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        other.capsule_move_hits_volume(self, displacement)
    }

    fn sphere_hits_volume(&self, sphere: &Sphere) -> bool {
        (self.closest_point_to(sphere.center()) - sphere.center()).norm_squared()
            <= sphere.squared_radius()
    }

    fn cylinder_hits_volume(&self, _cylinder: &Cylinder) -> bool {
        unsupported_pair(VolumeType::Capsule, VolumeType::Cylinder)
    }

    fn capsule_hits_volume(&self, capsule: &Capsule) -> bool {
        if self.is_tapered() || capsule.is_tapered() {
            return unsupported_pair(VolumeType::Capsule, VolumeType::Capsule);
        }

        let [a1, a2] = self.segment();
        let [b1, b2] = capsule.segment();
        segment_segment_distance(&a1, &a2, &b1, &b2) <= self.top_radius + capsule.top_radius
    }

    fn cuboid_hits_volume(&self, _cuboid: &Cuboid) -> bool {
        unsupported_pair(VolumeType::Capsule, VolumeType::Cuboid)
    }

    fn triangle_hits_volume(&self, _triangle: &Triangle) -> bool {
        unsupported_pair(VolumeType::Capsule, VolumeType::Triangle)
    }

    fn frustum_hits_volume(&self, _frustum: &Frustum) -> bool {
        unsupported_pair(VolumeType::Capsule, VolumeType::Frustum)
    }

    fn sphere_move_hits_volume(
        &self,
        _sphere: &Sphere,
        _displacement: &Vector,
    ) -> Option<SweepHit> {
        unsupported_move(VolumeType::Sphere, VolumeType::Capsule)
    }

    fn cylinder_move_hits_volume(
        &self,
        _cylinder: &Cylinder,
        _displacement: &Vector,
    ) -> Option<SweepHit> {
        unsupported_move(VolumeType::Cylinder, VolumeType::Capsule)
    }

    fn capsule_move_hits_volume(
        &self,
        _capsule: &Capsule,
        _displacement: &Vector,
    ) -> Option<SweepHit> {
        unsupported_move(VolumeType::Capsule, VolumeType::Capsule)
    }

    fn cuboid_move_hits_volume(
        &self,
        _cuboid: &Cuboid,
        _displacement: &Vector,
    ) -> Option<SweepHit> {
        unsupported_move(VolumeType::Cuboid, VolumeType::Capsule)
    }

    fn triangle_move_hits_volume(
        &self,
        _triangle: &Triangle,
        _displacement: &Vector,
    ) -> Option<SweepHit> {
        unsupported_move(VolumeType::Triangle, VolumeType::Capsule)
    }

    fn frustum_move_hits_volume(
        &self,
        _frustum: &Frustum,
        _displacement: &Vector,
    ) -> Option<SweepHit> {
        unsupported_move(VolumeType::Frustum, VolumeType::Capsule)
    }

    fn enclosing_sphere(&self) -> Sphere {
        Sphere::new(*self.position(), self.half_height + self.max_radius())
    }

    fn enclosing_box(&self) -> Cuboid {
        let axis = self.frame.axes[1];
        let half_size = axis.abs() * self.half_height + Vector::repeat(self.max_radius());
        Cuboid::new(*self.position(), half_size)
    }

    fn is_point_inside(&self, point: &Point) -> bool {
        let (profile, _) = to_profile(&self.world_to_local(point));
        self.profile_feature(&profile).2 <= 0.0
    }

    fn closest_point_to(&self, point: &Point) -> Point {
        let (profile, radial) = to_profile(&self.world_to_local(point));
        let (closest, _, dist) = self.profile_feature(&profile);

        if dist <= 0.0 {
            *point
        } else {
            self.local_to_world(&Point::from(profile_to_local(&closest.coords, &radial)))
        }
    }

    fn normal_at_point(&self, point: &Point) -> Vector {
        let (profile, radial) = to_profile(&self.world_to_local(point));
        let (_, normal, _) = self.profile_feature(&profile);
        self.normal_local_to_world(&profile_to_local(&normal, &radial))
    }

    fn ray_hits_volume(&self, ray: &Ray) -> Option<Real> {
        let (ray, center) = if self.is_oriented() {
            let local = Ray::new(
                self.world_to_local(&ray.origin),
                self.normal_world_to_local(&ray.dir),
            );
            (local, Point::origin())
        } else {
            (*ray, *self.position())
        };

        if self.is_tapered() {
            ray_hits_tapered_capsule(
                &ray,
                &center,
                self.half_height,
                self.top_radius,
                self.bottom_radius,
            )
        } else {
            ray_hits_capsule(&ray, &center, self.half_height, self.top_radius)
        }
    }

    fn visit(&self, visitor: &mut dyn CollisionVolumeVisitor) {
        visitor.visit_capsule(self)
    }
}
