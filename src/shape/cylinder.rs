//! Cylinders, possibly tapered, queried through their trapezoid profile.

use crate::math::{Point, Real, Rotation, Vector, DEFAULT_EPSILON, TAPER_EPSILON};
use crate::query::details::{closest_point_on_line, ray_hits_cylinder, ray_hits_tapered_cylinder};
use crate::query::{Ray, SweepHit};
use crate::shape::local_frame::{profile_to_local, to_profile, LocalFrame};
use crate::shape::volume::{unsupported_move, unsupported_pair};
use crate::shape::{
    Capsule, CollisionVolume, CollisionVolumeVisitor, Cuboid, Frustum, Sphere, Triangle,
    TypedVolume, VolumeType,
};

/// A cylinder shape, possibly tapered, with its principal axis aligned with
/// its local Y axis.
///
/// The radius varies linearly from `bottom_radius` at `-half_height` to
/// `top_radius` at `+half_height`.
#[derive(PartialEq, Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cylinder {
    frame: LocalFrame,
    half_height: Real,
    top_radius: Real,
    bottom_radius: Real,
}

impl Cylinder {
    /// Creates a new cylinder.
    ///
    /// Negative dimensions are clamped to zero.
    pub fn new(center: Point, half_height: Real, radius: Real) -> Cylinder {
        Self::new_tapered(center, half_height, radius, radius)
    }

    /// Creates a new cylinder with different top and bottom radii.
    pub fn new_tapered(
        center: Point,
        half_height: Real,
        top_radius: Real,
        bottom_radius: Real,
    ) -> Cylinder {
        Cylinder {
            frame: LocalFrame::new(center),
            half_height: half_height.max(0.0),
            top_radius: top_radius.max(0.0),
            bottom_radius: bottom_radius.max(0.0),
        }
    }

    /// Creates a new, possibly tapered, cylinder rotated by `orientation`.
    pub fn with_orientation(
        center: Point,
        half_height: Real,
        top_radius: Real,
        bottom_radius: Real,
        orientation: Rotation,
    ) -> Cylinder {
        let mut res = Self::new_tapered(center, half_height, top_radius, bottom_radius);
        res.set_orientation(orientation);
        res
    }

    /// The center of this cylinder.
    #[inline]
    pub fn position(&self) -> &Point {
        &self.frame.origin
    }

    /// The orientation of this cylinder.
    #[inline]
    pub fn orientation(&self) -> &Rotation {
        &self.frame.orientation
    }

    /// The three local axes of this cylinder, in world space.
    #[inline]
    pub fn axes(&self) -> &[Vector; 3] {
        &self.frame.axes
    }

    /// Half the height of this cylinder.
    #[inline]
    pub fn half_height(&self) -> Real {
        self.half_height
    }

    /// The radius of the top cap.
    #[inline]
    pub fn top_radius(&self) -> Real {
        self.top_radius
    }

    /// The radius of the bottom cap.
    #[inline]
    pub fn bottom_radius(&self) -> Real {
        self.bottom_radius
    }

    /// The biggest of the two radii.
    #[inline]
    pub fn max_radius(&self) -> Real {
        self.top_radius.max(self.bottom_radius)
    }

    /// Do the two cap radii differ?
    #[inline]
    pub fn is_tapered(&self) -> bool {
        (self.top_radius - self.bottom_radius).abs() > TAPER_EPSILON
    }

    /// Is this cylinder rotated with respect to the world axes?
    #[inline]
    pub fn is_oriented(&self) -> bool {
        self.frame.oriented
    }

    /// Moves the center of this cylinder.
    pub fn set_position(&mut self, position: Point) {
        self.frame.origin = position;
    }

    /// Sets the orientation of this cylinder.
    pub fn set_orientation(&mut self, orientation: Rotation) {
        self.frame.set_orientation(orientation);
    }

    /// Aligns this cylinder with the world axes.
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

    /// Transforms a world-space point into the local space of this cylinder.
    #[inline]
    pub fn world_to_local(&self, point: &Point) -> Point {
        self.frame.world_to_local(point)
    }

    /// Transforms a point from the local space of this cylinder into world space.
    #[inline]
    pub fn local_to_world(&self, point: &Point) -> Point {
        self.frame.local_to_world(point)
    }

    /// Rotates a world-space direction into the local space of this cylinder.
    #[inline]
    pub fn normal_world_to_local(&self, normal: &Vector) -> Vector {
        self.frame.normal_world_to_local(normal)
    }

    /// Rotates a direction from the local space of this cylinder into world space.
    #[inline]
    pub fn normal_local_to_world(&self, normal: &Vector) -> Vector {
        self.frame.normal_local_to_world(normal)
    }

    /// The radius at the local height `y`.
    #[inline]
    fn radius_at(&self, y: Real) -> Real {
        if self.half_height <= DEFAULT_EPSILON {
            self.max_radius()
        } else {
            let t = (y + self.half_height) / (2.0 * self.half_height);
            self.bottom_radius + (self.top_radius - self.bottom_radius) * t
        }
    }

    fn profile_contains(&self, q: &Point) -> bool {
        q.y.abs() <= self.half_height && q.x <= self.radius_at(q.y)
    }

    /// Closest point of the profile boundary to `q` and the outward normal of
    /// the feature it lies on.
    ///
    /// The profile is the trapezoid made of the bottom cap, the side and the
    /// top cap.
    fn profile_feature(&self, q: &Point) -> (Point, Vector) {
        let h = self.half_height;
        let bottom_center = Point::new(0.0, -h, 0.0);
        let bottom_rim = Point::new(self.bottom_radius, -h, 0.0);
        let top_center = Point::new(0.0, h, 0.0);
        let top_rim = Point::new(self.top_radius, h, 0.0);
        let side_normal = Vector::new(2.0 * h, self.bottom_radius - self.top_radius, 0.0)
            .try_normalize(DEFAULT_EPSILON)
            .unwrap_or_else(Vector::x);

        let features = [
            (bottom_center, bottom_rim, -Vector::y()),
            (top_center, top_rim, Vector::y()),
            (bottom_rim, top_rim, side_normal),
        ];

        let mut best = (*q, Vector::y(), Real::MAX);

        for (from, to, normal) in features {
            let closest = closest_point_on_line(&from, &to, q);
            let dist = (q - closest).norm_squared();

            if dist < best.2 {
                best = (closest, normal, dist);
            }
        }

        (best.0, best.1)
    }
}

impl CollisionVolume for Cylinder {
    fn volume_type(&self) -> VolumeType {
        VolumeType::Cylinder
    }

    fn as_typed_volume(&self) -> TypedVolume<'_> {
        TypedVolume::Cylinder(self)
    }

    fn volume_hits_volume(&self, other: &dyn CollisionVolume) -> bool {
        other.cylinder_hits_volume(self)
    }

    fn volume_move_hits_volume(
        &self,
        other: &dyn CollisionVolume,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        other.cylinder_move_hits_volume(self, displacement)
    }

    fn sphere_hits_volume(&self, sphere: &Sphere) -> bool {
        (self.closest_point_to(sphere.center()) - sphere.center()).norm_squared()
            <= sphere.squared_radius()
    }

    fn cylinder_hits_volume(&self, _cylinder: &Cylinder) -> bool {
        unsupported_pair(VolumeType::Cylinder, VolumeType::Cylinder)
    }

    fn capsule_hits_volume(&self, capsule: &Capsule) -> bool {
        capsule.cylinder_hits_volume(self)
    }

    fn cuboid_hits_volume(&self, _cuboid: &Cuboid) -> bool {
        unsupported_pair(VolumeType::Cylinder, VolumeType::Cuboid)
    }

    fn triangle_hits_volume(&self, _triangle: &Triangle) -> bool {
        unsupported_pair(VolumeType::Cylinder, VolumeType::Triangle)
    }

    fn frustum_hits_volume(&self, _frustum: &Frustum) -> bool {
        unsupported_pair(VolumeType::Cylinder, VolumeType::Frustum)
    }

    fn sphere_move_hits_volume(
        &self,
        _sphere: &Sphere,
        _displacement: &Vector,
    ) -> Option<SweepHit> {
        unsupported_move(VolumeType::Sphere, VolumeType::Cylinder)
    }

    fn cylinder_move_hits_volume(
        &self,
        _cylinder: &Cylinder,
        _displacement: &Vector,
    ) -> Option<SweepHit> {
        unsupported_move(VolumeType::Cylinder, VolumeType::Cylinder)
    }

    fn capsule_move_hits_volume(
        &self,
        capsule: &Capsule,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        capsule
            .cylinder_move_hits_volume(self, &-displacement)
            .map(SweepHit::swapped)
    }

    fn cuboid_move_hits_volume(
        &self,
        _cuboid: &Cuboid,
        _displacement: &Vector,
    ) -> Option<SweepHit> {
        unsupported_move(VolumeType::Cuboid, VolumeType::Cylinder)
    }

    fn triangle_move_hits_volume(
        &self,
        _triangle: &Triangle,
        _displacement: &Vector,
    ) -> Option<SweepHit> {
        unsupported_move(VolumeType::Triangle, VolumeType::Cylinder)
    }

    fn frustum_move_hits_volume(
        &self,
        _frustum: &Frustum,
        _displacement: &Vector,
    ) -> Option<SweepHit> {
        unsupported_move(VolumeType::Frustum, VolumeType::Cylinder)
    }

    fn enclosing_sphere(&self) -> Sphere {
        let radius = self.half_height.hypot(self.max_radius());
        Sphere::new(*self.position(), radius)
    }

    fn enclosing_box(&self) -> Cuboid {
        let axis = self.frame.axes[1];
        let max_radius = self.max_radius();
        let half_size = Vector::from_fn(|i, _| {
            axis[i].abs() * self.half_height
                + max_radius * (1.0 - axis[i] * axis[i]).max(0.0).sqrt()
        });
        Cuboid::new(*self.position(), half_size)
    }

    fn is_point_inside(&self, point: &Point) -> bool {
        let (profile, _) = to_profile(&self.world_to_local(point));
        self.profile_contains(&profile)
    }

    fn closest_point_to(&self, point: &Point) -> Point {
        let (profile, radial) = to_profile(&self.world_to_local(point));

        if self.profile_contains(&profile) {
            return *point;
        }

        let (closest, _) = self.profile_feature(&profile);
        self.local_to_world(&Point::from(profile_to_local(&closest.coords, &radial)))
    }

    fn normal_at_point(&self, point: &Point) -> Vector {
        let (profile, radial) = to_profile(&self.world_to_local(point));
        let (closest, feature_normal) = self.profile_feature(&profile);

        let normal = if self.profile_contains(&profile) {
            feature_normal
        } else {
            (profile - closest)
                .try_normalize(DEFAULT_EPSILON)
                .unwrap_or(feature_normal)
        };

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
            ray_hits_tapered_cylinder(
                &ray,
                &center,
                self.half_height,
                self.top_radius,
                self.bottom_radius,
            )
        } else {
            ray_hits_cylinder(&ray, &center, self.half_height, self.top_radius)
        }
    }

    fn visit(&self, visitor: &mut dyn CollisionVolumeVisitor) {
        visitor.visit_cylinder(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cylinder_point_queries() {
        let cylinder = Cylinder::new(Point::origin(), 1.0, 1.0);
        assert_relative_eq!(
            cylinder.closest_point_to(&Point::new(0.0, 0.5, 3.0)),
            Point::new(0.0, 0.5, 1.0)
        );
        assert_relative_eq!(
            cylinder.closest_point_to(&Point::new(3.0, 3.0, 0.0)),
            Point::new(1.0, 1.0, 0.0)
        );
        assert_relative_eq!(
            cylinder.normal_at_point(&Point::new(3.0, 3.0, 0.0)),
            Vector::new(1.0, 1.0, 0.0).normalize()
        );
        assert_relative_eq!(
            cylinder.normal_at_point(&Point::new(0.0, 0.9, 0.0)),
            Vector::y()
        );
        assert_relative_eq!(
            cylinder.normal_at_point(&Point::new(-0.95, 0.0, 0.0)),
            -Vector::x()
        );
    }

    #[test]
    fn cone_profile() {
        let cone = Cylinder::new_tapered(Point::origin(), 1.0, 0.0, 1.0);
        assert!(cone.is_tapered());
        assert!(cone.is_point_inside(&Point::new(0.2, 0.5, 0.0)));
        assert!(!cone.is_point_inside(&Point::new(0.4, 0.5, 0.0)));
        assert!(!cone.is_point_inside(&Point::new(0.0, 1.1, 0.0)));

        let side_normal = Vector::new(2.0, 1.0, 0.0).normalize();
        assert_relative_eq!(
            cone.normal_at_point(&Point::new(1.0, 1.0, 0.0)),
            side_normal,
            epsilon = 1.0e-5
        );
    }

    #[test]
    fn cylinder_collisions_and_bounds() {
        let cylinder = Cylinder::new(Point::origin(), 1.0, 1.0);
        assert!(cylinder.sphere_hits_volume(&Sphere::new(Point::new(1.5, 0.0, 0.0), 0.55)));
        assert!(!cylinder.sphere_hits_volume(&Sphere::new(Point::new(1.5, 0.0, 0.0), 0.4)));
        assert!(!cylinder.cylinder_hits_volume(&cylinder));

        assert_relative_eq!(cylinder.enclosing_sphere().radius(), Real::sqrt(2.0));
        assert_relative_eq!(*cylinder.enclosing_box().half_size(), Vector::repeat(1.0));

        let ray = Ray::new(Point::new(0.0, 5.0, 0.0), -Vector::y());
        assert_relative_eq!(cylinder.ray_hits_volume(&ray).unwrap(), 4.0, epsilon = 1.0e-5);
    }

    #[test]
    fn oriented_cylinder_encloses_its_rim() {
        let rotation = Rotation::from_axis_angle(&Vector::x_axis(), 0.7);
        let cylinder = Cylinder::with_orientation(Point::new(1.0, 2.0, 3.0), 2.0, 0.5, 1.0, rotation);
        let enclosing = cylinder.enclosing_box();

        for i in 0..16 {
            let angle = i as Real * 0.4;
            for (y, r) in [(2.0, 0.5), (-2.0, 1.0)] {
                let local = Point::new(angle.cos() * r, y, angle.sin() * r);
                let rim = cylinder.local_to_world(&local);
                assert!(enclosing.is_point_inside(&(rim * 0.999 + cylinder.position().coords * 0.001)));
            }
        }
    }
}
