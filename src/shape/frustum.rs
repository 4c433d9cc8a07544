//! View frustum bounded by six planes.

use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Matrix4, Point, Real, Vector, DEFAULT_EPSILON, PLANE_EPSILON, RAY_EPSILON};
use crate::query::{Intersection, Ray, SweepHit};
use crate::shape::volume::{unsupported_move, unsupported_pair};
use crate::shape::{
    Capsule, CollisionVolume, CollisionVolumeVisitor, Cuboid, Cylinder, Sphere, Triangle,
    TypedVolume, VolumeError, VolumeType,
};
use na::Vector4;

const LEFT: usize = 0;
const RIGHT: usize = 1;
const TOP: usize = 2;
const BOTTOM: usize = 3;
const NEAR: usize = 4;
const FAR: usize = 5;

/// A plane of a frustum.
///
/// Points `p` with `normal.dot(p) >= distance` lie on the inner side of the
/// plane.
#[derive(PartialEq, Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrustumPlane {
    /// The unit normal of this plane, pointing into the frustum.
    pub normal: Vector,
    /// The signed distance of this plane to the origin, along `normal`.
    pub distance: Real,
}

impl FrustumPlane {
    /// Creates a plane from its inward unit normal and its distance to the origin.
    #[inline]
    pub fn new(normal: Vector, distance: Real) -> Self {
        Self { normal, distance }
    }

    /// Creates the plane `a x + b y + c z + d >= 0` from its homogeneous
    /// coefficients `(a, b, c, d)`.
    ///
    /// Returns `None` if `(a, b, c)` is zero.
    pub fn from_coefficients(coefficients: &Vector4<Real>) -> Option<Self> {
        let normal = coefficients.xyz();
        let length = normal.norm();

        if length <= DEFAULT_EPSILON {
            return None;
        }

        Some(Self::new(normal / length, -coefficients.w / length))
    }

    /// Signed distance from this plane to `point`, positive on the inner side.
    #[inline]
    pub fn signed_distance(&self, point: &Point) -> Real {
        self.normal.dot(&point.coords) - self.distance
    }
}

/// A convex view frustum.
///
/// The planes are stored in the left, right, top, bottom, near, far order
/// and their normals point into the frustum. The eight corners are computed
/// once when the planes are set.
#[derive(PartialEq, Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frustum {
    planes: [FrustumPlane; 6],
    corners: [Point; 8],
}

impl Frustum {
    /// Extracts the frustum of a view-projection matrix.
    ///
    /// The matrix maps world-space points to clip space with the OpenGL
    /// convention (`-w <= x, y, z <= w`), as built by
    /// [`na::Perspective3`] or [`na::Orthographic3`] multiplied with a view
    /// matrix.
    pub fn from_view_projection(view_projection: &Matrix4) -> Result<Self, VolumeError> {
        let row = |i: usize| view_projection.row(i).transpose();
        let (x, y, z, w) = (row(0), row(1), row(2), row(3));
        let coefficients = [w + x, w - x, w - y, w + y, w + z, w - z];

        let mut planes = [FrustumPlane::new(Vector::zeros(), 0.0); 6];

        for (plane, coeffs) in planes.iter_mut().zip(coefficients.iter()) {
            *plane = FrustumPlane::from_coefficients(coeffs).ok_or_else(|| {
                log::debug!("Degenerate frustum plane {:?}.", coeffs);
                VolumeError::DegenerateFrustum
            })?;
        }

        Self::from_planes(planes)
    }

    /// Creates a frustum from its six planes, in the left, right, top,
    /// bottom, near, far order.
    ///
    /// Fails if three of the planes do not meet at a single corner.
    pub fn from_planes(planes: [FrustumPlane; 6]) -> Result<Self, VolumeError> {
        let mut corners = [Point::origin(); 8];
        let mut i = 0;

        for depth in [NEAR, FAR] {
            for vertical in [BOTTOM, TOP] {
                for horizontal in [LEFT, RIGHT] {
                    corners[i] =
                        planes_intersection(&planes[depth], &planes[vertical], &planes[horizontal])
                            .ok_or_else(|| {
                                log::debug!("Frustum planes {:?} have no finite corner.", planes);
                                VolumeError::DegenerateFrustum
                            })?;
                    i += 1;
                }
            }
        }

        Ok(Self { planes, corners })
    }

    /// Replaces the planes of this frustum by those of `view_projection`.
    ///
    /// This frustum is left unchanged on failure.
    pub fn set_view_projection(&mut self, view_projection: &Matrix4) -> Result<(), VolumeError> {
        *self = Self::from_view_projection(view_projection)?;
        Ok(())
    }

    /// The six planes of this frustum.
    #[inline]
    pub fn planes(&self) -> &[FrustumPlane; 6] {
        &self.planes
    }

    /// The left plane.
    #[inline]
    pub fn left(&self) -> &FrustumPlane {
        &self.planes[LEFT]
    }

    /// The right plane.
    #[inline]
    pub fn right(&self) -> &FrustumPlane {
        &self.planes[RIGHT]
    }

    /// The top plane.
    #[inline]
    pub fn top(&self) -> &FrustumPlane {
        &self.planes[TOP]
    }

    /// The bottom plane.
    #[inline]
    pub fn bottom(&self) -> &FrustumPlane {
        &self.planes[BOTTOM]
    }

    /// The near plane.
    #[inline]
    pub fn near(&self) -> &FrustumPlane {
        &self.planes[NEAR]
    }

    /// The far plane.
    #[inline]
    pub fn far(&self) -> &FrustumPlane {
        &self.planes[FAR]
    }

    /// The eight corners of this frustum.
    ///
    /// The four near corners come first, then the four far ones, each in
    /// the bottom-left, bottom-right, top-left, top-right order.
    #[inline]
    pub fn corners(&self) -> &[Point; 8] {
        &self.corners
    }

    /// Classifies the sphere with the given `center` and `radius` against
    /// this frustum.
    pub fn intersect_sphere(&self, center: &Point, radius: Real) -> Intersection {
        let mut res = Intersection::Inside;

        for plane in &self.planes {
            let dist = plane.signed_distance(center);

            if dist < -radius {
                return Intersection::Outside;
            } else if dist < radius {
                res = Intersection::Partial;
            }
        }

        res
    }

    /// Classifies the axis-aligned box `[mins, maxs]` against this frustum.
    pub fn intersect_aabb(&self, mins: &Point, maxs: &Point) -> Intersection {
        let center = na::center(mins, maxs);
        let half_extents = (maxs - mins) * 0.5;
        let mut res = Intersection::Inside;

        for plane in &self.planes {
            let radius = plane.normal.abs().dot(&half_extents);
            let dist = plane.signed_distance(&center);

            if dist < -radius {
                return Intersection::Outside;
            } else if dist < radius {
                res = Intersection::Partial;
            }
        }

        res
    }

    fn corners_aabb(&self) -> Aabb {
        let mut aabb = Aabb::new(self.corners[0], self.corners[0]);

        for corner in &self.corners[1..] {
            aabb.take_point(*corner);
        }

        aabb
    }

    fn contains_with_margin(&self, point: &Point, margin: Real) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(point) >= -margin)
    }

    /// Projection of `point` on the line where two planes meet.
    fn project_on_edge(a: &FrustumPlane, b: &FrustumPlane, point: &Point) -> Option<Point> {
        // Solves for `point + s a.normal + t b.normal` lying on both planes.
        let cos = a.normal.dot(&b.normal);
        let det = 1.0 - cos * cos;

        if det <= PLANE_EPSILON {
            return None;
        }

        let da = -a.signed_distance(point);
        let db = -b.signed_distance(point);
        let s = (da - cos * db) / det;
        let t = (db - cos * da) / det;
        Some(point + a.normal * s + b.normal * t)
    }
}

/// The point where three planes meet, if they meet at a single point.
fn planes_intersection(a: &FrustumPlane, b: &FrustumPlane, c: &FrustumPlane) -> Option<Point> {
    let bc = b.normal.cross(&c.normal);
    let det = a.normal.dot(&bc);

    if det.abs() <= PLANE_EPSILON {
        return None;
    }

    let coords = (bc * a.distance
        + c.normal.cross(&a.normal) * b.distance
        + a.normal.cross(&b.normal) * c.distance)
        / det;
    Some(Point::from(coords))
}

impl CollisionVolume for Frustum {
    fn volume_type(&self) -> VolumeType {
        VolumeType::Frustum
    }

    fn as_typed_volume(&self) -> TypedVolume<'_> {
        TypedVolume::Frustum(self)
    }

    fn volume_hits_volume(&self, other: &dyn CollisionVolume) -> bool {
        other.frustum_hits_volume(self)
    }

    fn volume_move_hits_volume(
        &self,
        other: &dyn CollisionVolume,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        other.frustum_move_hits_volume(self, displacement)
    }

    fn sphere_hits_volume(&self, sphere: &Sphere) -> bool {
        self.intersect_sphere(sphere.center(), sphere.radius())
            .intersects()
    }

    fn cylinder_hits_volume(&self, cylinder: &Cylinder) -> bool {
        cylinder.frustum_hits_volume(self)
    }

    fn capsule_hits_volume(&self, capsule: &Capsule) -> bool {
        capsule.frustum_hits_volume(self)
    }

    fn cuboid_hits_volume(&self, cuboid: &Cuboid) -> bool {
        self.corners_aabb().intersects(&cuboid.aabb())
            && self.planes.iter().all(|plane| {
                plane.signed_distance(cuboid.center()) >= -cuboid.project_extents(&plane.normal)
            })
    }

    fn triangle_hits_volume(&self, _triangle: &Triangle) -> bool {
        unsupported_pair(VolumeType::Frustum, VolumeType::Triangle)
    }

    fn frustum_hits_volume(&self, _frustum: &Frustum) -> bool {
        unsupported_pair(VolumeType::Frustum, VolumeType::Frustum)
    }

    fn sphere_move_hits_volume(
        &self,
        _sphere: &Sphere,
        _displacement: &Vector,
    ) -> Option<SweepHit> {
        unsupported_move(VolumeType::Sphere, VolumeType::Frustum)
    }

    fn cylinder_move_hits_volume(
        &self,
        cylinder: &Cylinder,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        cylinder
            .frustum_move_hits_volume(self, &-displacement)
            .map(SweepHit::swapped)
    }

    fn capsule_move_hits_volume(
        &self,
        capsule: &Capsule,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        capsule
            .frustum_move_hits_volume(self, &-displacement)
            .map(SweepHit::swapped)
    }

    fn cuboid_move_hits_volume(
        &self,
        _cuboid: &Cuboid,
        _displacement: &Vector,
    ) -> Option<SweepHit> {
        unsupported_move(VolumeType::Cuboid, VolumeType::Frustum)
    }

    fn triangle_move_hits_volume(
        &self,
        _triangle: &Triangle,
        _displacement: &Vector,
    ) -> Option<SweepHit> {
        unsupported_move(VolumeType::Triangle, VolumeType::Frustum)
    }

    fn frustum_move_hits_volume(
        &self,
        _frustum: &Frustum,
        _displacement: &Vector,
    ) -> Option<SweepHit> {
        unsupported_move(VolumeType::Frustum, VolumeType::Frustum)
    }

    fn enclosing_sphere(&self) -> Sphere {
        let center = crate::utils::center(&self.corners);
        let radius = self
            .corners
            .iter()
            .map(|corner| na::distance(&center, corner))
            .fold(0.0, Real::max);
        Sphere::new(center, radius)
    }

    fn enclosing_box(&self) -> Cuboid {
        let aabb = self.corners_aabb();
        Cuboid::from_extents(&aabb.mins, &aabb.maxs)
    }

    fn is_point_inside(&self, point: &Point) -> bool {
        self.contains_with_margin(point, 0.0)
    }

    fn closest_point_to(&self, point: &Point) -> Point {
        if self.is_point_inside(point) {
            return *point;
        }

        // The closest point lies on a face, an edge or a corner. Keep the
        // nearest projection that is actually on the frustum.
        let mut best = None;
        let mut best_dist = Real::MAX;
        let mut keep = |candidate: Point| {
            let dist = na::distance_squared(point, &candidate);

            if dist < best_dist && self.contains_with_margin(&candidate, PLANE_EPSILON) {
                best_dist = dist;
                best = Some(candidate);
            }
        };

        for plane in &self.planes {
            keep(point - plane.normal * plane.signed_distance(point));
        }

        for (i, a) in self.planes.iter().enumerate() {
            for b in &self.planes[i + 1..] {
                if let Some(candidate) = Self::project_on_edge(a, b, point) {
                    keep(candidate);
                }
            }
        }

        for corner in &self.corners {
            keep(*corner);
        }

        best.unwrap_or(self.corners[0])
    }

    fn normal_at_point(&self, point: &Point) -> Vector {
        let nearest = self
            .planes
            .iter()
            .min_by(|a, b| {
                a.signed_distance(point)
                    .abs()
                    .total_cmp(&b.signed_distance(point).abs())
            })
            .map(|plane| -plane.normal)
            .unwrap_or_else(Vector::z);

        if self.is_point_inside(point) {
            nearest
        } else {
            (point - self.closest_point_to(point))
                .try_normalize(DEFAULT_EPSILON)
                .unwrap_or(nearest)
        }
    }

    fn ray_hits_volume(&self, ray: &Ray) -> Option<Real> {
        let mut enter = Real::NEG_INFINITY;
        let mut exit = Real::INFINITY;

        for plane in &self.planes {
            let dist = plane.signed_distance(&ray.origin);
            let speed = plane.normal.dot(&ray.dir);

            if speed.abs() <= RAY_EPSILON {
                if dist < 0.0 {
                    return None;
                }
                continue;
            }

            let t = -dist / speed;

            if speed > 0.0 {
                enter = enter.max(t);
            } else {
                exit = exit.min(t);
            }

            if enter > exit {
                return None;
            }
        }

        if exit < 0.0 {
            None
        } else if enter >= 0.0 {
            Some(enter)
        } else {
            Some(exit)
        }
    }

    fn visit(&self, visitor: &mut dyn CollisionVolumeVisitor) {
        visitor.visit_frustum(self)
    }
}
