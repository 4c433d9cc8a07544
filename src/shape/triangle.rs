//! Definition of the triangle shape.

use crate::math::{Point, Real, Vector, DEFAULT_EPSILON, PARALLEL_EPSILON};
use crate::query::details::{
    closest_point_on_triangle_edge, ray_hits_triangle_with_normal, sat_move_hit_test,
};
use crate::query::{earliest_contact, Ray, SweepHit};
use crate::shape::volume::{unsupported_move, unsupported_pair};
use crate::shape::{
    Capsule, CollisionVolume, CollisionVolumeVisitor, Cuboid, Cylinder, Frustum, Sphere,
    TypedVolume, VolumeType,
};
use crate::utils;
use arrayvec::ArrayVec;

/// A triangle shape.
///
/// The unit edge directions, the face normal and the plane distance are
/// derived from the corners and updated together with them.
#[derive(PartialEq, Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    corners: [Point; 3],
    edges: [Vector; 3],
    normal: Vector,
    distance: Real,
}

impl Triangle {
    /// Creates a triangle from three corners.
    ///
    /// The normal follows the right-hand rule on `(a, b, c)`. It is zero if
    /// the triangle is degenerate.
    #[inline]
    pub fn new(a: Point, b: Point, c: Point) -> Triangle {
        let normal = utils::ccw_face_normal([&a, &b, &c]).unwrap_or_else(|| {
            log::debug!("Degenerate triangle {:?} {:?} {:?}, zero normal.", a, b, c);
            Vector::zeros()
        });
        Self::with_normal(a, b, c, normal)
    }

    /// Creates a triangle from three corners and a precomputed unit normal.
    pub fn with_normal(a: Point, b: Point, c: Point, normal: Vector) -> Triangle {
        let edge = |from: &Point, to: &Point| {
            (to - from)
                .try_normalize(DEFAULT_EPSILON)
                .unwrap_or_else(Vector::zeros)
        };

        Triangle {
            edges: [edge(&a, &b), edge(&b, &c), edge(&c, &a)],
            distance: a.coords.dot(&normal),
            corners: [a, b, c],
            normal,
        }
    }

    /// Replaces the corners, recomputing the normal.
    pub fn set_corners(&mut self, a: Point, b: Point, c: Point) {
        *self = Self::new(a, b, c);
    }

    /// Replaces the corners, using `normal` as the new face normal.
    pub fn set_corners_with_normal(&mut self, a: Point, b: Point, c: Point, normal: Vector) {
        *self = Self::with_normal(a, b, c, normal);
    }

    /// The three corners of this triangle.
    #[inline]
    pub fn corners(&self) -> &[Point; 3] {
        &self.corners
    }

    /// The unit directions of the edges `a -> b`, `b -> c` and `c -> a`.
    #[inline]
    pub fn edges(&self) -> &[Vector; 3] {
        &self.edges
    }

    /// The unit face normal.
    #[inline]
    pub fn normal(&self) -> &Vector {
        &self.normal
    }

    /// The distance of the triangle plane to the origin along the normal.
    #[inline]
    pub fn distance(&self) -> Real {
        self.distance
    }

    /// Signed distance from the triangle plane to `point`.
    #[inline]
    pub fn signed_distance(&self, point: &Point) -> Real {
        point.coords.dot(&self.normal) - self.distance
    }

    fn projects_inside(&self, point: &Point) -> bool {
        let [a, b, c] = &self.corners;
        self.normal != Vector::zeros()
            && utils::point_in_triangle_with_normal(point, a, b, c, &self.normal)
    }

    /// Moves a point of the triangle plane to the closest point of the triangle.
    fn clamp_in_plane(&self, point: &Point) -> Point {
        if self.projects_inside(point) {
            *point
        } else {
            let [a, b, c] = &self.corners;
            closest_point_on_triangle_edge(a, b, c, point)
        }
    }

    /// The face normal, flipped toward the side of `point`.
    fn normal_toward(&self, point: &Point) -> Vector {
        if self.signed_distance(point) < 0.0 {
            -self.normal
        } else {
            self.normal
        }
    }

    /// Candidate separating axes between this triangle and a box: the face
    /// normal, the box axes and the crosses of the edges with the box axes.
    fn separating_axes(&self, cuboid: &Cuboid) -> ArrayVec<Vector, 13> {
        let mut axes = ArrayVec::new();
        let mut push = |axis: Vector| {
            if let Some(axis) = axis.try_normalize(1.0e-4) {
                axes.push(axis);
            }
        };

        push(self.normal);
        cuboid.axes().iter().for_each(|axis| push(*axis));

        for edge in &self.edges {
            for axis in cuboid.axes() {
                push(edge.cross(axis));
            }
        }

        axes
    }

    /// Projection interval of the corners relative to `origin` on `axis`.
    fn project_from(&self, origin: &Point, axis: &Vector) -> (Real, Real) {
        self.corners
            .iter()
            .map(|pt| (pt - origin).dot(axis))
            .fold((Real::MAX, -Real::MAX), |(min, max), p| {
                (min.min(p), max.max(p))
            })
    }

    fn sweep_sphere(&self, sphere: &Sphere, displacement: &Vector) -> Option<SweepHit> {
        let center = sphere.center();
        let closest = self.closest_point_to(center);

        if na::distance_squared(&closest, center) <= sphere.squared_radius() {
            let normal = (center - closest)
                .try_normalize(PARALLEL_EPSILON)
                .unwrap_or_else(|| self.normal_toward(center));
            return Some(SweepHit::new(0.0, normal));
        }

        if displacement.norm_squared() <= DEFAULT_EPSILON {
            return None;
        }

        let radius = sphere.radius();
        let mut toi: Option<Real> = None;

        // Face interior, reached when the plane distance drops to the radius.
        let dist = self.signed_distance(center);
        let speed = self.normal.dot(displacement);

        if speed * dist < 0.0 {
            let t = (dist.abs() - radius) / speed.abs();
            if (0.0..1.0).contains(&t) && self.projects_inside(&(center + displacement * t)) {
                toi = Some(t);
            }
        }

        // Edges and corners, as the center moving against inflated features.
        let mut keep = |t: Real| {
            if (0.0..1.0).contains(&t) && toi.map_or(true, |best| t < best) {
                toi = Some(t);
            }
        };

        for (i, edge) in self.edges.iter().enumerate() {
            let from = self.corners[i];
            let length = na::distance(&from, &self.corners[(i + 1) % 3]);
            let rel = center - from;
            let offset = rel - edge * rel.dot(edge);
            let velocity = displacement - edge * displacement.dot(edge);

            if let Some(t) = earliest_contact(&offset, &velocity, radius) {
                let along = (rel + displacement * t).dot(edge);
                if along >= 0.0 && along <= length {
                    keep(t);
                }
            }
        }

        for corner in &self.corners {
            if let Some(t) = earliest_contact(&(center - corner), displacement, radius) {
                keep(t);
            }
        }

        let toi = toi?;
        let moved = center + displacement * toi;
        let normal = (moved - self.closest_point_to(&moved))
            .try_normalize(DEFAULT_EPSILON)
            .unwrap_or_else(|| self.normal_toward(&moved));
        Some(SweepHit::new(toi, normal))
    }

    fn sweep_cuboid(&self, cuboid: &Cuboid, displacement: &Vector) -> Option<SweepHit> {
        let mut first = 0.0;
        let mut last = 1.0;
        let mut entry_normal = None;

        for axis in self.separating_axes(cuboid) {
            let (min1, max1) = self.project_from(cuboid.center(), &axis);
            let extent = cuboid.project_extents(&axis);
            let entered_before = first;

            if !sat_move_hit_test(
                axis.dot(displacement),
                min1,
                max1,
                -extent,
                extent,
                &mut first,
                &mut last,
            ) {
                return None;
            }

            if first > entered_before {
                entry_normal = Some(if extent < min1 { -axis } else { axis });
            }
        }

        if first >= 1.0 {
            return None;
        }

        let normal = entry_normal.unwrap_or_else(|| self.overlap_normal(cuboid.center()));
        Some(SweepHit::new(first, normal))
    }

    /// Approximate normal for a box already touching the triangle.
    fn overlap_normal(&self, box_center: &Point) -> Vector {
        let projected = box_center - self.normal * self.signed_distance(box_center);

        if self.projects_inside(&projected) {
            return self.normal_toward(box_center);
        }

        let [a, b, c] = &self.corners;
        let to_edge = closest_point_on_triangle_edge(a, b, c, &projected) - box_center;
        let i = utils::dominant_axis(&to_edge);
        Vector::ith(i, if to_edge[i] > 0.0 { -1.0 } else { 1.0 })
    }
}

impl CollisionVolume for Triangle {
    fn volume_type(&self) -> VolumeType {
        VolumeType::Triangle
    }

    fn as_typed_volume(&self) -> TypedVolume<'_> {
        TypedVolume::Triangle(self)
    }

    fn volume_hits_volume(&self, other: &dyn CollisionVolume) -> bool {
        other.triangle_hits_volume(self)
    }

    fn volume_move_hits_volume(
        &self,
        other: &dyn CollisionVolume,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        other.triangle_move_hits_volume(self, displacement)
    }

    fn sphere_hits_volume(&self, sphere: &Sphere) -> bool {
        (self.closest_point_to(sphere.center()) - sphere.center()).norm_squared()
            <= sphere.squared_radius()
    }

    fn cylinder_hits_volume(&self, cylinder: &Cylinder) -> bool {
        cylinder.triangle_hits_volume(self)
    }

    fn capsule_hits_volume(&self, capsule: &Capsule) -> bool {
        capsule.triangle_hits_volume(self)
    }

    fn cuboid_hits_volume(&self, cuboid: &Cuboid) -> bool {
        self.separating_axes(cuboid).iter().all(|axis| {
            let (min, max) = self.project_from(cuboid.center(), axis);
            let extent = cuboid.project_extents(axis);
            min <= extent && max >= -extent
        })
    }

    fn triangle_hits_volume(&self, _triangle: &Triangle) -> bool {
        unsupported_pair(VolumeType::Triangle, VolumeType::Triangle)
    }

    fn frustum_hits_volume(&self, frustum: &Frustum) -> bool {
        frustum.triangle_hits_volume(self)
    }

    fn sphere_move_hits_volume(&self, sphere: &Sphere, displacement: &Vector) -> Option<SweepHit> {
        self.sweep_sphere(sphere, displacement)
    }

    fn cylinder_move_hits_volume(
        &self,
        cylinder: &Cylinder,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        cylinder
            .triangle_move_hits_volume(self, &-displacement)
            .map(SweepHit::swapped)
    }

    fn capsule_move_hits_volume(
        &self,
        capsule: &Capsule,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        capsule
            .triangle_move_hits_volume(self, &-displacement)
            .map(SweepHit::swapped)
    }

    fn cuboid_move_hits_volume(&self, cuboid: &Cuboid, displacement: &Vector) -> Option<SweepHit> {
        self.sweep_cuboid(cuboid, displacement)
    }

    fn triangle_move_hits_volume(
        &self,
        _triangle: &Triangle,
        _displacement: &Vector,
    ) -> Option<SweepHit> {
        unsupported_move(VolumeType::Triangle, VolumeType::Triangle)
    }

    fn frustum_move_hits_volume(
        &self,
        frustum: &Frustum,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        frustum
            .triangle_move_hits_volume(self, &-displacement)
            .map(SweepHit::swapped)
    }

    fn point_move_hits_volume(&self, point: &Point, displacement: &Vector) -> Option<SweepHit> {
        let dot = displacement.dot(&self.normal);
        if dot.abs() <= PARALLEL_EPSILON {
            return None;
        }

        let toi = -self.signed_distance(point) / dot;
        if !(0.0..1.0).contains(&toi) {
            return None;
        }

        let [a, b, c] = &self.corners;
        let hit = point + displacement * toi;

        if utils::point_in_triangle_with_normal(&hit, a, b, c, &self.normal) {
            let normal = if dot > 0.0 { -self.normal } else { self.normal };
            Some(SweepHit::new(toi, normal))
        } else {
            None
        }
    }

    fn enclosing_sphere(&self) -> Sphere {
        let center = utils::center(&self.corners);
        let radius_sq = self
            .corners
            .iter()
            .map(|pt| (pt - center).norm_squared())
            .fold(0.0, Real::max);
        Sphere::new(center, radius_sq.sqrt())
    }

    fn enclosing_box(&self) -> Cuboid {
        let [a, b, c] = &self.corners;
        Cuboid::from_extents(&a.inf(b).inf(c), &a.sup(b).sup(c))
    }

    fn is_point_inside(&self, _point: &Point) -> bool {
        // Triangles have no volume.
        false
    }

    fn closest_point_to(&self, point: &Point) -> Point {
        self.clamp_in_plane(&(point - self.normal * self.signed_distance(point)))
    }

    fn normal_at_point(&self, point: &Point) -> Vector {
        self.normal_toward(point)
    }

    fn ray_hits_volume(&self, ray: &Ray) -> Option<Real> {
        let [a, b, c] = &self.corners;
        ray_hits_triangle_with_normal(ray, a, b, c, &self.normal)
    }

    fn visit(&self, visitor: &mut dyn CollisionVolumeVisitor) {
        visitor.visit_triangle(self)
    }
}
