//! Boxes, possibly oriented.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Rotation, Vector, DEFAULT_EPSILON, NORMAL_SIDE_EPSILON};
use crate::query::details::{ray_hits_box, sat_move_hit_test};
use crate::query::{earliest_contact, Ray, SweepHit};
use crate::shape::local_frame::LocalFrame;
use crate::shape::{
    Capsule, CollisionVolume, CollisionVolumeVisitor, Cylinder, Frustum, Sphere, Triangle,
    TypedVolume, VolumeType,
};
use arrayvec::ArrayVec;

bitflags::bitflags! {
    /// The sides of a box a point lies on, or beyond.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    struct CuboidSides: u8 {
        const X_POS = 1 << 0;
        const X_NEG = 1 << 1;
        const Y_POS = 1 << 2;
        const Y_NEG = 1 << 3;
        const Z_POS = 1 << 4;
        const Z_NEG = 1 << 5;
    }
}

impl CuboidSides {
    fn positive(axis: usize) -> Self {
        [Self::X_POS, Self::Y_POS, Self::Z_POS][axis]
    }

    fn negative(axis: usize) -> Self {
        [Self::X_NEG, Self::Y_NEG, Self::Z_NEG][axis]
    }

    fn of_local_point(point: &Vector, half_size: &Vector) -> Self {
        let mut sides = Self::empty();

        for i in 0..3 {
            if point[i] - half_size[i] >= -NORMAL_SIDE_EPSILON {
                sides |= Self::positive(i);
            }
            if point[i] + half_size[i] <= NORMAL_SIDE_EPSILON {
                sides |= Self::negative(i);
            }
        }

        sides
    }

    fn on_axis(self, axis: usize) -> bool {
        self.intersects(Self::positive(axis) | Self::negative(axis))
    }
}

/// A box, possibly oriented, given by its center and its half size along
/// each of its local axes.
#[derive(PartialEq, Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cuboid {
    frame: LocalFrame,
    half_size: Vector,
}

impl Default for Cuboid {
    /// An axis-aligned box of half size 1 at the origin.
    fn default() -> Self {
        Self::new(Point::origin(), Vector::repeat(1.0))
    }
}

impl Cuboid {
    /// Creates a new axis-aligned box.
    ///
    /// Negative components of `half_size` are clamped to zero.
    #[inline]
    pub fn new(center: Point, half_size: Vector) -> Cuboid {
        Cuboid {
            frame: LocalFrame::new(center),
            half_size: half_size.sup(&Vector::zeros()),
        }
    }

    /// Creates a new box rotated by `orientation` around its center.
    pub fn with_orientation(center: Point, half_size: Vector, orientation: Rotation) -> Cuboid {
        let mut res = Self::new(center, half_size);
        res.set_orientation(orientation);
        res
    }

    /// Creates the axis-aligned box spanning from `mins` to `maxs`.
    pub fn from_extents(mins: &Point, maxs: &Point) -> Cuboid {
        let mut res = Self::default();
        res.set_from_extents(mins, maxs);
        res
    }

    /// The center of this box.
    #[inline]
    pub fn center(&self) -> &Point {
        &self.frame.origin
    }

    /// The half size of this box along each of its local axes.
    #[inline]
    pub fn half_size(&self) -> &Vector {
        &self.half_size
    }

    /// The orientation of this box.
    #[inline]
    pub fn orientation(&self) -> &Rotation {
        &self.frame.orientation
    }

    /// The three local axes of this box, in world space.
    #[inline]
    pub fn axes(&self) -> &[Vector; 3] {
        &self.frame.axes
    }

    /// The local x axis of this box, in world space.
    #[inline]
    pub fn axis_x(&self) -> &Vector {
        &self.frame.axes[0]
    }

    /// The local y axis of this box, in world space.
    #[inline]
    pub fn axis_y(&self) -> &Vector {
        &self.frame.axes[1]
    }

    /// The local z axis of this box, in world space.
    #[inline]
    pub fn axis_z(&self) -> &Vector {
        &self.frame.axes[2]
    }

    /// Is this box rotated with respect to the world axes?
    #[inline]
    pub fn is_oriented(&self) -> bool {
        self.frame.oriented
    }

    /// Moves the center of this box.
    pub fn set_center(&mut self, center: Point) {
        self.frame.origin = center;
    }

    /// Sets the half size of this box. Negative components are clamped to zero.
    pub fn set_half_size(&mut self, half_size: Vector) {
        self.half_size = half_size.sup(&Vector::zeros());
    }

    /// Sets the orientation of this box.
    ///
    /// Setting the identity rotation makes the box axis-aligned again.
    pub fn set_orientation(&mut self, orientation: Rotation) {
        self.frame.set_orientation(orientation);
    }

    /// Makes this box axis-aligned.
    pub fn clear_orientation(&mut self) {
        self.frame.clear_orientation();
    }

    /// Turns this box into the axis-aligned box spanning from `mins` to `maxs`.
    pub fn set_from_extents(&mut self, mins: &Point, maxs: &Point) {
        let half_size = ((maxs - mins) * 0.5).sup(&Vector::zeros());
        self.frame.clear_orientation();
        self.frame.origin = mins + half_size;
        self.half_size = half_size;
    }

    /// Translates this box.
    pub fn move_by(&mut self, offset: &Vector) {
        self.frame.origin += offset;
    }

    /// The world-space corner of this box with the smallest coordinates.
    ///
    /// Only meaningful for axis-aligned boxes.
    #[inline]
    pub fn minimum_extent(&self) -> Point {
        self.frame.origin - self.half_size
    }

    /// The world-space corner of this box with the largest coordinates.
    ///
    /// Only meaningful for axis-aligned boxes.
    #[inline]
    pub fn maximum_extent(&self) -> Point {
        self.frame.origin + self.half_size
    }

    /// Half the length of the projection of this box on `axis`.
    ///
    /// The axis does not need to be normalized, the result is then scaled by
    /// its length.
    #[inline]
    pub fn project_extents(&self, axis: &Vector) -> Real {
        self.frame
            .axes
            .iter()
            .zip(self.half_size.iter())
            .map(|(a, h)| a.dot(axis).abs() * *h)
            .sum()
    }

    /// Transforms a world-space point into the local space of this box.
    #[inline]
    pub fn world_to_local(&self, point: &Point) -> Point {
        self.frame.world_to_local(point)
    }

    /// Transforms a point from the local space of this box into world space.
    #[inline]
    pub fn local_to_world(&self, point: &Point) -> Point {
        self.frame.local_to_world(point)
    }

    /// Rotates a world-space direction into the local space of this box.
    #[inline]
    pub fn normal_world_to_local(&self, normal: &Vector) -> Vector {
        self.frame.normal_world_to_local(normal)
    }

    /// Rotates a direction from the local space of this box into world space.
    #[inline]
    pub fn normal_local_to_world(&self, normal: &Vector) -> Vector {
        self.frame.normal_local_to_world(normal)
    }

    /// The eight corners of this box, in world space.
    pub fn corners(&self) -> [Point; 8] {
        let h = self.half_size;
        [
            Point::new(-h.x, -h.y, -h.z),
            Point::new(h.x, -h.y, -h.z),
            Point::new(h.x, h.y, -h.z),
            Point::new(-h.x, h.y, -h.z),
            Point::new(-h.x, -h.y, h.z),
            Point::new(h.x, -h.y, h.z),
            Point::new(h.x, h.y, h.z),
            Point::new(-h.x, h.y, h.z),
        ]
        .map(|pt| self.local_to_world(&pt))
    }

    /// The axis-aligned bounding box of this box.
    pub fn aabb(&self) -> Aabb {
        let half_extents = Vector::from_fn(|i, _| self.project_extents(&Vector::ith(i, 1.0)));
        Aabb::from_half_extents(self.frame.origin, half_extents)
    }

    #[inline]
    fn clamp_local(&self, local: &Vector) -> Vector {
        local.sup(&-self.half_size).inf(&self.half_size)
    }

    /// The axis of the face nearest to a local point inside this box.
    fn nearest_face_axis(&self, local: &Vector) -> usize {
        let f = self.half_size - local.abs();
        if f.x < f.y && f.x < f.z {
            0
        } else if f.y < f.z {
            1
        } else {
            2
        }
    }

    #[inline]
    fn signed_axis(&self, axis: usize, positive: bool) -> Vector {
        if positive {
            self.frame.axes[axis]
        } else {
            -self.frame.axes[axis]
        }
    }

    /// The candidate separating axes between this box and `other`.
    ///
    /// Cross products of nearly parallel axes are skipped.
    fn separating_axes(&self, other: &Cuboid) -> ArrayVec<Vector, 15> {
        let mut axes = ArrayVec::new();
        axes.extend(self.frame.axes);
        axes.extend(other.frame.axes);

        for a in &self.frame.axes {
            for b in &other.frame.axes {
                let axis = a.cross(b);
                if axis.norm_squared() > DEFAULT_EPSILON {
                    axes.push(axis);
                }
            }
        }

        axes
    }

    fn sweep_sphere(&self, sphere: &Sphere, displacement: &Vector) -> Option<SweepHit> {
        let radius = sphere.radius();
        let hs = self.half_size;
        let so = self.world_to_local(sphere.center()).coords;

        if (so - self.clamp_local(&so)).norm_squared() <= sphere.squared_radius() {
            // Push out along the axis of least penetration.
            let pen = hs - so.abs() + Vector::repeat(radius);
            let i = if pen.x < pen.y {
                if pen.x < pen.z {
                    0
                } else {
                    2
                }
            } else if pen.y < pen.z {
                1
            } else {
                2
            };

            return Some(SweepHit::new(0.0, self.signed_axis(i, so[i] > 0.0)));
        }

        let d = self.normal_world_to_local(displacement);
        if d.norm_squared() <= DEFAULT_EPSILON {
            return None;
        }

        // The center moving against the box rounded by the sphere radius.
        let mut toi: Option<Real> = None;
        let mut keep = |t: Real| {
            if (0.0..1.0).contains(&t) && toi.map_or(true, |best| t < best) {
                toi = Some(t);
            }
        };

        // Faces, as the box grown along one axis.
        let ray = Ray::new(Point::from(so), d);
        for i in 0..3 {
            let mut grown = hs;
            grown[i] += radius;

            if let Some(t) = ray_hits_box(&ray, &Point::origin(), &grown) {
                keep(t);
            }
        }

        // Edges, as cylinders around the box edges.
        for i in 0..3 {
            let (j, k) = ((i + 1) % 3, (i + 2) % 3);
            let mut velocity = d;
            velocity[i] = 0.0;

            for (sj, sk) in [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)] {
                let mut offset = so;
                offset[i] = 0.0;
                offset[j] -= sj * hs[j];
                offset[k] -= sk * hs[k];

                if let Some(t) = earliest_contact(&offset, &velocity, radius) {
                    if (so[i] + d[i] * t).abs() <= hs[i] {
                        keep(t);
                    }
                }
            }
        }

        // Corners.
        for corner in 0..8 {
            let corner = Vector::from_fn(|i, _| {
                if corner & (1 << i) == 0 {
                    -hs[i]
                } else {
                    hs[i]
                }
            });

            if let Some(t) = earliest_contact(&(so - corner), &d, radius) {
                keep(t);
            }
        }

        let toi = toi?;
        let moved = so + d * toi;
        let normal = (moved - self.clamp_local(&moved))
            .try_normalize(DEFAULT_EPSILON)
            .map(|n| self.normal_local_to_world(&n))
            .unwrap_or_else(|| self.normal_at_point(&self.local_to_world(&Point::from(moved))));

        Some(SweepHit::new(toi, normal))
    }

    fn sweep_oriented_cuboid(&self, other: &Cuboid, displacement: &Vector) -> Option<SweepHit> {
        let center_diff = other.center() - self.center();
        let mut first = 0.0;
        let mut last = 1.0;
        let mut entry_normal = None;
        let mut least_penetration: Option<(Real, Vector)> = None;

        for axis in self.separating_axes(other) {
            let c = axis.dot(&center_diff);
            let r1 = self.project_extents(&axis);
            let r2 = other.project_extents(&axis);
            let (min1, max1, min2, max2) = (-r1, r1, c - r2, c + r2);
            let entered_before = first;

            if !sat_move_hit_test(
                axis.dot(displacement),
                min1,
                max1,
                min2,
                max2,
                &mut first,
                &mut last,
            ) {
                return None;
            }

            if first > entered_before {
                entry_normal = Some(if max2 < min1 { -axis } else { axis });
            }

            if max2 >= min1 && max1 >= min2 {
                let depth = (max1 - min2).min(max2 - min1) / axis.norm();
                if least_penetration.map_or(true, |(best, _)| depth < best) {
                    least_penetration = Some((depth, if c >= 0.0 { axis } else { -axis }));
                }
            }
        }

        if first >= 1.0 {
            return None;
        }

        let normal = entry_normal
            .or(least_penetration.map(|(_, n)| n))
            .and_then(|n| n.try_normalize(DEFAULT_EPSILON))
            .unwrap_or_else(Vector::y);
        Some(SweepHit::new(first, normal))
    }

    fn sweep_aligned_cuboid(&self, other: &Cuboid, displacement: &Vector) -> Option<SweepHit> {
        // Solve in the positive octant.
        let mut diff = other.center() - self.center();
        let mut disp = *displacement;
        let mut sign = Vector::repeat(1.0);

        for i in 0..3 {
            if diff[i] < 0.0 {
                diff[i] = -diff[i];
                disp[i] = -disp[i];
                sign[i] = -1.0;
            }
        }

        let extents = self.half_size + other.half_size;
        let gap = diff - extents;

        if gap.iter().all(|g| *g <= 0.0) {
            // The largest gap is the smallest penetration.
            let i = if gap.x > gap.y && gap.x > gap.z {
                0
            } else if gap.y > gap.z {
                1
            } else {
                2
            };
            return Some(SweepHit::new(0.0, Vector::ith(i, sign[i])));
        }

        if (0..3).any(|i| gap[i] > 0.0 && gap[i] + disp[i] >= 0.0) {
            return None;
        }

        for i in 0..3 {
            if gap[i] > 0.0 {
                let toi = gap[i] / -disp[i];
                let (j, k) = ((i + 1) % 3, (i + 2) % 3);

                if (diff[j] + disp[j] * toi).abs() <= extents[j]
                    && (diff[k] + disp[k] * toi).abs() <= extents[k]
                {
                    return Some(SweepHit::new(toi, Vector::ith(i, sign[i])));
                }
            }
        }

        None
    }
}

impl CollisionVolume for Cuboid {
    fn volume_type(&self) -> VolumeType {
        VolumeType::Cuboid
    }

    fn as_typed_volume(&self) -> TypedVolume<'_> {
        TypedVolume::Cuboid(self)
    }

    fn volume_hits_volume(&self, other: &dyn CollisionVolume) -> bool {
        other.cuboid_hits_volume(self)
    }

    fn volume_move_hits_volume(
        &self,
        other: &dyn CollisionVolume,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        other.cuboid_move_hits_volume(self, displacement)
    }

    fn sphere_hits_volume(&self, sphere: &Sphere) -> bool {
        let local = self.world_to_local(sphere.center()).coords;
        (local - self.clamp_local(&local)).norm_squared() <= sphere.squared_radius()
    }

    fn cylinder_hits_volume(&self, cylinder: &Cylinder) -> bool {
        cylinder.cuboid_hits_volume(self)
    }

    fn capsule_hits_volume(&self, capsule: &Capsule) -> bool {
        capsule.cuboid_hits_volume(self)
    }

    fn cuboid_hits_volume(&self, cuboid: &Cuboid) -> bool {
        let center_diff = cuboid.center() - self.center();

        if self.is_oriented() || cuboid.is_oriented() {
            self.separating_axes(cuboid).iter().all(|axis| {
                axis.dot(&center_diff).abs()
                    <= self.project_extents(axis) + cuboid.project_extents(axis)
            })
        } else {
            (0..3).all(|i| center_diff[i].abs() <= self.half_size[i] + cuboid.half_size[i])
        }
    }

    fn triangle_hits_volume(&self, triangle: &Triangle) -> bool {
        triangle.cuboid_hits_volume(self)
    }

    fn frustum_hits_volume(&self, frustum: &Frustum) -> bool {
        frustum.cuboid_hits_volume(self)
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
            .cuboid_move_hits_volume(self, &-displacement)
            .map(SweepHit::swapped)
    }

    fn capsule_move_hits_volume(
        &self,
        capsule: &Capsule,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        capsule
            .cuboid_move_hits_volume(self, &-displacement)
            .map(SweepHit::swapped)
    }

    fn cuboid_move_hits_volume(&self, cuboid: &Cuboid, displacement: &Vector) -> Option<SweepHit> {
        if self.is_oriented() || cuboid.is_oriented() {
            self.sweep_oriented_cuboid(cuboid, displacement)
        } else {
            self.sweep_aligned_cuboid(cuboid, displacement)
        }
    }

    fn triangle_move_hits_volume(
        &self,
        triangle: &Triangle,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        triangle
            .cuboid_move_hits_volume(self, &-displacement)
            .map(SweepHit::swapped)
    }

    fn frustum_move_hits_volume(
        &self,
        frustum: &Frustum,
        displacement: &Vector,
    ) -> Option<SweepHit> {
        frustum
            .cuboid_move_hits_volume(self, &-displacement)
            .map(SweepHit::swapped)
    }

    fn point_move_hits_volume(&self, point: &Point, displacement: &Vector) -> Option<SweepHit> {
        let p = self.world_to_local(point).coords;
        let d = self.normal_world_to_local(displacement);
        let hs = self.half_size;
        let fp = p.abs();

        if fp.x <= hs.x && fp.y <= hs.y && fp.z <= hs.z {
            let i = self.nearest_face_axis(&p);
            return Some(SweepHit::new(0.0, self.signed_axis(i, p[i] > 0.0)));
        }

        let mut best: Option<SweepHit> = None;

        for i in 0..3 {
            if d[i].abs() <= 1.0e-10 {
                continue;
            }

            let (j, k) = ((i + 1) % 3, (i + 2) % 3);

            for positive in [true, false] {
                let face = if positive { hs[i] } else { -hs[i] };
                let toi = (face - p[i]) / d[i];

                if toi < 0.0 || toi >= 1.0 || best.is_some_and(|b| b.time_of_impact <= toi) {
                    continue;
                }

                if (p[j] + d[j] * toi).abs() <= hs[j] && (p[k] + d[k] * toi).abs() <= hs[k] {
                    best = Some(SweepHit::new(toi, self.signed_axis(i, positive)));
                }
            }
        }

        best
    }

    fn enclosing_sphere(&self) -> Sphere {
        Sphere::new(*self.center(), self.half_size.norm())
    }

    fn enclosing_box(&self) -> Cuboid {
        let aabb = self.aabb();
        Cuboid::new(*self.center(), aabb.half_extents())
    }

    fn is_point_inside(&self, point: &Point) -> bool {
        let local = self.world_to_local(point);
        (0..3).all(|i| local[i].abs() <= self.half_size[i])
    }

    fn closest_point_to(&self, point: &Point) -> Point {
        let local = self.world_to_local(point).coords;
        self.local_to_world(&Point::from(self.clamp_local(&local)))
    }

    fn normal_at_point(&self, point: &Point) -> Vector {
        let local = self.world_to_local(point).coords;
        let hs = self.half_size;
        let sides = CuboidSides::of_local_point(&local, &hs);
        let touched: ArrayVec<usize, 3> = (0..3).filter(|i| sides.on_axis(*i)).collect();

        match touched.as_slice() {
            [] => {
                let i = self.nearest_face_axis(&local);
                self.signed_axis(i, local[i] > 0.0)
            }
            [i] => self.signed_axis(*i, sides.contains(CuboidSides::positive(*i))),
            _ => {
                let diff = local - self.clamp_local(&local);
                let len = diff.norm();

                let local_normal = if len >= NORMAL_SIDE_EPSILON {
                    diff / len
                } else {
                    // On an edge or a corner, average the touched faces.
                    touched
                        .iter()
                        .map(|i| {
                            if sides.contains(CuboidSides::positive(*i)) {
                                Vector::ith(*i, 1.0)
                            } else {
                                Vector::ith(*i, -1.0)
                            }
                        })
                        .sum::<Vector>()
                        .normalize()
                };

                self.normal_local_to_world(&local_normal)
            }
        }
    }

    fn ray_hits_volume(&self, ray: &Ray) -> Option<Real> {
        if self.is_oriented() {
            let local = Ray::new(
                self.world_to_local(&ray.origin),
                self.normal_world_to_local(&ray.dir),
            );
            ray_hits_box(&local, &Point::origin(), &self.half_size)
        } else {
            ray_hits_box(ray, self.center(), &self.half_size)
        }
    }

    fn visit(&self, visitor: &mut dyn CollisionVolumeVisitor) {
        visitor.visit_cuboid(self)
    }
}
