//! Position and orientation shared by the oriented volumes.

use crate::math::{self, Point, Rotation, Vector, DEFAULT_EPSILON};

/// The local coordinate frame of a box, a capsule or a cylinder.
///
/// The axes are the columns of the orientation matrix. They are always
/// orthonormal and reduce to the world axes when the frame is not oriented,
/// in which case the change-of-basis functions only translate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub(crate) struct LocalFrame {
    pub origin: Point,
    pub orientation: Rotation,
    pub axes: [Vector; 3],
    pub oriented: bool,
}

impl Default for LocalFrame {
    fn default() -> Self {
        Self::new(Point::origin())
    }
}

impl LocalFrame {
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            orientation: Rotation::identity(),
            axes: [Vector::x(), Vector::y(), Vector::z()],
            oriented: false,
        }
    }

    pub fn set_orientation(&mut self, orientation: Rotation) {
        if math::is_identity_rotation(&orientation) {
            self.clear_orientation();
        } else {
            self.orientation = orientation;
            self.axes = math::rotation_axes(&orientation);
            self.oriented = true;
        }
    }

    pub fn clear_orientation(&mut self) {
        self.orientation = Rotation::identity();
        self.axes = [Vector::x(), Vector::y(), Vector::z()];
        self.oriented = false;
    }

    #[inline]
    pub fn world_to_local(&self, point: &Point) -> Point {
        Point::from(self.normal_world_to_local(&(point - self.origin)))
    }

    #[inline]
    pub fn local_to_world(&self, point: &Point) -> Point {
        self.origin + self.normal_local_to_world(&point.coords)
    }

    #[inline]
    pub fn normal_world_to_local(&self, normal: &Vector) -> Vector {
        if self.oriented {
            Vector::new(
                self.axes[0].dot(normal),
                self.axes[1].dot(normal),
                self.axes[2].dot(normal),
            )
        } else {
            *normal
        }
    }

    #[inline]
    pub fn normal_local_to_world(&self, normal: &Vector) -> Vector {
        if self.oriented {
            self.axes[0] * normal.x + self.axes[1] * normal.y + self.axes[2] * normal.z
        } else {
            *normal
        }
    }
}

/// Maps a local point to the half plane spanned by the local Y axis and the
/// point itself.
///
/// Returns the profile point `(distance to the Y axis, height, 0)` and the
/// unit radial direction, which is `x` for points on the axis.
pub(crate) fn to_profile(local: &Point) -> (Point, Vector) {
    let radial = Vector::new(local.x, 0.0, local.z);
    let rho = radial.norm();
    let dir = if rho > DEFAULT_EPSILON {
        radial / rho
    } else {
        Vector::x()
    };

    (Point::new(rho, local.y, 0.0), dir)
}

/// Maps a profile vector (or point coordinates) back to local space.
#[inline]
pub(crate) fn profile_to_local(profile: &Vector, radial_dir: &Vector) -> Vector {
    radial_dir * profile.x + Vector::y() * profile.y
}
