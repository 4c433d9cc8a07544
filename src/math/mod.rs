//! Linear algebra type aliases and the tolerances shared by every volume test.

use na::{Matrix3, Matrix4 as NaMatrix4, Point3, UnitQuaternion, Vector3};

/// The scalar type used throughout this crate.
#[cfg(feature = "f64")]
pub type Real = f64;

/// The scalar type used throughout this crate.
#[cfg(feature = "f32")]
pub type Real = f32;

/// The default tolerance used for geometric operations.
pub const DEFAULT_EPSILON: Real = Real::EPSILON;

/// Radius difference above which a capsule or cylinder is considered tapered.
pub const TAPER_EPSILON: Real = 1.0e-6;

/// Below this magnitude a direction is considered parallel to a plane.
pub const PARALLEL_EPSILON: Real = 1.0e-5;

/// Tolerance of the plane intersection and plane containment tests.
pub const PLANE_EPSILON: Real = 1.0e-4;

/// Below this magnitude a ray direction component is ignored.
pub const RAY_EPSILON: Real = 1.0e-12;

/// Distance tolerance used to classify which box sides a point lies on.
pub const NORMAL_SIDE_EPSILON: Real = 1.0e-6;

/// The dimension of the space.
pub const DIM: usize = 3;

/// The point type.
pub type Point = Point3<Real>;

/// The vector type.
pub type Vector = Vector3<Real>;

/// The 3x3 matrix type.
pub type Matrix = Matrix3<Real>;

/// The 4x4 homogeneous matrix type, used for view-projection matrices.
pub type Matrix4 = NaMatrix4<Real>;

/// The rotation type.
pub type Rotation = UnitQuaternion<Real>;

/// The three orthonormal axes of a rotation, in `[x, y, z]` order.
#[inline]
pub fn rotation_axes(rotation: &Rotation) -> [Vector; 3] {
    let m = rotation.to_rotation_matrix();
    [
        m.matrix().column(0).into_owned(),
        m.matrix().column(1).into_owned(),
        m.matrix().column(2).into_owned(),
    ]
}

/// Is this rotation the identity, up to `DEFAULT_EPSILON`?
#[inline]
pub fn is_identity_rotation(rotation: &Rotation) -> bool {
    rotation.angle() <= DEFAULT_EPSILON
}
