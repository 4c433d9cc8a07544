//! Collision volumes.

pub use self::capsule::Capsule;
pub use self::cuboid::Cuboid;
pub use self::cylinder::Cylinder;
pub use self::frustum::{Frustum, FrustumPlane};
pub use self::sphere::Sphere;
pub use self::triangle::Triangle;
#[doc(inline)]
pub use self::volume::{CollisionVolume, TypedVolume, VolumeError, VolumeType};
#[doc(inline)]
pub use self::volume_visitor::CollisionVolumeVisitor;

mod capsule;
mod cuboid;
mod cylinder;
mod frustum;
pub(crate) mod local_frame;
mod sphere;
mod triangle;
#[doc(hidden)]
pub mod volume;
#[doc(hidden)]
pub mod volume_visitor;
