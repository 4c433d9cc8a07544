//! Ray casting against the primitive volumes.

pub use self::ray::Ray;
pub use self::ray_ball::{ray_hits_sphere, ray_sphere};
pub use self::ray_capsule::{ray_hits_capsule, ray_hits_tapered_capsule};
pub use self::ray_cuboid::ray_hits_box;
pub use self::ray_cylinder::{ray_hits_cylinder, ray_hits_tapered_cylinder};
pub use self::ray_plane::ray_plane;
pub use self::ray_triangle::{ray_hits_triangle, ray_hits_triangle_with_normal};

pub(crate) use self::ray::{nearest_hit, quadratic_roots};

#[allow(clippy::module_inception)]
mod ray;
mod ray_ball;
mod ray_capsule;
mod ray_cuboid;
mod ray_cylinder;
mod ray_plane;
mod ray_triangle;
