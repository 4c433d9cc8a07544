//! Non-persistent geometric queries.
//!
//! This module is the collision detection toolkit every volume relies on.
//! All functions are pure: they take plain points, vectors and scalars and
//! return a boolean, a distance, a point or a [`SweepHit`].
//!
//! # Conventions
//! * Rays are half-lines. Hit distances are expressed in multiples of the
//!   ray direction and are always `>= 0`.
//! * Swept tests restrict the time of impact to `[0, 1)` of the
//!   displacement. No hit within the displacement is reported as `None`.
//! * Contact normals of swept tests point from the stationary volume toward
//!   the moving one.
//!
//! # Specific cases
//! The functions exported by the `details` submodule are the primitive
//! versions used by the volumes. They have the form
//! `[operation]_[primitive]` or `[primitive]_[operation]_[primitive]`.

pub use self::intersection_test::Intersection;
pub use self::ray::Ray;
pub use self::time_of_impact::SweepHit;

pub(crate) use self::ray::{nearest_hit, quadratic_roots};
pub(crate) use self::time_of_impact::earliest_contact;

mod closest_points;
mod distance;
mod intersection_test;
mod ray;
mod time_of_impact;

/// Queries dedicated to specific primitives.
pub mod details {
    pub use super::closest_points::{
        closest_point_on_line, closest_point_on_quad, closest_point_on_quad_edge,
        closest_point_on_ray, closest_point_on_triangle, closest_point_on_triangle_edge,
    };
    pub use super::distance::{point_ray_distance, segment_segment_distance};
    pub use super::intersection_test::{
        aabb_intersects_aabb, point_in_quad, point_in_triangle, point_in_triangle_with_normal,
        sphere_hits_sphere,
    };
    pub use super::ray::{
        ray_hits_box, ray_hits_capsule, ray_hits_cylinder, ray_hits_sphere,
        ray_hits_tapered_capsule, ray_hits_tapered_cylinder, ray_hits_triangle,
        ray_hits_triangle_with_normal, ray_plane, ray_sphere,
    };
    pub use super::time_of_impact::{sat_move_hit_test, sphere_move_hits_sphere};
}
