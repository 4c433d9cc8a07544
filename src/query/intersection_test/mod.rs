//! Boolean and three-way intersection tests between primitives.

pub use self::intersection::{aabb_intersects_aabb, Intersection};
pub use self::intersection_test_ball_ball::sphere_hits_sphere;
pub use self::point_in_quad::point_in_quad;
pub use crate::utils::{point_in_triangle, point_in_triangle_with_normal};

mod intersection;
mod intersection_test_ball_ball;
mod point_in_quad;
