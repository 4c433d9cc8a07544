//! Closest point computations on segments, triangles and quads.

pub use self::closest_points_segment::{closest_point_on_line, closest_point_on_ray};
pub use self::closest_points_triangle::{
    closest_point_on_quad, closest_point_on_quad_edge, closest_point_on_triangle,
    closest_point_on_triangle_edge,
};

mod closest_points_segment;
mod closest_points_triangle;
