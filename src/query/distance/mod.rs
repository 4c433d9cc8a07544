//! Distance computations between primitives.

pub use self::distance_point_ray::point_ray_distance;
pub use self::distance_segment_segment::segment_segment_distance;

mod distance_point_ray;
mod distance_segment_segment;
