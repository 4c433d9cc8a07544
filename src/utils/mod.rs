//! Various unsorted geometrical and logical operators.

pub use self::ccw_face_normal::ccw_face_normal;
pub use self::center::center;
pub use self::dominant_axis::dominant_axis;
pub use self::point_in_triangle::{point_in_triangle, point_in_triangle_with_normal};

mod ccw_face_normal;
mod center;
mod dominant_axis;
mod point_in_triangle;
