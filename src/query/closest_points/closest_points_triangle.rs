use crate::math::{Point, Vector, DEFAULT_EPSILON};

use super::closest_point_on_line;

/// Closest point to `p` among the given segments.
fn closest_point_on_segments<const N: usize>(segments: [(&Point, &Point); N], p: &Point) -> Point {
    let mut best = *p;
    let mut best_dist = None;

    for (from, to) in segments {
        let candidate = closest_point_on_line(from, to, p);
        let dist = (p - candidate).norm_squared();

        if best_dist.map_or(true, |best_dist| dist < best_dist) {
            best = candidate;
            best_dist = Some(dist);
        }
    }

    best
}

/// Pushes `p` inside the prism spanned by a convex polygon, then projects it
/// on the polygon plane.
fn closest_point_on_convex_polygon(corners: &[&Point], face_normal: &Vector, p: &Point) -> Point {
    let mut point = *p;

    for i in 0..corners.len() {
        let from = corners[i];
        let to = corners[(i + 1) % corners.len()];

        // Points toward the polygon interior.
        if let Some(normal) = face_normal.cross(&(to - from)).try_normalize(DEFAULT_EPSILON) {
            let distance = (point - from).dot(&normal);

            if distance < 0.0 {
                point -= normal * distance;
            }
        }
    }

    point - face_normal * (point - corners[0]).dot(face_normal)
}

/// Closest point to `p` on the boundary of the triangle `(a, b, c)`.
pub fn closest_point_on_triangle_edge(a: &Point, b: &Point, c: &Point, p: &Point) -> Point {
    closest_point_on_segments([(a, b), (b, c), (c, a)], p)
}

/// Closest point to `p` on the solid triangle `(a, b, c)`.
///
/// A degenerate triangle falls back to its closest edge point.
pub fn closest_point_on_triangle(a: &Point, b: &Point, c: &Point, p: &Point) -> Point {
    match (b - a).cross(&(c - b)).try_normalize(DEFAULT_EPSILON) {
        Some(face_normal) => closest_point_on_convex_polygon(&[a, b, c], &face_normal, p),
        None => closest_point_on_triangle_edge(a, b, c, p),
    }
}

/// Closest point to `p` on the boundary of the quad `(a, b, c, d)`.
pub fn closest_point_on_quad_edge(a: &Point, b: &Point, c: &Point, d: &Point, p: &Point) -> Point {
    closest_point_on_segments([(a, b), (b, c), (c, d), (d, a)], p)
}

/// Closest point to `p` on the solid planar convex quad `(a, b, c, d)`.
///
/// The quad plane is taken from its first three corners. A degenerate quad
/// falls back to its closest edge point.
pub fn closest_point_on_quad(a: &Point, b: &Point, c: &Point, d: &Point, p: &Point) -> Point {
    match (b - a).cross(&(c - b)).try_normalize(DEFAULT_EPSILON) {
        Some(face_normal) => closest_point_on_convex_polygon(&[a, b, c, d], &face_normal, p),
        None => closest_point_on_quad_edge(a, b, c, d, p),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn triangle() -> [Point; 3] {
        [
            Point::origin(),
            Point::new(2.0, 0.0, 0.0),
            Point::new(0.0, 2.0, 0.0),
        ]
    }

    #[test]
    fn closest_point_on_triangle_regions() {
        let [a, b, c] = triangle();

        // Face region.
        assert_relative_eq!(
            closest_point_on_triangle(&a, &b, &c, &Point::new(0.5, 0.5, 3.0)),
            Point::new(0.5, 0.5, 0.0)
        );
        // Edge region.
        assert_relative_eq!(
            closest_point_on_triangle(&a, &b, &c, &Point::new(1.0, -1.0, 1.0)),
            Point::new(1.0, 0.0, 0.0)
        );
        // Vertex region.
        assert_relative_eq!(
            closest_point_on_triangle(&a, &b, &c, &Point::new(-1.0, -1.0, 0.0)),
            a,
            epsilon = 1.0e-6
        );
    }

    #[test]
    fn closest_point_on_triangle_edge_ignores_interior() {
        let [a, b, c] = triangle();
        assert_relative_eq!(
            closest_point_on_triangle_edge(&a, &b, &c, &Point::new(0.2, 0.5, 0.0)),
            Point::new(0.0, 0.5, 0.0)
        );
    }

    #[test]
    fn closest_point_on_quad_regions() {
        let a = Point::origin();
        let b = Point::new(2.0, 0.0, 0.0);
        let c = Point::new(2.0, 2.0, 0.0);
        let d = Point::new(0.0, 2.0, 0.0);

        assert_relative_eq!(
            closest_point_on_quad(&a, &b, &c, &d, &Point::new(1.5, 1.5, -2.0)),
            Point::new(1.5, 1.5, 0.0)
        );
        assert_relative_eq!(
            closest_point_on_quad(&a, &b, &c, &d, &Point::new(3.0, 3.0, 1.0)),
            c,
            epsilon = 1.0e-6
        );
        assert_relative_eq!(
            closest_point_on_quad_edge(&a, &b, &c, &d, &Point::new(1.0, 1.8, 0.0)),
            Point::new(1.0, 2.0, 0.0)
        );
    }
}
