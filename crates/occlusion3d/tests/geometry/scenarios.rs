use approx::assert_relative_eq;
use occlusion3d::math::{Point, Vector};
use occlusion3d::partitioning::Octree;
use occlusion3d::query::details::{point_in_triangle, sphere_hits_sphere};
use occlusion3d::query::Ray;
use occlusion3d::shape::{CollisionVolume, Cuboid, Sphere, Triangle};

#[test]
fn overlapping_spheres_hit() {
    let a = Sphere::new(Point::origin(), 1.0);
    let b = Sphere::new(Point::new(1.5, 0.0, 0.0), 1.0);

    assert!(sphere_hits_sphere(a.center(), a.radius(), b.center(), b.radius()));
    assert!(a.volume_hits_volume(&b));
}

#[test]
fn distant_spheres_miss() {
    let a = Sphere::new(Point::origin(), 1.0);
    let b = Sphere::new(Point::new(3.0, 0.0, 0.0), 1.0);

    assert!(!sphere_hits_sphere(a.center(), a.radius(), b.center(), b.radius()));
    assert!(!a.volume_hits_volume(&b));
}

#[test]
fn moving_sphere_hits_sphere_after_a_quarter() {
    let moving = Sphere::new(Point::origin(), 1.0);
    let stationary = Sphere::new(Point::new(3.0, 0.0, 0.0), 1.0);

    let hit = moving
        .volume_move_hits_volume(&stationary, &Vector::new(4.0, 0.0, 0.0))
        .unwrap();
    assert_relative_eq!(hit.time_of_impact, 0.25, epsilon = 1.0e-6);
    assert_relative_eq!(hit.normal, -Vector::x(), epsilon = 1.0e-6);
}

#[test]
fn ray_hits_unit_box() {
    let cuboid = Cuboid::new(Point::origin(), Vector::repeat(1.0));
    let ray = Ray::new(Point::new(0.0, 0.0, -5.0), Vector::z());

    assert_relative_eq!(cuboid.ray_hits_volume(&ray).unwrap(), 4.0, epsilon = 1.0e-6);
}

#[test]
fn point_in_unit_triangle() {
    let a = Point::origin();
    let b = Point::new(1.0, 0.0, 0.0);
    let c = Point::new(0.0, 1.0, 0.0);

    assert!(point_in_triangle(&Point::new(0.25, 0.25, 0.0), &a, &b, &c));
    assert!(!point_in_triangle(&Point::new(0.9, 0.9, 0.0), &a, &b, &c));

    let triangle = Triangle::new(a, b, c);
    assert_relative_eq!(
        triangle.closest_point_to(&Point::new(0.25, 0.25, 1.0)),
        Point::new(0.25, 0.25, 0.0),
        epsilon = 1.0e-6
    );
}

#[test]
fn octree_places_box_in_positive_octant() {
    let mut tree: Octree<Vec<usize>> =
        Octree::new(Point::origin(), Vector::repeat(8.0)).unwrap();
    let root = tree.root();
    let center = Point::new(5.0, 5.0, 5.0);
    let half_size = Vector::repeat(1.0);

    assert_eq!(tree.find_octant_at_box(root, &center, &half_size), Ok(Some(7)));

    let node = tree.get_node_at_box(root, &center, &half_size).unwrap();
    assert_eq!(tree.find_node_at_box(root, &center, &half_size), Ok(Some(node)));
    assert!(tree.node(node).unwrap().contains_box(&center, &half_size));

    // The node hangs below the all-positive child of the root.
    let octant7 = tree.child(root, 7).unwrap().unwrap();
    let mut ancestor = tree.node(node).unwrap().parent();
    while let Some(id) = ancestor.filter(|id| *id != octant7) {
        ancestor = tree.node(id).unwrap().parent();
    }
    assert_eq!(ancestor, Some(octant7));
}
