use std::collections::HashSet;

use occlusion3d::math::{Point, Real, Vector};
use occlusion3d::partitioning::{NodeId, Octree, OctreeNode};
use occlusion3d::query::Intersection;
use occlusion3d::shape::{CollisionVolume, Cuboid, Sphere, Triangle};

struct Scene {
    tree: Octree<Vec<usize>>,
    boxes: Vec<Cuboid>,
}

fn random_scene(seed: u64, count: usize) -> Scene {
    let mut rng = oorandom::Rand32::new(seed);
    let mut real = move |min: Real, max: Real| min + rng.rand_float() as Real * (max - min);
    let mut tree: Octree<Vec<usize>> =
        Octree::new(Point::origin(), Vector::repeat(16.0)).unwrap();
    let root = tree.root();
    let mut boxes = Vec::new();

    for i in 0..count {
        let half_size = Vector::new(real(0.05, 1.0), real(0.05, 1.0), real(0.05, 1.0));
        let center = Point::new(real(-14.0, 14.0), real(-14.0, 14.0), real(-14.0, 14.0));
        let node = tree.get_node_at_box(root, &center, &half_size).unwrap();
        tree.data_mut(node).unwrap().push(i);
        boxes.push(Cuboid::new(center, half_size));
    }

    Scene { tree, boxes }
}

#[test]
fn boxes_land_in_containing_nodes() {
    let scene = random_scene(5, 300);
    let root = scene.tree.root();

    for (i, cuboid) in scene.boxes.iter().enumerate() {
        let node = scene
            .tree
            .find_node_at_box(root, cuboid.center(), cuboid.half_size())
            .unwrap()
            .expect("inserted box has no node");
        let node_ref = scene.tree.node(node).unwrap();

        assert!(node_ref.contains_box(cuboid.center(), cuboid.half_size()));
        assert!(node_ref.data().contains(&i));
        assert_eq!(
            scene
                .tree
                .search_tree_for_box(root, cuboid.center(), cuboid.half_size()),
            Ok(node)
        );
        assert!(scene.tree.depth(node).unwrap() <= scene.tree.config().max_depth);
    }
}

#[test]
fn volume_traversal_finds_every_colliding_box() {
    let scene = random_scene(6, 300);
    let mut rng = oorandom::Rand32::new(60);

    for _ in 0..50 {
        let center = Point::new(
            rng.rand_float() as Real * 24.0 - 12.0,
            rng.rand_float() as Real * 24.0 - 12.0,
            rng.rand_float() as Real * 24.0 - 12.0,
        );
        let sphere = Sphere::new(center, rng.rand_float() as Real * 5.0);

        let mut candidates = HashSet::new();
        let mut visited = 0;
        scene.tree.visit_nodes_colliding(
            &sphere,
            &mut |_: NodeId, node: &OctreeNode<Vec<usize>>, _: Intersection| {
                visited += 1;
                candidates.extend(node.data().iter().copied());
            },
        );

        for (i, cuboid) in scene.boxes.iter().enumerate() {
            if sphere.volume_hits_volume(cuboid) {
                assert!(candidates.contains(&i), "box {} was pruned", i);
            }
        }

        assert!(visited <= scene.tree.len());
    }
}

#[test]
fn triangle_traversal_finds_every_colliding_box() {
    let scene = random_scene(9, 2000);
    let triangle = Triangle::new(
        Point::new(-12.0, -3.0, 1.0),
        Point::new(10.0, -5.0, -2.0),
        Point::new(2.0, 11.0, 4.0),
    );

    let mut candidates = HashSet::new();
    scene.tree.visit_nodes_colliding(
        &triangle,
        &mut |_: NodeId, node: &OctreeNode<Vec<usize>>, _: Intersection| {
            candidates.extend(node.data().iter().copied());
        },
    );

    let mut colliding = 0;
    for (i, cuboid) in scene.boxes.iter().enumerate() {
        if triangle.volume_hits_volume(cuboid) {
            colliding += 1;
            assert!(candidates.contains(&i), "box {} was pruned", i);
        }
    }

    assert!(colliding > 0);
}

#[test]
fn aabb_traversal_reports_inside_subtrees() {
    let scene = random_scene(7, 300);
    let mins = Point::new(-10.0, -4.0, -16.0);
    let maxs = Point::new(16.0, 16.0, 2.0);

    let mut candidates = HashSet::new();
    let mut ids = HashSet::new();
    scene.tree.visit_nodes_colliding_aabb(
        &mins,
        &maxs,
        &mut |id: NodeId, node: &OctreeNode<Vec<usize>>, intersection: Intersection| {
            assert!(ids.insert(id), "node visited twice");

            let node_mins = node.minimum_extent();
            let node_maxs = node.maximum_extent();
            match intersection {
                Intersection::Inside => {
                    assert!((0..3).all(|i| node_mins[i] >= mins[i] && node_maxs[i] <= maxs[i]))
                }
                Intersection::Partial => {
                    assert!((0..3).all(|i| node_mins[i] <= maxs[i] && node_maxs[i] >= mins[i]))
                }
                Intersection::Outside => panic!("outside node visited"),
            }

            candidates.extend(node.data().iter().copied());
        },
    );

    for (i, cuboid) in scene.boxes.iter().enumerate() {
        let box_mins = cuboid.minimum_extent();
        let box_maxs = cuboid.maximum_extent();
        let overlaps = (0..3).all(|k| box_mins[k] <= maxs[k] && box_maxs[k] >= mins[k]);

        if overlaps {
            assert!(candidates.contains(&i), "box {} was pruned", i);
        }
    }
}

#[test]
fn clearing_the_tree() {
    let mut scene = random_scene(8, 100);
    let nodes = scene.tree.len();
    assert!(nodes > 1);

    scene.tree.clear_tree(false);
    assert_eq!(scene.tree.len(), nodes);

    let mut stored = 0;
    scene
        .tree
        .visit_nodes(&mut |_: NodeId, node: &OctreeNode<Vec<usize>>, _: Intersection| {
            stored += node.data().len()
        });
    assert_eq!(stored, 0);

    scene.tree.clear_tree(true);
    assert_eq!(scene.tree.len(), 1);

    // The tree can be filled again after a full teardown.
    let root = scene.tree.root();
    let cuboid = &scene.boxes[0];
    let node = scene
        .tree
        .get_node_at_box(root, cuboid.center(), cuboid.half_size())
        .unwrap();
    assert!(scene.tree.node(node).unwrap().contains_box(cuboid.center(), cuboid.half_size()));
}
