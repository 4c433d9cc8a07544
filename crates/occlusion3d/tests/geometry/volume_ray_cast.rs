use occlusion3d::math::{Point, Real, Rotation, Vector};
use occlusion3d::na;
use occlusion3d::query::Ray;
use occlusion3d::shape::{Capsule, CollisionVolume, Cuboid, Sphere};

fn random_rotation(rng: &mut oorandom::Rand32) -> Rotation {
    if rng.rand_float() < 0.01 {
        Rotation::identity()
    } else {
        na::Unit::try_new(
            na::Quaternion::new(
                rng.rand_float() as Real,
                rng.rand_float() as Real,
                rng.rand_float() as Real,
                rng.rand_float() as Real,
            ),
            1.0e-5,
        )
        .unwrap_or(Rotation::identity())
    }
}

/// Casts rays toward the origin and checks that the hit point lies on the
/// surface: slightly inside along the normal is inside, slightly outside
/// is not, and casting back from outside misses.
fn run_test(name: &str, make: impl Fn(Rotation) -> Box<dyn CollisionVolume>) {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..1000 {
        let ray_origin = Point::from(
            Vector::from_fn(|_, _| rng.rand_float() as Real - 0.5).normalize() * 5.0,
        );
        let ray = Ray::new(ray_origin, Point::origin() - ray_origin);
        let rotation = random_rotation(&mut rng);
        let volume = make(rotation);

        let toi = volume
            .ray_hits_volume(&ray)
            .unwrap_or_else(|| panic!("Ray {ray:?} did not hit {name} rotated with {rotation:?}"));

        let point = ray.point_at(toi);
        let normal = volume.normal_at_point(&point);
        let nudged_in = point - normal * 0.001;
        let nudged_out = point + normal * 0.001;

        assert!(
            volume.is_point_inside(&nudged_in),
            "{} rotated with {:?} does not contain point nudged in {:?}",
            name,
            rotation,
            nudged_in,
        );
        assert!(
            !volume.is_point_inside(&nudged_out),
            "{} rotated with {:?} contains point nudged out {:?}",
            name,
            rotation,
            nudged_out,
        );

        let back = Ray::new(nudged_out, ray_origin - nudged_out);
        assert_eq!(
            volume.ray_hits_volume(&back),
            None,
            "Ray {:?} from outside {} hit it again",
            back,
            name
        );
    }
}

#[test]
fn ray_cast_points_to_surface() {
    run_test("sphere with radius 1", |_| {
        Box::new(Sphere::new(Point::origin(), 1.0))
    });
    run_test("cube with half-side 1", |rotation| {
        Box::new(Cuboid::with_orientation(Point::origin(), Vector::repeat(1.0), rotation))
    });
    run_test("flat box", |rotation| {
        Box::new(Cuboid::with_orientation(Point::origin(), Vector::new(1.0, 1.0, 0.5), rotation))
    });
    run_test("capsule", |rotation| {
        Box::new(Capsule::with_orientation(Point::origin(), 1.0, 0.5, 0.5, rotation))
    });
    run_test("tapered capsule", |rotation| {
        Box::new(Capsule::with_orientation(Point::origin(), 1.0, 0.3, 0.8, rotation))
    });
}
