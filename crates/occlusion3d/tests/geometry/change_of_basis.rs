use approx::assert_relative_eq;
use occlusion3d::math::{Point, Real, Rotation, Vector};
use occlusion3d::shape::{Capsule, Cuboid, Cylinder};

fn random_rotation(rng: &mut oorandom::Rand32) -> Rotation {
    let axis = Vector::new(
        rng.rand_float() as Real - 0.5,
        rng.rand_float() as Real - 0.5,
        rng.rand_float() as Real - 0.5,
    );
    Rotation::from_scaled_axis(axis * 6.0)
}

fn random_point(rng: &mut oorandom::Rand32, scale: Real) -> Point {
    Point::new(
        (rng.rand_float() as Real - 0.5) * scale,
        (rng.rand_float() as Real - 0.5) * scale,
        (rng.rand_float() as Real - 0.5) * scale,
    )
}

#[test]
fn local_to_world_inverts_world_to_local() {
    let mut rng = oorandom::Rand32::new(7);

    for _ in 0..200 {
        let center = random_point(&mut rng, 20.0);
        let rotation = random_rotation(&mut rng);
        let capsule = Capsule::with_orientation(center, 1.0, 0.5, 0.7, rotation);
        let cylinder = Cylinder::with_orientation(center, 2.0, 0.3, 0.3, rotation);
        let cuboid = Cuboid::with_orientation(center, Vector::new(1.0, 2.0, 3.0), rotation);

        let p = random_point(&mut rng, 20.0);
        let n = random_point(&mut rng, 2.0).coords;

        assert_relative_eq!(capsule.local_to_world(&capsule.world_to_local(&p)), p, epsilon = 1.0e-3);
        assert_relative_eq!(cylinder.local_to_world(&cylinder.world_to_local(&p)), p, epsilon = 1.0e-3);
        assert_relative_eq!(cuboid.local_to_world(&cuboid.world_to_local(&p)), p, epsilon = 1.0e-3);

        assert_relative_eq!(
            capsule.normal_local_to_world(&capsule.normal_world_to_local(&n)),
            n,
            epsilon = 1.0e-4
        );
        assert_relative_eq!(
            cylinder.normal_local_to_world(&cylinder.normal_world_to_local(&n)),
            n,
            epsilon = 1.0e-4
        );
        assert_relative_eq!(
            cuboid.normal_local_to_world(&cuboid.normal_world_to_local(&n)),
            n,
            epsilon = 1.0e-4
        );

        // The local Y axis is the principal axis.
        assert_relative_eq!(
            capsule.normal_local_to_world(&Vector::y()),
            capsule.axes()[1],
            epsilon = 1.0e-5
        );
    }
}

#[test]
fn unoriented_volumes_only_translate() {
    let capsule = Capsule::new(Point::new(1.0, 2.0, 3.0), 1.0, 0.5);
    assert!(!capsule.is_oriented());
    assert_eq!(
        capsule.world_to_local(&Point::new(2.0, 2.0, 3.0)),
        Point::new(1.0, 0.0, 0.0)
    );
    assert_eq!(capsule.normal_world_to_local(&Vector::z()), Vector::z());
}
