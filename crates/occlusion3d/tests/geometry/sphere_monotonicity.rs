use occlusion3d::math::{Point, Real};
use occlusion3d::query::details::sphere_hits_sphere;
use occlusion3d::shape::{CollisionVolume, Sphere};

#[test]
fn sphere_hits_sphere_matches_center_distance() {
    let mut rng = oorandom::Rand32::new(3);
    let mut rand = move || rng.rand_float() as Real;

    for _ in 0..1000 {
        let c1 = Point::new(rand() * 10.0, rand() * 10.0, rand() * 10.0);
        let c2 = Point::new(rand() * 10.0, rand() * 10.0, rand() * 10.0);
        let r1 = rand() * 4.0;
        let r2 = rand() * 4.0;
        let dist = occlusion3d::na::distance(&c1, &c2);

        if (dist - (r1 + r2)).abs() < 1.0e-4 {
            continue;
        }

        assert_eq!(sphere_hits_sphere(&c1, r1, &c2, r2), dist <= r1 + r2);
    }
}

#[test]
fn growing_radius_never_separates() {
    let mut rng = oorandom::Rand32::new(4);
    let mut rand = move || rng.rand_float() as Real;

    for _ in 0..500 {
        let a = Sphere::new(Point::new(rand() * 6.0, rand() * 6.0, rand() * 6.0), rand() * 2.0);
        let mut b = Sphere::new(Point::new(rand() * 6.0, rand() * 6.0, rand() * 6.0), 0.0);
        let mut hit = false;

        for _ in 0..20 {
            b.set_radius(b.radius() + 0.25);
            let now = a.volume_hits_volume(&b);
            assert!(now || !hit, "a growing sphere stopped hitting {:?}", a);
            hit = now;
        }
    }
}
