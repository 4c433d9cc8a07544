// A swept hit at `t` must touch when the moving volume is placed at `t`, and
// must not overlap at any earlier time. A sweep without hit must not overlap
// anywhere along the displacement. The path is sampled densely, and the
// volumes are slightly enlarged or shrunk to keep the checks away from exact
// contacts.

use occlusion3d::math::{Point, Real, Rotation, Vector};
use occlusion3d::query::SweepHit;
use occlusion3d::shape::{CollisionVolume, Cuboid, Sphere, Triangle};

const MARGIN: Real = 1.0e-3;
const SAMPLES: usize = 256;

struct Rng(oorandom::Rand32);

impl Rng {
    fn real(&mut self, min: Real, max: Real) -> Real {
        min + self.0.rand_float() as Real * (max - min)
    }

    fn vector(&mut self, extent: Real) -> Vector {
        Vector::new(
            self.real(-extent, extent),
            self.real(-extent, extent),
            self.real(-extent, extent),
        )
    }

    fn rotation(&mut self) -> Rotation {
        Rotation::from_scaled_axis(self.vector(3.0))
    }
}

/// Checks a swept result against static tests of the moving volume placed
/// along its path. `place(t, grow)` builds the moving volume at time `t`,
/// dilated by `grow` (negative to shrink it).
fn check_sweep(
    hit: Option<SweepHit>,
    stationary: &dyn CollisionVolume,
    place: impl Fn(Real, Real) -> Box<dyn CollisionVolume>,
) -> bool {
    let toi = SweepHit::time_of_impact_or_one(hit);

    if let Some(hit) = hit {
        assert!((0.0..1.0).contains(&hit.time_of_impact));
        assert!((hit.normal.norm() - 1.0).abs() < 1.0e-3);
        assert!(
            place(toi, MARGIN).volume_hits_volume(stationary),
            "no contact at the time of impact {}",
            toi
        );
    }

    // Samples `[0, toi)`, the whole displacement when nothing was hit.
    for k in 0..SAMPLES {
        let t = toi * k as Real / SAMPLES as Real;

        if toi > 0.0 {
            assert!(
                !place(t, -MARGIN).volume_hits_volume(stationary),
                "contact at {} missed by the sweep, which reported {:?}",
                t,
                hit.map(|hit| hit.time_of_impact)
            );
        }
    }

    hit.is_some()
}

#[test]
fn sphere_moving_against_sphere() {
    let mut rng = Rng(oorandom::Rand32::new(21));
    let mut hits = 0;

    for _ in 0..500 {
        let stationary = Sphere::new(Point::from(rng.vector(3.0)), rng.real(0.2, 1.5));
        let center = Point::from(rng.vector(3.0));
        let radius = rng.real(0.2, 1.5);
        let displacement = rng.vector(6.0);
        let moving = Sphere::new(center, radius);

        let hit = moving.volume_move_hits_volume(&stationary, &displacement);
        hits += check_sweep(hit, &stationary, |t, grow| {
            Box::new(Sphere::new(center + displacement * t, radius + grow))
        }) as usize;
    }

    assert!(hits > 0);
}

#[test]
fn sphere_moving_against_box() {
    let mut rng = Rng(oorandom::Rand32::new(22));
    let mut hits = 0;

    for i in 0..500 {
        let half_size = Vector::new(rng.real(0.2, 1.5), rng.real(0.2, 1.5), rng.real(0.2, 1.5));
        let mut stationary = Cuboid::new(Point::from(rng.vector(3.0)), half_size);
        if i % 2 == 0 {
            stationary.set_orientation(rng.rotation());
        }

        let center = Point::from(rng.vector(3.0));
        let radius = rng.real(0.2, 1.5);
        let displacement = rng.vector(6.0);
        let moving = Sphere::new(center, radius);

        let hit = moving.volume_move_hits_volume(&stationary, &displacement);
        hits += check_sweep(hit, &stationary, |t, grow| {
            Box::new(Sphere::new(center + displacement * t, radius + grow))
        }) as usize;
    }

    assert!(hits > 0);
}

#[test]
fn box_moving_against_box() {
    let mut rng = Rng(oorandom::Rand32::new(23));
    let mut hits = 0;

    for i in 0..500 {
        let oriented = i % 2 == 0;
        let stationary_half = Vector::new(rng.real(0.2, 1.5), rng.real(0.2, 1.5), rng.real(0.2, 1.5));
        let mut stationary = Cuboid::new(Point::from(rng.vector(3.0)), stationary_half);
        let center = Point::from(rng.vector(3.0));
        let half_size = Vector::new(rng.real(0.2, 1.5), rng.real(0.2, 1.5), rng.real(0.2, 1.5));
        let orientation = if oriented {
            stationary.set_orientation(rng.rotation());
            rng.rotation()
        } else {
            Rotation::identity()
        };
        let displacement = rng.vector(6.0);
        let moving = Cuboid::with_orientation(center, half_size, orientation);

        let hit = moving.volume_move_hits_volume(&stationary, &displacement);
        hits += check_sweep(hit, &stationary, |t, grow| {
            Box::new(Cuboid::with_orientation(
                center + displacement * t,
                half_size.add_scalar(grow),
                orientation,
            ))
        }) as usize;
    }

    assert!(hits > 0);
}

#[test]
fn sphere_moving_against_triangle() {
    let mut rng = Rng(oorandom::Rand32::new(24));
    let mut hits = 0;

    for _ in 0..500 {
        let stationary = Triangle::new(
            Point::from(rng.vector(2.0)),
            Point::from(rng.vector(2.0)),
            Point::from(rng.vector(2.0)),
        );

        if stationary.normal().norm() < 0.5 {
            continue;
        }

        let center = Point::from(rng.vector(3.0));
        let radius = rng.real(0.2, 1.5);
        let displacement = rng.vector(6.0);
        let moving = Sphere::new(center, radius);

        let hit = moving.volume_move_hits_volume(&stationary, &displacement);
        hits += check_sweep(hit, &stationary, |t, grow| {
            Box::new(Sphere::new(center + displacement * t, radius + grow))
        }) as usize;
    }

    assert!(hits > 0);
}

#[test]
fn sphere_crossing_below_a_box_corner() {
    // The path ends on the opposite side of the box center along y.
    let stationary = Cuboid::new(Point::origin(), Vector::repeat(1.0));
    let center = Point::new(3.0, 0.1, 0.0);
    let displacement = Vector::new(-3.0, -2.4, 0.0);
    let moving = Sphere::new(center, 0.5);

    let hit = moving.volume_move_hits_volume(&stationary, &displacement);
    assert!(check_sweep(hit, &stationary, |t, grow| {
        Box::new(Sphere::new(center + displacement * t, 0.5 + grow))
    }));
}
