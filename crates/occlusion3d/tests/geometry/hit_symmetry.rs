use occlusion3d::math::{Point, Real, Rotation, Vector};
use occlusion3d::na::Orthographic3;
use occlusion3d::shape::{
    Capsule, CollisionVolume, Cuboid, Cylinder, Frustum, Sphere, Triangle, VolumeType,
};

struct VolumeGen {
    rng: oorandom::Rand32,
}

impl VolumeGen {
    fn real(&mut self, min: Real, max: Real) -> Real {
        min + self.rng.rand_float() as Real * (max - min)
    }

    fn point(&mut self) -> Point {
        Point::new(self.real(-3.0, 3.0), self.real(-3.0, 3.0), self.real(-3.0, 3.0))
    }

    fn rotation(&mut self) -> Rotation {
        let axis = Vector::new(self.real(-1.0, 1.0), self.real(-1.0, 1.0), self.real(-1.0, 1.0));
        Rotation::from_scaled_axis(axis * 3.0)
    }

    fn volume(&mut self, kind: u32) -> Box<dyn CollisionVolume> {
        match kind {
            0 => Box::new(Sphere::new(self.point(), self.real(0.2, 1.5))),
            1 => {
                let half_size = Vector::new(self.real(0.2, 1.5), self.real(0.2, 1.5), self.real(0.2, 1.5));
                Box::new(Cuboid::new(self.point(), half_size))
            }
            2 => {
                let half_size = Vector::new(self.real(0.2, 1.5), self.real(0.2, 1.5), self.real(0.2, 1.5));
                let rotation = self.rotation();
                Box::new(Cuboid::with_orientation(self.point(), half_size, rotation))
            }
            3 => Box::new(Triangle::new(self.point(), self.point(), self.point())),
            4 => {
                let radius = self.real(0.2, 1.0);
                let rotation = self.rotation();
                Box::new(Capsule::with_orientation(self.point(), self.real(0.2, 1.5), radius, radius, rotation))
            }
            5 => {
                let rotation = self.rotation();
                Box::new(Cylinder::with_orientation(
                    self.point(),
                    self.real(0.2, 1.5),
                    self.real(0.2, 1.0),
                    self.real(0.2, 1.0),
                    rotation,
                ))
            }
            _ => {
                let center = self.point();
                let projection = Orthographic3::new(
                    center.x - 1.0,
                    center.x + 1.0,
                    center.y - 1.0,
                    center.y + 1.0,
                    -center.z - 1.0,
                    -center.z + 1.0,
                );
                Box::new(Frustum::from_view_projection(&projection.to_homogeneous()).unwrap())
            }
        }
    }
}

#[test]
fn hits_are_symmetric() {
    let mut gen = VolumeGen {
        rng: oorandom::Rand32::new(11),
    };
    let mut hits = 0;

    for _ in 0..300 {
        let volumes: Vec<_> = (0..7).map(|kind| gen.volume(kind)).collect();

        for a in &volumes {
            for b in &volumes {
                let ab = a.volume_hits_volume(b.as_ref());
                let ba = b.volume_hits_volume(a.as_ref());
                assert_eq!(
                    ab,
                    ba,
                    "{:?} vs {:?} is not symmetric",
                    a.volume_type(),
                    b.volume_type()
                );
                hits += ab as usize;
            }
        }
    }

    assert!(hits > 0);
}

#[test]
fn unsupported_pairs_report_no_collision() {
    let cylinder = Cylinder::new(Point::origin(), 1.0, 1.0);
    let capsule = Capsule::new(Point::origin(), 1.0, 1.0);
    let displacement = Vector::new(0.1, 0.0, 0.0);

    assert!(!cylinder.volume_hits_volume(&cylinder));
    assert!(!cylinder.volume_hits_volume(&capsule));
    assert!(!capsule.volume_hits_volume(&cylinder));
    assert_eq!(cylinder.volume_move_hits_volume(&capsule, &displacement), None);
    assert_eq!(
        Sphere::new(Point::origin(), 1.0).volume_move_hits_volume(&capsule, &displacement),
        None
    );
    assert_eq!(capsule.volume_type(), VolumeType::Capsule);
}
