//! Swept (time of impact) tests between primitives under translation.

pub use self::sat::sat_move_hit_test;
pub use self::sweep_hit::SweepHit;
pub use self::time_of_impact_ball_ball::sphere_move_hits_sphere;
pub(crate) use self::time_of_impact_ball_ball::earliest_contact;

mod sat;
mod sweep_hit;
mod time_of_impact_ball_ball;
