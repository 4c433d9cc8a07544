/*!
occlusion3d
===========

**occlusion3d** is a 3-dimensional collision volume library written with
the rust programming language. It provides the convex volumes (sphere, box,
capsule, cylinder, triangle and view frustum) used to answer sound occlusion
queries, together with an octree organizing the scene geometry.

All queries are pure functions of their inputs: static intersection tests,
swept (time of impact) tests, ray casts and enclosing volumes.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![deny(unused_qualifications)]

#[cfg(all(feature = "f32", feature = "f64"))]
core::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[cfg(test)]
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod math;
pub mod partitioning;
pub mod query;
pub mod shape;
pub mod utils;
