mod change_of_basis;
mod hit_symmetry;
mod octree_queries;
mod scenarios;
mod sphere_monotonicity;
mod swept_consistency;
mod volume_ray_cast;
