//! Spatial partitioning tools.

pub use self::octree::{
    NodeId, Octree, OctreeConfig, OctreeData, OctreeError, OctreeNode, OCTANT_X, OCTANT_Y,
    OCTANT_Z,
};
pub use self::visitor::OctreeVisitor;

mod octree;
mod visitor;
