use crate::partitioning::{NodeId, OctreeNode};
use crate::query::Intersection;

/// Trait implemented by visitors called during the traversal of an octree.
///
/// The `intersection` argument tells how the visited node relates to the
/// query volume of the traversal. Nodes reached by an exhaustive traversal,
/// or lying fully inside the query box, are reported as
/// [`Intersection::Inside`]. Nodes that merely collide with the query are
/// reported as [`Intersection::Partial`].
pub trait OctreeVisitor<T> {
    /// Visits one octree node.
    fn visit_node(&mut self, id: NodeId, node: &OctreeNode<T>, intersection: Intersection);
}

impl<T, F> OctreeVisitor<T> for F
where
    F: FnMut(NodeId, &OctreeNode<T>, Intersection),
{
    fn visit_node(&mut self, id: NodeId, node: &OctreeNode<T>, intersection: Intersection) {
        (self)(id, node, intersection)
    }
}
