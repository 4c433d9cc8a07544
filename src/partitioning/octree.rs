//! Octree partitioning the scene geometry by bounding box.

use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Point, Vector};
use crate::partitioning::OctreeVisitor;
use crate::query::Intersection;
use crate::shape::{CollisionVolume, Cuboid};
use slab::Slab;
use smallvec::SmallVec;

/// Octant bit set for children on the positive side of the X axis.
pub const OCTANT_X: usize = 4;
/// Octant bit set for children on the positive side of the Y axis.
pub const OCTANT_Y: usize = 2;
/// Octant bit set for children on the positive side of the Z axis.
pub const OCTANT_Z: usize = 1;

const OCTANT_BITS: [usize; 3] = [OCTANT_X, OCTANT_Y, OCTANT_Z];
const TRAVERSAL_STACK_SIZE: usize = 32;

/// Errors raised by invalid octree operations.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum OctreeError {
    /// An octant index outside of `0..8`.
    #[error("invalid octant index {0}, expected a value in 0..8")]
    InvalidOctant(usize),
    /// A node handle that does not belong to this octree.
    #[error("the node does not exist in this octree")]
    InvalidNode,
    /// A node extent with a negative component.
    #[error("octree half sizes must not be negative")]
    InvalidHalfSize,
}

/// Handle of a node of an [`Octree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(usize);

/// Parameters controlling how an [`Octree`] grows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OctreeConfig {
    /// The depth of the deepest nodes [`Octree::get_node_at_box`] may create.
    /// The root is at depth 0.
    pub max_depth: usize,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self { max_depth: 8 }
    }
}

/// Payload stored at each octree node.
pub trait OctreeData {
    /// Creates the payload of a new node with the given extent.
    fn create(center: &Point, half_size: &Vector) -> Self;

    /// Removes everything stored in this payload.
    fn clear(&mut self);
}

impl<T> OctreeData for Vec<T> {
    fn create(_center: &Point, _half_size: &Vector) -> Self {
        Vec::new()
    }

    fn clear(&mut self) {
        Vec::clear(self)
    }
}

/// A node of an [`Octree`], covering the box `center ± half_size`.
#[derive(Clone, Debug)]
pub struct OctreeNode<T> {
    center: Point,
    half_size: Vector,
    parent: Option<NodeId>,
    children: [Option<NodeId>; 8],
    depth: usize,
    data: T,
}

impl<T> OctreeNode<T> {
    /// The center of this node.
    #[inline]
    pub fn center(&self) -> &Point {
        &self.center
    }

    /// The half extents of this node.
    #[inline]
    pub fn half_size(&self) -> &Vector {
        &self.half_size
    }

    /// The parent of this node, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The children of this node, indexed by octant.
    #[inline]
    pub fn children(&self) -> &[Option<NodeId>; 8] {
        &self.children
    }

    /// The depth of this node, 0 for the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The payload of this node.
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// The mutable payload of this node.
    #[inline]
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// The corner of this node with the smallest coordinates.
    #[inline]
    pub fn minimum_extent(&self) -> Point {
        self.center - self.half_size
    }

    /// The corner of this node with the largest coordinates.
    #[inline]
    pub fn maximum_extent(&self) -> Point {
        self.center + self.half_size
    }

    /// The extent of this node as an axis-aligned box.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_half_extents(self.center, self.half_size)
    }

    /// The extent of this node as a collision box.
    #[inline]
    pub fn bounding_box(&self) -> Cuboid {
        Cuboid::new(self.center, self.half_size)
    }

    /// Does the box `center ± half_size` fit inside this node?
    pub fn contains_box(&self, center: &Point, half_size: &Vector) -> bool {
        self.aabb().contains(&Aabb::from_half_extents(*center, *half_size))
    }

    /// Is `point` inside this node? Points on the boundary are inside.
    #[inline]
    pub fn contains_point(&self, point: &Point) -> bool {
        self.aabb().contains_local_point(point)
    }

    /// The octant fully containing the extent of the box `center ± half_size`
    /// relative to the center of this node.
    ///
    /// Returns `None` if the box straddles the center of this node along one
    /// axis, in which case the box belongs to this node rather than to one
    /// of its children.
    pub fn find_octant_at_box(&self, center: &Point, half_size: &Vector) -> Option<usize> {
        let mut octant = 0;

        for (i, bit) in OCTANT_BITS.iter().enumerate() {
            if center[i] - half_size[i] >= self.center[i] {
                octant |= bit;
            } else if center[i] + half_size[i] > self.center[i] {
                return None;
            }
        }

        Some(octant)
    }

    /// The octant containing `point` relative to the center of this node.
    pub fn find_octant_at_point(&self, point: &Point) -> usize {
        OCTANT_BITS
            .iter()
            .enumerate()
            .filter(|(i, _)| point[*i] >= self.center[*i])
            .fold(0, |octant, (_, bit)| octant | bit)
    }

    fn child_extent(&self, octant: usize) -> (Point, Vector) {
        let half_size = self.half_size * 0.5;
        let offset = Vector::from_fn(|i, _| {
            if octant & OCTANT_BITS[i] != 0 {
                half_size[i]
            } else {
                -half_size[i]
            }
        });
        (self.center + offset, half_size)
    }
}

/// An octree whose nodes are created on demand.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Each node owns
/// its children, the parent link is a plain handle. The root always exists.
#[derive(Clone, Debug)]
pub struct Octree<T> {
    nodes: Slab<OctreeNode<T>>,
    root: NodeId,
    config: OctreeConfig,
}

impl<T: OctreeData> Octree<T> {
    /// Creates an octree with a single root node covering `center ± half_size`.
    pub fn new(center: Point, half_size: Vector) -> Result<Self, OctreeError> {
        Self::with_config(center, half_size, OctreeConfig::default())
    }

    /// Creates an octree with a single root node and the given configuration.
    pub fn with_config(
        center: Point,
        half_size: Vector,
        config: OctreeConfig,
    ) -> Result<Self, OctreeError> {
        if half_size.iter().any(|e| *e < 0.0) {
            return Err(OctreeError::InvalidHalfSize);
        }

        let mut nodes = Slab::new();
        let root = NodeId(nodes.insert(OctreeNode {
            center,
            half_size,
            parent: None,
            children: [None; 8],
            depth: 0,
            data: T::create(&center, &half_size),
        }));

        Ok(Self {
            nodes,
            root,
            config,
        })
    }

    /// The child of `node` at `octant`, created if it does not exist yet.
    pub fn get_or_create_child(&mut self, node: NodeId, octant: usize) -> Result<NodeId, OctreeError> {
        if let Some(child) = self.child(node, octant)? {
            return Ok(child);
        }

        let parent = self.node(node)?;
        let (center, half_size) = parent.child_extent(octant);
        let child = OctreeNode {
            center,
            half_size,
            parent: Some(node),
            children: [None; 8],
            depth: parent.depth + 1,
            data: T::create(&center, &half_size),
        };

        let id = NodeId(self.nodes.insert(child));
        self.nodes[node.0].children[octant] = Some(id);
        Ok(id)
    }

    /// The deepest node below `from` where the box `center ± half_size`
    /// belongs, creating the missing nodes on the way.
    ///
    /// The descent stops at the first node whose center is straddled by the
    /// box, or at the maximum depth of the configuration.
    pub fn get_node_at_box(
        &mut self,
        from: NodeId,
        center: &Point,
        half_size: &Vector,
    ) -> Result<NodeId, OctreeError> {
        let mut curr = from;

        loop {
            let node = self.node(curr)?;

            let Some(octant) = node.find_octant_at_box(center, half_size) else {
                return Ok(curr);
            };

            if node.depth >= self.config.max_depth {
                log::debug!(
                    "Octree depth limit {} reached, keeping box {:?} at {:?}.",
                    self.config.max_depth,
                    center,
                    curr
                );
                return Ok(curr);
            }

            curr = self.get_or_create_child(curr, octant)?;
        }
    }

    /// Removes everything stored in the tree.
    ///
    /// If `clear_nodes` is `true`, every node but the root is removed too.
    /// Otherwise the empty nodes are kept for reuse.
    pub fn clear_tree(&mut self, clear_nodes: bool) {
        if clear_nodes {
            let root = self.root;
            self.nodes.retain(|id, _| id == root.0);
            self.nodes[root.0].children = [None; 8];
        }

        for (_, node) in self.nodes.iter_mut() {
            node.data.clear();
        }
    }
}

#[allow(clippy::len_without_is_empty)]
impl<T> Octree<T> {
    /// The configuration of this octree.
    #[inline]
    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The number of nodes of this octree, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The node with the given handle.
    pub fn node(&self, id: NodeId) -> Result<&OctreeNode<T>, OctreeError> {
        self.nodes.get(id.0).ok_or(OctreeError::InvalidNode)
    }

    /// The mutable node with the given handle.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut OctreeNode<T>, OctreeError> {
        self.nodes.get_mut(id.0).ok_or(OctreeError::InvalidNode)
    }

    /// The payload of the given node.
    pub fn data(&self, id: NodeId) -> Result<&T, OctreeError> {
        self.node(id).map(OctreeNode::data)
    }

    /// The mutable payload of the given node.
    pub fn data_mut(&mut self, id: NodeId) -> Result<&mut T, OctreeError> {
        self.node_mut(id).map(OctreeNode::data_mut)
    }

    /// The depth of the given node, 0 for the root.
    pub fn depth(&self, id: NodeId) -> Result<usize, OctreeError> {
        self.node(id).map(OctreeNode::depth)
    }

    /// The child of `node` at `octant`, if it exists.
    pub fn child(&self, node: NodeId, octant: usize) -> Result<Option<NodeId>, OctreeError> {
        if octant >= 8 {
            return Err(OctreeError::InvalidOctant(octant));
        }

        Ok(self.node(node)?.children[octant])
    }

    /// See [`OctreeNode::find_octant_at_box`].
    pub fn find_octant_at_box(
        &self,
        node: NodeId,
        center: &Point,
        half_size: &Vector,
    ) -> Result<Option<usize>, OctreeError> {
        Ok(self.node(node)?.find_octant_at_box(center, half_size))
    }

    /// See [`OctreeNode::find_octant_at_point`].
    pub fn find_octant_at_point(&self, node: NodeId, point: &Point) -> Result<usize, OctreeError> {
        Ok(self.node(node)?.find_octant_at_point(point))
    }

    /// The existing node below `from` where [`Self::get_node_at_box`] would
    /// place the box `center ± half_size`.
    ///
    /// Returns `None` if that node has not been created.
    pub fn find_node_at_box(
        &self,
        from: NodeId,
        center: &Point,
        half_size: &Vector,
    ) -> Result<Option<NodeId>, OctreeError> {
        let mut curr = from;

        loop {
            let node = self.node(curr)?;

            match node.find_octant_at_box(center, half_size) {
                Some(_) if node.depth >= self.config.max_depth => return Ok(Some(curr)),
                Some(octant) => match node.children[octant] {
                    Some(child) => curr = child,
                    None => return Ok(None),
                },
                None => return Ok(Some(curr)),
            }
        }
    }

    /// The deepest existing node below `from` fully containing the box
    /// `center ± half_size` relative to the node centers.
    pub fn search_tree_for_box(
        &self,
        from: NodeId,
        center: &Point,
        half_size: &Vector,
    ) -> Result<NodeId, OctreeError> {
        let mut curr = from;

        loop {
            let node = self.node(curr)?;

            match node
                .find_octant_at_box(center, half_size)
                .and_then(|octant| node.children[octant])
            {
                Some(child) => curr = child,
                None => return Ok(curr),
            }
        }
    }

    /// The deepest existing node below `from` containing `point`.
    pub fn search_tree_for_point(&self, from: NodeId, point: &Point) -> Result<NodeId, OctreeError> {
        let mut curr = from;

        loop {
            let node = self.node(curr)?;

            match node.children[node.find_octant_at_point(point)] {
                Some(child) => curr = child,
                None => return Ok(curr),
            }
        }
    }

    /// Removes `node` and all its descendants.
    ///
    /// The root cannot be removed, use [`Octree::clear_tree`] instead.
    pub fn remove_node(&mut self, node: NodeId) -> Result<(), OctreeError> {
        let parent = self.node(node)?.parent.ok_or(OctreeError::InvalidNode)?;

        for child in self.nodes[parent.0].children.iter_mut() {
            if *child == Some(node) {
                *child = None;
            }
        }

        let mut stack: SmallVec<[NodeId; TRAVERSAL_STACK_SIZE]> = SmallVec::new();
        stack.push(node);

        while let Some(id) = stack.pop() {
            let removed = self.nodes.remove(id.0);
            stack.extend(removed.children.iter().flatten().copied());
        }

        Ok(())
    }

    /// Visits every node of this octree, parents before their children.
    ///
    /// Every node is reported as [`Intersection::Inside`].
    pub fn visit_nodes(&self, visitor: &mut impl OctreeVisitor<T>) {
        self.visit_subtree(self.root, Intersection::Inside, visitor)
    }

    /// Visits the nodes whose extent collides with `volume`.
    ///
    /// The subtrees of the nodes not colliding with `volume` are skipped.
    /// The visited nodes are reported as [`Intersection::Partial`].
    pub fn visit_nodes_colliding(
        &self,
        volume: &dyn CollisionVolume,
        visitor: &mut impl OctreeVisitor<T>,
    ) {
        let mut stack: SmallVec<[NodeId; TRAVERSAL_STACK_SIZE]> = SmallVec::new();
        stack.push(self.root);

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];

            if volume.cuboid_hits_volume(&node.bounding_box()) {
                visitor.visit_node(id, node, Intersection::Partial);
                stack.extend(node.children.iter().flatten().copied());
            }
        }
    }

    /// Visits the nodes whose extent overlaps the box `[mins, maxs]`.
    ///
    /// Nodes fully inside the box are reported as [`Intersection::Inside`]
    /// and their subtrees are visited without further test.
    pub fn visit_nodes_colliding_aabb(
        &self,
        mins: &Point,
        maxs: &Point,
        visitor: &mut impl OctreeVisitor<T>,
    ) {
        let query = Aabb::new(*mins, *maxs);
        let mut stack: SmallVec<[NodeId; TRAVERSAL_STACK_SIZE]> = SmallVec::new();
        stack.push(self.root);

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];

            match node.aabb().classify(&query) {
                Intersection::Outside => {}
                Intersection::Inside => self.visit_subtree(id, Intersection::Inside, visitor),
                Intersection::Partial => {
                    visitor.visit_node(id, node, Intersection::Partial);
                    stack.extend(node.children.iter().flatten().copied());
                }
            }
        }
    }

    fn visit_subtree(
        &self,
        from: NodeId,
        intersection: Intersection,
        visitor: &mut impl OctreeVisitor<T>,
    ) {
        let mut stack: SmallVec<[NodeId; TRAVERSAL_STACK_SIZE]> = SmallVec::new();
        stack.push(from);

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            visitor.visit_node(id, node, intersection);
            // Reversed so that children are visited in octant order.
            stack.extend(node.children.iter().rev().flatten().copied());
        }
    }
}
