//! Center-split binary partition index
//!
//! Splits each cell at the midline of its parent's bounds, alternating
//! split axis per level, and assigns every shape to exactly one child by
//! its bounding-disc center. Membership is a strict partition: a shape
//! whose box straddles a split line still lives on exactly one side, so
//! queries near partition boundaries can miss true overlaps. Callers that
//! need exhaustive results must widen the query by the shape extent or use
//! [`OverlapQuadIndex`](crate::spatial::OverlapQuadIndex) instead.

use log::debug;

use crate::geom::{Aabb, Ray};
use crate::shape::{BoundedShape, ShapeId};
use crate::spatial::tree::LinearTree;
use crate::spatial::BuildError;

/// Binary (K = 2) center-split spatial index
///
/// Built once over a shape collection; immutable afterwards. Every node
/// carries a member list that shrinks with depth, and a tight bounding box
/// around its members' vertices.
#[derive(Debug, Clone)]
pub struct CenterSplitIndex {
    tree: LinearTree<2>,
}

impl CenterSplitIndex {
    /// Build an index of the given depth over a shape collection
    ///
    /// `total_bounds` must enclose every shape's bounding box for query
    /// results to be meaningful. A depth of 0 yields an empty index that
    /// never returns candidates.
    ///
    /// # Errors
    ///
    /// [`BuildError::DepthTooLarge`] when the node array for `depth` would
    /// exceed the supported size.
    pub fn build<S: BoundedShape>(
        shapes: &[S],
        depth: u32,
        total_bounds: Aabb,
    ) -> Result<Self, BuildError> {
        let mut tree = LinearTree::<2>::with_depth(depth)?;
        if tree.is_empty() {
            debug!("built center-split index: 0 nodes");
            return Ok(Self { tree });
        }

        {
            let root = tree.node_mut(0);
            root.bounds = total_bounds;
            root.members = (0..shapes.len() as u32).map(ShapeId::new).collect();
        }

        let mut level_start = 0_usize;
        let mut level_size = 1_usize;
        for level in 1..depth {
            let next_start = level_start + level_size;
            let next_size = level_size * 2;
            // Odd levels split on X (vertical midline), even levels on Y
            let axis = if level % 2 == 1 { 0 } else { 1 };
            for child in next_start..next_start + next_size {
                let parent = LinearTree::<2>::parent(child);
                let take_low = LinearTree::<2>::child_slot(child) == 0;
                let members = {
                    let p = tree.node(parent);
                    let mid =
                        p.bounds.min[axis] + 0.5 * (p.bounds.max[axis] - p.bounds.min[axis]);
                    p.members
                        .iter()
                        .copied()
                        .filter(|id| {
                            let center = shapes[id.index()].disc_center()[axis];
                            if take_low {
                                center < mid
                            } else {
                                center >= mid
                            }
                        })
                        .collect::<Vec<_>>()
                };
                let bounds = tight_bounds(shapes, &members);
                let node = tree.node_mut(child);
                node.bounds = bounds;
                node.members = members;
            }
            level_start = next_start;
            level_size = next_size;
        }

        debug!(
            "built center-split index: {} nodes, depth {}, {} shapes",
            tree.len(),
            depth,
            shapes.len()
        );
        Ok(Self { tree })
    }

    /// Collect candidate shapes for a ray
    ///
    /// Returns the members of every leaf whose bounds the ray touches.
    /// Membership is a strict partition, so the result carries no
    /// duplicates by construction.
    pub fn query(&self, ray: &Ray) -> Vec<ShapeId> {
        let mut out = Vec::new();
        self.query_into(ray, &mut out);
        out
    }

    /// Collect candidates into a caller-reused buffer
    pub fn query_into(&self, ray: &Ray, out: &mut Vec<ShapeId>) {
        self.tree.traverse(ray, |node| {
            out.extend_from_slice(&node.members);
        });
    }

    /// Total number of tree nodes
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }
}

/// Tight box around the polygon vertices of the given members
fn tight_bounds<S: BoundedShape>(shapes: &[S], members: &[ShapeId]) -> Aabb {
    let mut bounds = Aabb::empty();
    for id in members {
        for vertex in shapes[id.index()].vertices() {
            bounds.enclose(*vertex);
        }
    }
    bounds
}
