//! Overlap-based quad partition index
//!
//! Subdivides the total bounds into four quadrants per level. Only leaf
//! cells hold memberships, computed by testing every shape's bounding box
//! against the cell, so a shape spanning several cells is stored in each of
//! them. Query results are therefore a conservative superset of all shapes
//! whose boxes the ray actually touches, deduplicated per query.

use log::debug;

use crate::foundation::math::Point2;
use crate::geom::{Aabb, Ray};
use crate::shape::{BoundedShape, ShapeId};
use crate::spatial::tree::LinearTree;
use crate::spatial::BuildError;

/// Quaternary (K = 4) overlap-based spatial index
///
/// Built once over a shape collection; immutable afterwards. Queries carry
/// their own deduplication buffer, so any number may run concurrently on a
/// shared index.
#[derive(Debug, Clone)]
pub struct OverlapQuadIndex {
    tree: LinearTree<4>,
    shape_count: usize,
}

impl OverlapQuadIndex {
    /// Build an index of the given depth over a shape collection
    ///
    /// Shapes entirely outside `total_bounds` overlap no leaf and are
    /// silently excluded from every query. A depth of 0 yields an empty
    /// index that never returns candidates.
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
        let mut tree = LinearTree::<4>::with_depth(depth)?;
        let shape_count = shapes.len();
        if tree.is_empty() {
            debug!("built overlap-quad index: 0 nodes");
            return Ok(Self { tree, shape_count });
        }

        tree.node_mut(0).bounds = total_bounds;

        // Internal levels only carve up space
        let mut level_start = 0_usize;
        let mut level_size = 1_usize;
        for _ in 1..depth {
            let next_start = level_start + level_size;
            let next_size = level_size * 4;
            for child in next_start..next_start + next_size {
                let parent = LinearTree::<4>::parent(child);
                let slot = LinearTree::<4>::child_slot(child);
                let bounds = quadrant(tree.node(parent).bounds, slot);
                tree.node_mut(child).bounds = bounds;
            }
            level_start = next_start;
            level_size = next_size;
        }

        // Leaves take membership from the full collection, not the parent's
        // subset: a shape spanning several cells lands in each of them
        let mut stored = 0_usize;
        for index in tree.start_of_last_level()..tree.len() {
            let cell = tree.node(index).bounds;
            let members = shapes
                .iter()
                .enumerate()
                .filter(|(_, shape)| shape.bounds().overlaps(&cell))
                .map(|(i, _)| ShapeId::new(i as u32))
                .collect::<Vec<_>>();
            let node = tree.node_mut(index);
            if members.is_empty() {
                // Never leave a zero-member cell at a real location; a ray
                // grazing it would otherwise count as a visit
                node.bounds = Aabb::empty();
            } else {
                stored += members.len();
                node.members = members;
            }
        }

        debug!(
            "built overlap-quad index: {} nodes, depth {}, {} shapes, {} leaf entries",
            tree.len(),
            depth,
            shape_count,
            stored
        );
        Ok(Self { tree, shape_count })
    }

    /// Collect candidate shapes for a ray
    ///
    /// Returns every shape stored in a leaf the ray touches, each at most
    /// once even when it spans several visited leaves.
    pub fn query(&self, ray: &Ray) -> Vec<ShapeId> {
        let mut out = Vec::new();
        self.query_into(ray, &mut out);
        out
    }

    /// Collect candidates into a caller-reused buffer
    ///
    /// The deduplication marker lives on this call's stack, so concurrent
    /// queries against the same index never share mutable state.
    pub fn query_into(&self, ray: &Ray, out: &mut Vec<ShapeId>) {
        let mut seen = vec![false; self.shape_count];
        self.tree.traverse(ray, |node| {
            for &id in &node.members {
                if !seen[id.index()] {
                    seen[id.index()] = true;
                    out.push(id);
                }
            }
        });
    }

    /// Total number of tree nodes
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }
}

/// One quadrant of a cell; slots follow child order: lower-left,
/// lower-right, upper-left, upper-right
fn quadrant(bounds: Aabb, slot: usize) -> Aabb {
    let center = bounds.center();
    match slot {
        0 => Aabb::new(bounds.min, center),
        1 => Aabb::new(
            Point2::new(center.x, bounds.min.y),
            Point2::new(bounds.max.x, center.y),
        ),
        2 => Aabb::new(
            Point2::new(bounds.min.x, center.y),
            Point2::new(center.x, bounds.max.y),
        ),
        _ => Aabb::new(center, bounds.max),
    }
}
