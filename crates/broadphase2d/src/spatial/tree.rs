//! Implicit K-ary tree storage and stackless ray traversal
//!
//! The nodes of a complete K-ary tree live in one flat, zero-based array.
//! Parent/child relationships are index arithmetic, never pointers: the
//! children of node `p` sit at `K*p + 1 ..= K*p + K`, the parent of node
//! `c` at `(c - 1) / K`. Both index variants share this storage and the
//! pre-order traversal below.

use crate::geom::{Aabb, Ray};
use crate::shape::ShapeId;
use crate::spatial::BuildError;

/// Hard cap on the node array length; builds beyond it are rejected
pub const MAX_NODES: usize = 1 << 20;

/// Single cell of an index
#[derive(Debug, Clone)]
pub struct Node {
    /// Bounds of this cell; the degenerate empty box when the cell holds
    /// no shapes
    pub bounds: Aabb,
    /// Shapes assigned to this cell (left empty on levels a variant does
    /// not populate)
    pub members: Vec<ShapeId>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            bounds: Aabb::empty(),
            members: Vec::new(),
        }
    }
}

/// Complete K-ary tree of nodes in a flat array
///
/// A tree of depth `d` holds `1 + K + ... + K^(d-1)` nodes; depth 0 holds
/// none. The array is the entire ownership of the tree; no node refers to
/// another except through index arithmetic.
#[derive(Debug, Clone)]
pub struct LinearTree<const K: usize> {
    nodes: Vec<Node>,
    start_of_last_level: usize,
}

impl<const K: usize> LinearTree<K> {
    /// Number of nodes in a complete K-ary tree of the given depth
    ///
    /// Returns `None` when the count would exceed [`MAX_NODES`].
    pub fn node_count(depth: u32) -> Option<usize> {
        let mut total = 0_usize;
        let mut level_size = 1_usize;
        for _ in 0..depth {
            total = total.checked_add(level_size)?;
            if total > MAX_NODES {
                return None;
            }
            level_size = level_size.checked_mul(K)?;
        }
        Some(total)
    }

    /// Allocate a tree of default (empty) nodes for the given depth
    pub(crate) fn with_depth(depth: u32) -> Result<Self, BuildError> {
        let total = Self::node_count(depth).ok_or(BuildError::DepthTooLarge {
            depth,
            max_nodes: MAX_NODES,
        })?;
        // node_count(depth - 1) cannot fail once node_count(depth) succeeded
        let start_of_last_level = depth
            .checked_sub(1)
            .and_then(Self::node_count)
            .unwrap_or(0);
        Ok(Self {
            nodes: (0..total).map(|_| Node::default()).collect(),
            start_of_last_level,
        })
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes at all (depth-0 build)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index of the first node in the deepest level
    pub fn start_of_last_level(&self) -> usize {
        self.start_of_last_level
    }

    /// Borrow a node
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut Node {
        &mut self.nodes[index]
    }

    /// Whether the node at `index` is a leaf
    pub fn is_leaf(&self, index: usize) -> bool {
        index >= self.start_of_last_level
    }

    /// Index of the first child of `parent`
    pub fn first_child(parent: usize) -> usize {
        K * parent + 1
    }

    /// Index of the child of `parent` in the given slot (`0..K`)
    pub fn child(parent: usize, slot: usize) -> usize {
        debug_assert!(slot < K);
        K * parent + 1 + slot
    }

    /// Index of the parent of a non-root node
    pub fn parent(index: usize) -> usize {
        debug_assert!(index > 0);
        (index - 1) / K
    }

    /// Slot (`0..K`) a non-root node occupies among its siblings
    pub fn child_slot(index: usize) -> usize {
        debug_assert!(index > 0);
        (index - 1) % K
    }

    /// Pre-order depth-first walk with O(1) auxiliary state
    ///
    /// A single integer cursor drives the walk. Subtrees whose bounds miss
    /// the ray are pruned; `visit_leaf` runs for every leaf the ray
    /// reaches. Returns the number of nodes examined, which never exceeds
    /// [`Self::len`].
    pub fn traverse<F>(&self, ray: &Ray, mut visit_leaf: F) -> usize
    where
        F: FnMut(&Node),
    {
        let mut ptr = 0_usize;
        let mut steps = 0_usize;
        while ptr < self.nodes.len() {
            steps += 1;
            let node = &self.nodes[ptr];
            if node.bounds.intersects_ray(ray) {
                if !self.is_leaf(ptr) {
                    ptr = Self::first_child(ptr);
                    continue;
                }
                visit_leaf(node);
            }
            match Self::next_subtree(ptr) {
                Some(next) => ptr = next,
                None => break,
            }
        }
        steps
    }

    /// Climb-and-step rule shared by the traversal
    ///
    /// Climb while the cursor is the last of its K siblings, then advance
    /// to the next sibling. `None` once the climb reaches the root: the
    /// whole tree has been visited.
    fn next_subtree(mut ptr: usize) -> Option<usize> {
        while ptr != 0 && (ptr - 1) % K == K - 1 {
            ptr = Self::parent(ptr);
        }
        if ptr == 0 {
            None
        } else {
            Some(ptr + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Point2, Vec2};

    /// Reference recursive pre-order over a complete K-ary tree
    fn recursive_preorder<const K: usize>(root: usize, len: usize, order: &mut Vec<usize>) {
        if root >= len {
            return;
        }
        order.push(root);
        for slot in 0..K {
            recursive_preorder::<K>(LinearTree::<K>::child(root, slot), len, order);
        }
    }

    /// Pre-order driven purely by the iterative cursor rules
    fn cursor_preorder<const K: usize>(tree: &LinearTree<K>) -> Vec<usize> {
        let mut order = Vec::new();
        let mut ptr = 0;
        while ptr < tree.len() {
            order.push(ptr);
            if !tree.is_leaf(ptr) {
                ptr = LinearTree::<K>::first_child(ptr);
                continue;
            }
            match LinearTree::<K>::next_subtree(ptr) {
                Some(next) => ptr = next,
                None => break,
            }
        }
        order
    }

    fn everywhere_box() -> Aabb {
        Aabb::new(Point2::new(-1e9, -1e9), Point2::new(1e9, 1e9))
    }

    #[test]
    fn test_node_count() {
        assert_eq!(LinearTree::<2>::node_count(0), Some(0));
        assert_eq!(LinearTree::<2>::node_count(1), Some(1));
        assert_eq!(LinearTree::<2>::node_count(3), Some(7));
        assert_eq!(LinearTree::<4>::node_count(3), Some(21));
        assert_eq!(LinearTree::<4>::node_count(10), Some(349_525));
        // 4^20 is far past the cap
        assert_eq!(LinearTree::<4>::node_count(20), None);
    }

    #[test]
    fn test_with_depth_rejects_oversized_trees() {
        let result = LinearTree::<4>::with_depth(20);
        assert_eq!(
            result.err(),
            Some(BuildError::DepthTooLarge {
                depth: 20,
                max_nodes: MAX_NODES
            })
        );
    }

    #[test]
    fn test_start_of_last_level() {
        let tree = LinearTree::<2>::with_depth(3).unwrap();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.start_of_last_level(), 3);
        assert!(!tree.is_leaf(2));
        assert!(tree.is_leaf(3));
        assert!(tree.is_leaf(6));

        let quad = LinearTree::<4>::with_depth(3).unwrap();
        assert_eq!(quad.len(), 21);
        assert_eq!(quad.start_of_last_level(), 5);

        // A depth-1 tree is just a root leaf
        let stub = LinearTree::<4>::with_depth(1).unwrap();
        assert_eq!(stub.len(), 1);
        assert!(stub.is_leaf(0));
    }

    #[test]
    fn test_leaf_formulations_agree() {
        fn check<const K: usize>(depth: u32) {
            let tree = LinearTree::<K>::with_depth(depth).unwrap();
            for index in 0..tree.len() {
                let no_children = LinearTree::<K>::first_child(index) >= tree.len();
                assert_eq!(tree.is_leaf(index), no_children, "node {index}");
            }
        }
        check::<2>(1);
        check::<2>(4);
        check::<4>(1);
        check::<4>(3);
    }

    #[test]
    fn test_index_arithmetic_round_trips() {
        fn check<const K: usize>() {
            let len = LinearTree::<K>::node_count(4).unwrap();
            for parent in 0..len {
                for slot in 0..K {
                    let child = LinearTree::<K>::child(parent, slot);
                    if child >= len {
                        continue;
                    }
                    assert_eq!(LinearTree::<K>::parent(child), parent);
                    assert_eq!(LinearTree::<K>::child_slot(child), slot);
                }
            }
            for index in 1..len {
                let parent = LinearTree::<K>::parent(index);
                let slot = LinearTree::<K>::child_slot(index);
                assert_eq!(LinearTree::<K>::child(parent, slot), index);
            }
        }
        check::<2>();
        check::<4>();
    }

    #[test]
    fn test_cursor_walk_is_preorder_binary() {
        let tree = LinearTree::<2>::with_depth(3).unwrap();
        assert_eq!(cursor_preorder(&tree), vec![0, 1, 3, 4, 2, 5, 6]);
    }

    #[test]
    fn test_cursor_walk_is_preorder_quad() {
        let tree = LinearTree::<4>::with_depth(3).unwrap();
        let mut expected = Vec::new();
        recursive_preorder::<4>(0, tree.len(), &mut expected);
        assert_eq!(cursor_preorder(&tree), expected);
        // Every node appears exactly once
        assert_eq!(expected.len(), tree.len());
    }

    #[test]
    fn test_traverse_visits_every_leaf_when_nothing_prunes() {
        let mut tree = LinearTree::<4>::with_depth(3).unwrap();
        for index in 0..tree.len() {
            tree.node_mut(index).bounds = everywhere_box();
        }
        let ray = Ray::new(Point2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        let mut leaves = 0;
        let steps = tree.traverse(&ray, |_| leaves += 1);
        assert_eq!(leaves, 16);
        assert_eq!(steps, tree.len());
    }

    #[test]
    fn test_traverse_prunes_missed_root() {
        let tree = LinearTree::<2>::with_depth(3).unwrap();
        // All nodes still carry the default empty box
        let ray = Ray::new(Point2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        let mut leaves = 0;
        let steps = tree.traverse(&ray, |_| leaves += 1);
        assert_eq!(leaves, 0);
        assert_eq!(steps, 1);
    }

    #[test]
    fn test_traverse_empty_tree() {
        let tree = LinearTree::<2>::with_depth(0).unwrap();
        let ray = Ray::new(Point2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        let steps = tree.traverse(&ray, |_| panic!("no leaf to visit"));
        assert_eq!(steps, 0);
    }

    #[test]
    fn test_traverse_step_bound_holds_on_deep_tree() {
        let mut tree = LinearTree::<4>::with_depth(10).unwrap();
        for index in 0..tree.len() {
            tree.node_mut(index).bounds = everywhere_box();
        }
        let ray = Ray::new(Point2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let steps = tree.traverse(&ray, |_| {});
        assert!(steps <= tree.len(), "steps {} exceed {}", steps, tree.len());
    }
}
