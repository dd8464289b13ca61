//! Spatial partitioning data structures
//!
//! Provides two static, build-once indexes that narrow a ray query down to
//! a candidate subset of a shape collection:
//!
//! - [`CenterSplitIndex`]: binary partition by bounding-disc center; every
//!   shape lives on exactly one root-to-leaf path, so results near split
//!   lines can undercount overlaps.
//! - [`OverlapQuadIndex`]: quadrant partition of space with overlap-based
//!   leaf membership; results are a conservative superset of all shapes
//!   whose boxes the ray touches.
//!
//! Both store their nodes in a flat [`LinearTree`] and share its stackless
//! ray traversal. A built index is immutable; concurrent read-only queries
//! need no locking.

mod center_split;
mod overlap_quad;
mod tree;

pub use center_split::CenterSplitIndex;
pub use overlap_quad::OverlapQuadIndex;
pub use tree::{LinearTree, Node, MAX_NODES};

/// Errors reported while building a spatial index
///
/// Detected synchronously at build time; queries never fail. A failed build
/// leaves no partially-constructed index behind.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// Requested tree depth would need more nodes than the index supports
    #[error("tree depth {depth} needs more than the supported {max_nodes} nodes")]
    DepthTooLarge {
        /// The rejected depth
        depth: u32,
        /// Hard cap on the node array length
        max_nodes: usize,
    },
}
