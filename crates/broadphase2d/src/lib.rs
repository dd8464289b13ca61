//! # Broadphase 2D
//!
//! Static broad-phase spatial indexes for ray queries against a collection
//! of 2D convex shapes.
//!
//! ## Features
//!
//! - **Center-Split Index**: binary partition of the shape set by
//!   bounding-disc centers, alternating split axis per level
//! - **Overlap Quad Index**: quaternary partition of space with
//!   conservative, overlap-based leaf membership
//! - **Implicit Trees**: both variants store their nodes in one flat array
//!   with index-computed parent/child links, no pointers
//! - **Stackless Queries**: ray traversal runs with a single integer cursor
//!   and O(1) auxiliary state
//!
//! Build an index once from a shape collection, then issue any number of
//! ray queries. A query returns candidate shape handles only; exact
//! ray-vs-shape intersection stays with the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use broadphase2d::prelude::*;
//!
//! # fn main() -> Result<(), BuildError> {
//! // Two square shapes inside a 10 x 10 region
//! let shapes = vec![
//!     ConvexPolygon::rect(Point2::new(1.0, 1.0), Point2::new(2.0, 2.0)),
//!     ConvexPolygon::rect(Point2::new(8.0, 8.0), Point2::new(9.0, 9.0)),
//! ];
//! let region = Aabb::new(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0));
//!
//! let index = OverlapQuadIndex::build(&shapes, 3, region)?;
//!
//! // A ray along the main diagonal passes through both shapes' cells
//! let ray = Ray::between(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0));
//! let candidates = index.query(&ray);
//!
//! assert!(candidates.contains(&ShapeId::new(0)));
//! assert!(candidates.contains(&ShapeId::new(1)));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod geom;
pub mod shape;
pub mod spatial;

/// Common imports for index users
pub mod prelude {
    pub use crate::{
        foundation::math::{Point2, Vec2},
        geom::{Aabb, Ray},
        shape::{BoundedShape, ConvexPolygon, ShapeId},
        spatial::{BuildError, CenterSplitIndex, OverlapQuadIndex},
    };
}
