//! Geometric primitives shared by the spatial indexes
//!
//! - [`Aabb`]: 2D axis-aligned bounding box with a degenerate empty sentinel
//! - [`Ray`]: 2D ray with a maximum query distance

mod aabb;
mod ray;

pub use aabb::Aabb;
pub use ray::Ray;
