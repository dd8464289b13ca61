//! Math utilities and types
//!
//! Provides the fundamental 2D math types used by the spatial indexes.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;
