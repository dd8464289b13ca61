//! Ray primitive for spatial queries

use crate::foundation::math::{Point2, Vec2};

/// A ray used for spatial queries
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Point2,
    /// The direction of the ray (normalized by the constructors)
    pub direction: Vec2,
    /// Maximum distance along the ray to consider
    pub max_distance: f32,
}

impl Ray {
    /// Creates an unbounded ray with the given origin and direction
    pub fn new(origin: Point2, direction: Vec2) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            max_distance: f32::INFINITY,
        }
    }

    /// Creates a ray limited to a maximum distance from its origin
    pub fn with_max_distance(origin: Point2, direction: Vec2, max_distance: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            max_distance,
        }
    }

    /// Creates a ray from one point to another, ending at the second point
    ///
    /// The two points must be distinct.
    pub fn between(from: Point2, to: Point2) -> Self {
        let delta = to - from;
        Self::with_max_distance(from, delta, delta.norm())
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Point2 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_normalizes_direction() {
        let ray = Ray::new(Point2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert_relative_eq!(ray.direction.norm(), 1.0);
        assert_relative_eq!(ray.direction.x, 0.6);
        assert_relative_eq!(ray.direction.y, 0.8);
        assert_eq!(ray.max_distance, f32::INFINITY);
    }

    #[test]
    fn test_between_spans_the_segment() {
        let ray = Ray::between(Point2::new(1.0, 1.0), Point2::new(4.0, 5.0));
        assert_relative_eq!(ray.max_distance, 5.0);
        let end = ray.point_at(ray.max_distance);
        assert_relative_eq!(end.x, 4.0, epsilon = 1e-5);
        assert_relative_eq!(end.y, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_point_at() {
        let ray = Ray::new(Point2::new(2.0, 0.0), Vec2::new(0.0, 1.0));
        let p = ray.point_at(3.0);
        assert_relative_eq!(p.x, 2.0);
        assert_relative_eq!(p.y, 3.0);
    }
}
