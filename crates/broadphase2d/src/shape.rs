//! Shape handles and the collection boundary
//!
//! The indexes never own shape geometry. They are built from a caller-owned
//! slice of anything implementing [`BoundedShape`] and hand back [`ShapeId`]
//! handles, which are stable indices into that slice.

use crate::foundation::math::Point2;
use crate::geom::Aabb;

/// Shape identifier
///
/// A stable index into the shape slice the index was built from. Valid for
/// as long as the caller keeps that slice unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShapeId(u32);

impl ShapeId {
    /// Create a handle for the shape at the given position in the collection
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the position of this shape in the collection
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What the indexes need to know about a shape
///
/// Implemented by whatever convex-shape representation the caller uses.
/// All queries are answered from these cheap bounding volumes; exact
/// ray-vs-shape intersection stays on the caller's side of this seam.
pub trait BoundedShape {
    /// World-space axis-aligned bounding box of the shape
    fn bounds(&self) -> Aabb;

    /// Center of the shape's bounding disc
    fn disc_center(&self) -> Point2;

    /// World-space vertices of the convex hull
    fn vertices(&self) -> &[Point2];
}

/// A convex polygon with cached bounding volumes
///
/// The reference implementation of [`BoundedShape`], suitable for callers
/// without their own shape representation.
#[derive(Debug, Clone)]
pub struct ConvexPolygon {
    vertices: Vec<Point2>,
    bounds: Aabb,
    disc_center: Point2,
    disc_radius: f32,
}

impl ConvexPolygon {
    /// Build a polygon from its vertices, caching bounds and bounding disc
    ///
    /// Vertices are expected in counter-clockwise order and are not
    /// validated for convexity. An empty vertex list yields a degenerate
    /// polygon with empty bounds that no query will ever return.
    pub fn from_vertices(vertices: Vec<Point2>) -> Self {
        let bounds = Aabb::from_points(&vertices);
        let disc_center = if vertices.is_empty() {
            Point2::origin()
        } else {
            let sum = vertices
                .iter()
                .fold(Point2::origin(), |acc, v| acc + v.coords);
            sum / vertices.len() as f32
        };
        let disc_radius = vertices
            .iter()
            .map(|v| (v - disc_center).norm())
            .fold(0.0, f32::max);
        Self {
            vertices,
            bounds,
            disc_center,
            disc_radius,
        }
    }

    /// Axis-aligned rectangle spanning the two corners
    pub fn rect(min: Point2, max: Point2) -> Self {
        Self::from_vertices(vec![
            min,
            Point2::new(max.x, min.y),
            max,
            Point2::new(min.x, max.y),
        ])
    }

    /// Radius of the bounding disc around [`BoundedShape::disc_center`]
    pub fn disc_radius(&self) -> f32 {
        self.disc_radius
    }
}

impl BoundedShape for ConvexPolygon {
    fn bounds(&self) -> Aabb {
        self.bounds
    }

    fn disc_center(&self) -> Point2 {
        self.disc_center
    }

    fn vertices(&self) -> &[Point2] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rect_bounds_and_center() {
        let rect = ConvexPolygon::rect(Point2::new(2.0, 4.0), Point2::new(6.0, 8.0));
        assert_eq!(rect.vertices().len(), 4);
        assert_relative_eq!(rect.bounds().min.x, 2.0);
        assert_relative_eq!(rect.bounds().max.y, 8.0);
        assert_relative_eq!(rect.disc_center().x, 4.0);
        assert_relative_eq!(rect.disc_center().y, 6.0);
        // Disc reaches the corners
        assert_relative_eq!(rect.disc_radius(), 8.0_f32.sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn test_triangle_disc_encloses_vertices() {
        let tri = ConvexPolygon::from_vertices(vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 3.0),
        ]);
        for v in tri.vertices() {
            assert!((v - tri.disc_center()).norm() <= tri.disc_radius() + 1e-5);
        }
    }

    #[test]
    fn test_degenerate_polygon() {
        let empty = ConvexPolygon::from_vertices(Vec::new());
        assert!(empty.bounds().is_empty());
        assert_relative_eq!(empty.disc_radius(), 0.0);
    }

    #[test]
    fn test_shape_id_round_trip() {
        let id = ShapeId::new(42);
        assert_eq!(id.index(), 42);
        assert_eq!(id, ShapeId::new(42));
    }
}
