//! Axis-aligned bounding boxes

use crate::foundation::math::{Point2, Vec2};
use crate::geom::Ray;

/// Axis-Aligned Bounding Box for spatial queries
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    /// Minimum corner of the bounding box
    pub min: Point2,
    /// Maximum corner of the bounding box
    pub max: Point2,
}

impl Aabb {
    /// Create a new AABB from min and max points
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Point2, extents: Vec2) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// The degenerate empty box (min > max on both axes)
    ///
    /// Serves as the sentinel for cells that hold no shapes: it overlaps
    /// nothing and no ray intersects it. It is also the identity for
    /// [`Aabb::enclose`].
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f32::MAX, f32::MAX),
            max: Point2::new(f32::MIN, f32::MIN),
        }
    }

    /// Whether this box is the degenerate empty box
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Point2 {
        self.min + (self.max - self.min) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Point2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if this AABB overlaps another AABB
    ///
    /// An empty box overlaps nothing, including another empty box.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Grow this box to contain a point
    pub fn enclose(&mut self, point: Point2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Tight box around a set of points; the empty box for no points
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point2>,
    {
        let mut bounds = Self::empty();
        for point in points {
            bounds.enclose(*point);
        }
        bounds
    }

    /// Test ray intersection with this AABB using the slab method
    ///
    /// Boolean only; the indexes never need the hit point. The ray hits the
    /// box if the slab intervals overlap somewhere in front of the origin
    /// and within the ray's maximum distance. An empty box never intersects.
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        if self.is_empty() {
            return false;
        }

        let inv_dx = if ray.direction.x != 0.0 {
            1.0 / ray.direction.x
        } else {
            f32::INFINITY
        };
        let inv_dy = if ray.direction.y != 0.0 {
            1.0 / ray.direction.y
        } else {
            f32::INFINITY
        };

        let t1 = (self.min.x - ray.origin.x) * inv_dx;
        let t2 = (self.max.x - ray.origin.x) * inv_dx;
        let t3 = (self.min.y - ray.origin.y) * inv_dy;
        let t4 = (self.max.y - ray.origin.y) * inv_dy;

        let tmin = t1.min(t2).max(t3.min(t4));
        let tmax = t1.max(t2).min(t3.max(t4));

        tmax >= tmin && tmax >= 0.0 && tmin <= ray.max_distance
    }
}
