//! Ordered point cloud.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Aabb;

/// An ordered sequence of 3D points.
///
/// Order matters for meshes whose connectivity lives elsewhere: the wrap
/// pipeline emits one output point per input point, positionally aligned.
/// For scan data the order carries no meaning.
///
/// # Example
///
/// ```
/// use wrap_types::{PointCloud, Point3};
///
/// let cloud = PointCloud::from_positions(&[
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ]);
///
/// assert_eq!(cloud.len(), 3);
/// let bounds = cloud.bounds();
/// assert_eq!(bounds.max.x, 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointCloud {
    /// The points, in input order.
    pub points: Vec<Point3<f32>>,
}

impl PointCloud {
    /// Creates an empty point cloud.
    ///
    /// # Example
    ///
    /// ```
    /// use wrap_types::PointCloud;
    ///
    /// let cloud = PointCloud::new();
    /// assert!(cloud.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Creates a point cloud with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Creates a point cloud from a slice of positions.
    ///
    /// # Example
    ///
    /// ```
    /// use wrap_types::{PointCloud, Point3};
    ///
    /// let cloud = PointCloud::from_positions(&[Point3::new(1.0, 2.0, 3.0)]);
    /// assert_eq!(cloud.len(), 1);
    /// ```
    #[must_use]
    pub fn from_positions(positions: &[Point3<f32>]) -> Self {
        Self {
            points: positions.to_vec(),
        }
    }

    /// Returns the number of points.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the cloud has no points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends a point.
    #[inline]
    pub fn push(&mut self, point: Point3<f32>) {
        self.points.push(point);
    }

    /// Iterates over the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point3<f32>> {
        self.points.iter()
    }

    /// Computes the axis-aligned bounding box of the cloud.
    ///
    /// Returns [`Aabb::empty`] for an empty cloud.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.points.iter())
    }
}

impl From<Vec<Point3<f32>>> for PointCloud {
    fn from(points: Vec<Point3<f32>>) -> Self {
        Self { points }
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Point3<f32>;
    type IntoIter = std::slice::Iter<'a, Point3<f32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cloud() {
        let cloud = PointCloud::new();
        assert!(cloud.is_empty());
        assert_eq!(cloud.len(), 0);
        assert!(cloud.bounds().is_empty());
    }

    #[test]
    fn from_positions_preserves_order() {
        let cloud = PointCloud::from_positions(&[
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ]);
        assert_eq!(cloud.points[0].x, 3.0);
        assert_eq!(cloud.points[1].x, 1.0);
        assert_eq!(cloud.points[2].x, 2.0);
    }

    #[test]
    fn bounds_cover_all_points() {
        let cloud = PointCloud::from_positions(&[
            Point3::new(-1.0, 2.0, 0.0),
            Point3::new(4.0, -3.0, 5.0),
        ]);
        let b = cloud.bounds();
        assert_eq!(b.min.x, -1.0);
        assert_eq!(b.min.y, -3.0);
        assert_eq!(b.max.x, 4.0);
        assert_eq!(b.max.z, 5.0);
    }

    #[test]
    fn iterates_in_order() {
        let cloud = PointCloud::from_positions(&[
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ]);
        let ys: Vec<f32> = cloud.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![1.0, 2.0]);
    }
}
