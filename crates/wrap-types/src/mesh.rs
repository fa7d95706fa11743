//! Indexed triangle mesh.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::PointCloud;

/// An indexed triangle mesh.
///
/// Positions and faces are stored separately, with faces referencing
/// positions by index. The wrap pipeline itself only moves positions;
/// connectivity is carried through untouched for consumers that need it
/// (e.g. an iterative mesh-fitting solver).
///
/// # Example
///
/// ```
/// use wrap_types::{IndexedMesh, Point3};
///
/// let mesh = IndexedMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex positions, in input order.
    pub positions: Vec<Point3<f32>>,

    /// Triangle faces as indices into the position array.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Creates a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Creates a mesh from positions and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(positions: Vec<Point3<f32>>, faces: Vec<[u32; 3]>) -> Self {
        Self { positions, faces }
    }

    /// Returns the number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangle faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the vertex positions as a point cloud, preserving order.
    #[must_use]
    pub fn to_cloud(&self) -> PointCloud {
        PointCloud {
            points: self.positions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mesh() {
        let mesh = IndexedMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn from_parts() {
        let mesh = IndexedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn to_cloud_preserves_order() {
        let mesh = IndexedMesh::from_parts(
            vec![Point3::new(2.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            Vec::new(),
        );
        let cloud = mesh.to_cloud();
        assert_eq!(cloud.points[0].x, 2.0);
        assert_eq!(cloud.points[1].x, 1.0);
    }
}
