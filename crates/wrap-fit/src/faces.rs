//! Triangle face reconstruction.
//!
//! The iterative solver needs mesh connectivity, but clients may send no
//! face list at all, or one referencing vertices that do not exist. This
//! module validates what was supplied and falls back to grouping vertices
//! into consecutive triples.

use crate::error::{FitError, FitResult};

/// Builds a validated triangle list for a mesh of `vertex_count` vertices.
///
/// Supplied triangles with any index `>= vertex_count` are dropped. When
/// no list is supplied, or no valid triangle survives, vertices are
/// grouped into consecutive runs of three (`vertex_count / 3` triangles,
/// remainder vertices unused).
///
/// # Errors
///
/// Returns [`FitError::InvalidFaceList`] if a list is supplied whose
/// length is not a multiple of 3.
///
/// # Example
///
/// ```
/// use wrap_fit::reconstruct_faces;
///
/// // One valid triangle, one referencing a missing vertex.
/// let faces = reconstruct_faces(Some(&[0, 1, 2, 0, 1, 9]), 6).unwrap();
/// assert_eq!(faces, vec![[0, 1, 2]]);
///
/// // Nothing supplied: consecutive grouping.
/// let faces = reconstruct_faces(None, 6).unwrap();
/// assert_eq!(faces, vec![[0, 1, 2], [3, 4, 5]]);
/// ```
pub fn reconstruct_faces(flat: Option<&[u32]>, vertex_count: usize) -> FitResult<Vec<[u32; 3]>> {
    let Some(flat) = flat.filter(|f| !f.is_empty()) else {
        return Ok(consecutive_faces(vertex_count));
    };

    if flat.len() % 3 != 0 {
        return Err(FitError::InvalidFaceList { len: flat.len() });
    }

    let faces: Vec<[u32; 3]> = flat
        .chunks_exact(3)
        .filter(|tri| tri.iter().all(|&i| (i as usize) < vertex_count))
        .map(|tri| [tri[0], tri[1], tri[2]])
        .collect();

    if faces.is_empty() {
        Ok(consecutive_faces(vertex_count))
    } else {
        Ok(faces)
    }
}

/// Groups vertices into consecutive triples.
fn consecutive_faces(vertex_count: usize) -> Vec<[u32; 3]> {
    #[allow(clippy::cast_possible_truncation)]
    (0..vertex_count as u32 / 3)
        .map(|t| [t * 3, t * 3 + 1, t * 3 + 2])
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn none_falls_back_to_consecutive() {
        let faces = reconstruct_faces(None, 9).unwrap();
        assert_eq!(faces, vec![[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
    }

    #[test]
    fn remainder_vertices_are_unused() {
        let faces = reconstruct_faces(None, 8).unwrap();
        assert_eq!(faces.len(), 2);
    }

    #[test]
    fn empty_list_falls_back() {
        let faces = reconstruct_faces(Some(&[]), 6).unwrap();
        assert_eq!(faces.len(), 2);
    }

    #[test]
    fn non_multiple_of_three_is_rejected() {
        let result = reconstruct_faces(Some(&[0, 1, 2, 3]), 6);
        assert!(matches!(result, Err(FitError::InvalidFaceList { len: 4 })));
    }

    #[test]
    fn out_of_range_triangles_are_dropped() {
        let faces = reconstruct_faces(Some(&[0, 1, 2, 3, 4, 99]), 6).unwrap();
        assert_eq!(faces, vec![[0, 1, 2]]);
    }

    #[test]
    fn all_invalid_falls_back_to_consecutive() {
        let faces = reconstruct_faces(Some(&[7, 8, 9]), 6).unwrap();
        assert_eq!(faces, vec![[0, 1, 2], [3, 4, 5]]);
    }
}
