//! Raw vertex buffer decoding and encoding.
//!
//! Scanner and viewer clients exchange vertices as raw little-endian
//! float32 `[x, y, z, ...]` buffers. Validation happens here, before the
//! core pipeline ever sees the data.

use wrap_types::{Point3, PointCloud};

use crate::error::{FitError, FitResult};

/// Bytes per vertex: three little-endian f32 values.
const VERTEX_STRIDE: usize = 12;

/// Decodes a raw float32 vertex buffer into a point cloud.
///
/// # Arguments
///
/// * `bytes` - The raw buffer
/// * `name` - Buffer label used in error messages (e.g. "torso")
///
/// # Errors
///
/// Returns [`FitError::InvalidVertexBuffer`] if the buffer is empty or
/// its length is not a multiple of 12.
///
/// # Example
///
/// ```
/// use wrap_fit::decode_vertices;
///
/// let mut bytes = Vec::new();
/// for v in [1.0f32, 2.0, 3.0] {
///     bytes.extend_from_slice(&v.to_le_bytes());
/// }
///
/// let cloud = decode_vertices(&bytes, "brace").unwrap();
/// assert_eq!(cloud.len(), 1);
/// assert_eq!(cloud.points[0].y, 2.0);
/// ```
pub fn decode_vertices(bytes: &[u8], name: &'static str) -> FitResult<PointCloud> {
    if bytes.is_empty() || bytes.len() % VERTEX_STRIDE != 0 {
        return Err(FitError::InvalidVertexBuffer {
            name,
            len: bytes.len(),
        });
    }

    let mut cloud = PointCloud::with_capacity(bytes.len() / VERTEX_STRIDE);
    for chunk in bytes.chunks_exact(VERTEX_STRIDE) {
        let x = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let y = f32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]);
        let z = f32::from_le_bytes([chunk[8], chunk[9], chunk[10], chunk[11]]);
        cloud.push(Point3::new(x, y, z));
    }

    Ok(cloud)
}

/// Encodes a point cloud back into a raw little-endian float32 buffer.
///
/// The inverse of [`decode_vertices`]; output order matches cloud order.
#[must_use]
pub fn encode_vertices(cloud: &PointCloud) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(cloud.len() * VERTEX_STRIDE);
    for p in cloud {
        bytes.extend_from_slice(&p.x.to_le_bytes());
        bytes.extend_from_slice(&p.y.to_le_bytes());
        bytes.extend_from_slice(&p.z.to_le_bytes());
    }
    bytes
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_buffer() {
        let result = decode_vertices(&[], "torso");
        assert!(matches!(
            result,
            Err(FitError::InvalidVertexBuffer { name: "torso", len: 0 })
        ));
    }

    #[test]
    fn rejects_partial_vertex() {
        let bytes = vec![0u8; 13];
        let result = decode_vertices(&bytes, "brace");
        assert!(matches!(
            result,
            Err(FitError::InvalidVertexBuffer { name: "brace", len: 13 })
        ));
    }

    #[test]
    fn decodes_little_endian_triples() {
        let mut bytes = Vec::new();
        for v in [1.5f32, -2.0, 0.25, 10.0, 20.0, 30.0] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }

        let cloud = decode_vertices(&bytes, "torso").unwrap();
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.points[0], Point3::new(1.5, -2.0, 0.25));
        assert_eq!(cloud.points[1], Point3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn encode_round_trips() {
        let cloud = PointCloud::from_positions(&[
            Point3::new(0.1, -0.2, 0.3),
            Point3::new(f32::MIN_POSITIVE, 1e30, -1e-30),
        ]);

        let bytes = encode_vertices(&cloud);
        assert_eq!(bytes.len(), 24);

        let decoded = decode_vertices(&bytes, "round").unwrap();
        for (a, b) in cloud.iter().zip(decoded.iter()) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
            assert_eq!(a.z.to_bits(), b.z.to_bits());
        }
    }
}
