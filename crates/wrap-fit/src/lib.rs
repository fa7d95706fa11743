//! Boundary layer for brace wrap fitting.
//!
//! Sits between transport and the deterministic pipeline in
//! [`wrap_profile`]: decodes raw client vertex buffers, reconstructs
//! triangle connectivity, selects a fitting backend, and packages the
//! result with the metadata clients consume.
//!
//! # Backends
//!
//! The profile pipeline is always available. An iterative mesh-fitting
//! solver can be plugged in through the [`IterativeSolver`] trait; under
//! [`Backend::Auto`] any solver failure falls back to the profile
//! pipeline, so a request that passes input validation always produces a
//! result.
//!
//! # Example
//!
//! ```
//! use wrap_fit::{
//!     decode_vertices, encode_vertices, fit_with_strategy, reconstruct_faces, FitRequest,
//! };
//! use wrap_types::IndexedMesh;
//!
//! let mut torso_bytes = Vec::new();
//! let mut brace_bytes = Vec::new();
//! for i in 0..30u8 {
//!     let t = f32::from(i) / 29.0;
//!     for (buf, r) in [(&mut torso_bytes, 0.3f32), (&mut brace_bytes, 0.25)] {
//!         for v in [r * (t * 40.0).cos(), t, r * (t * 40.0).sin()] {
//!             buf.extend_from_slice(&v.to_le_bytes());
//!         }
//!     }
//! }
//!
//! let torso = decode_vertices(&torso_bytes, "torso")?;
//! let brace = decode_vertices(&brace_bytes, "brace")?;
//! let faces = reconstruct_faces(None, brace.len())?;
//! let brace = IndexedMesh::from_parts(brace.points, faces);
//!
//! let outcome = fit_with_strategy(&FitRequest::new(torso, brace), None)?;
//! let payload = encode_vertices(&outcome.cloud);
//! assert_eq!(payload.len(), outcome.vertex_count * 12);
//! # Ok::<(), wrap_fit::FitError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod decode;
mod error;
mod faces;
mod strategy;

pub use decode::{decode_vertices, encode_vertices};
pub use error::{FitError, FitResult};
pub use faces::reconstruct_faces;
pub use strategy::{
    fit_with_strategy, Backend, BackendUsed, FitBudget, FitOutcome, FitRequest, IterativeSolver,
    SolverFailure,
};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::cast_precision_loss)]
mod integration_tests {
    use super::*;
    use wrap_types::{IndexedMesh, Point3, PointCloud};

    fn spiral_bytes(radius: f32, count: usize) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(count * 12);
        for i in 0..count {
            let theta = i as f32 * 2.399_963;
            let y = i as f32 / (count - 1) as f32;
            for v in [radius * theta.cos(), y, radius * theta.sin()] {
                bytes.extend_from_slice(&v.to_le_bytes());
            }
        }
        bytes
    }

    #[test]
    fn decode_fit_encode_round_trip() {
        let torso = decode_vertices(&spiral_bytes(0.3, 600), "torso").unwrap();
        let brace = decode_vertices(&spiral_bytes(0.25, 240), "brace").unwrap();
        let faces = reconstruct_faces(None, brace.len()).unwrap();
        let brace = IndexedMesh::from_parts(brace.points, faces);

        let request = FitRequest::new(torso, brace).with_clearance(0.005);
        let outcome = fit_with_strategy(&request, None).unwrap();

        assert_eq!(outcome.backend_used, BackendUsed::Profile);
        assert_eq!(outcome.vertex_count, 240);

        let payload = encode_vertices(&outcome.cloud);
        assert_eq!(payload.len(), 240 * 12);
        let decoded = decode_vertices(&payload, "result").unwrap();
        for (a, b) in outcome.cloud.iter().zip(decoded.iter()) {
            assert_eq!(a.y.to_bits(), b.y.to_bits());
        }
    }

    #[test]
    fn malformed_torso_never_reaches_the_core() {
        let result = decode_vertices(&[1, 2, 3], "torso");
        assert!(matches!(
            result,
            Err(FitError::InvalidVertexBuffer { name: "torso", .. })
        ));
    }

    #[test]
    fn solver_output_flows_through_unchanged() {
        struct Identity;

        impl IterativeSolver for Identity {
            fn fit(
                &self,
                _torso: &PointCloud,
                brace: &IndexedMesh,
                _iterations: u32,
            ) -> Result<PointCloud, SolverFailure> {
                Ok(PointCloud {
                    points: brace.positions.clone(),
                })
            }
        }

        let torso = PointCloud {
            points: vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.3, 1.0, 0.3)],
        };
        let brace = IndexedMesh::from_parts(
            vec![Point3::new(0.1, 0.2, 0.3), Point3::new(-0.1, 0.8, -0.3)],
            Vec::new(),
        );

        let outcome = fit_with_strategy(&FitRequest::new(torso, brace), Some(&Identity)).unwrap();
        assert_eq!(outcome.backend_used, BackendUsed::Iterative);
        assert_eq!(outcome.cloud.points[0], Point3::new(0.1, 0.2, 0.3));
    }
}
