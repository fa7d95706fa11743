//! Error types for the fitting boundary layer.

use thiserror::Error;
use wrap_profile::WrapError;

/// Result type for boundary fitting operations.
pub type FitResult<T> = Result<T, FitError>;

/// Errors surfaced by the fitting boundary layer.
///
/// Client-input validation (malformed buffers, bad face lists, unknown
/// backend names) is rejected here before the core pipeline executes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FitError {
    /// A vertex byte buffer is empty or not a multiple of 12 bytes
    /// (three little-endian f32 values per vertex).
    #[error("{name} must be raw float32 [x, y, z, ...] bytes, got {len} bytes")]
    InvalidVertexBuffer {
        /// Which buffer was malformed (e.g. "torso", "brace").
        name: &'static str,
        /// The offending buffer length.
        len: usize,
    },

    /// A flat triangle index list's length is not a multiple of 3.
    #[error("face list must be flat [i, j, k, ...] triangles, got {len} indices")]
    InvalidFaceList {
        /// The offending index count.
        len: usize,
    },

    /// The requested backend name is not recognized.
    #[error("backend must be one of: auto, profile, iterative (got '{name}')")]
    UnknownBackend {
        /// The unrecognized name.
        name: String,
    },

    /// The iterative backend was explicitly requested but no solver is
    /// registered.
    #[error("iterative backend requested, but no solver is available")]
    IterativeUnavailable,

    /// The iterative solver failed and fallback was not permitted because
    /// the backend was explicitly requested.
    #[error("iterative solver failed: {message}")]
    Iterative {
        /// Description of the solver failure.
        message: String,
    },

    /// The core wrap pipeline rejected the input.
    #[error(transparent)]
    Wrap(#[from] WrapError),
}
