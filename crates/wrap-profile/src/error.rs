//! Error types for wrap fitting operations.

use thiserror::Error;

/// Result type for wrap fitting operations.
pub type WrapResult<T> = Result<T, WrapError>;

/// Errors that can occur during wrap fitting.
///
/// The pipeline never fails on out-of-range geometry: degenerate spans are
/// floored, empty slices are filled from neighbors, and scale/displacement
/// are clamped. The only rejectable condition is an empty input point set,
/// since no spatial extent can be derived from it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WrapError {
    /// The torso point cloud has no points.
    #[error("torso point cloud has no points")]
    EmptyTorso,

    /// The brace point cloud has no points.
    #[error("brace point cloud has no points")]
    EmptyBrace,
}
