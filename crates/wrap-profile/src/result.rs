//! Wrap output and diagnostics.

use wrap_types::PointCloud;

use crate::band::BandPolicy;

/// Result of a wrap fitting operation.
///
/// Contains the deformed brace cloud, positionally aligned 1:1 with the
/// input, plus diagnostics describing how far the fit moved the mesh.
#[derive(Debug, Clone)]
pub struct WrapOutput {
    /// The deformed brace vertices, one per input vertex, in input order.
    /// Height coordinates are bit-identical to the input.
    pub cloud: PointCloud,

    /// Which torso filtering policy fired during band selection.
    pub band_policy: BandPolicy,

    /// Number of torso points retained for profiling.
    pub torso_points_used: usize,

    /// Largest applied horizontal displacement of any vertex.
    pub max_displacement: f32,

    /// Mean applied horizontal displacement across all vertices.
    pub average_displacement: f32,

    /// Number of vertices whose displacement hit a per-axis cap.
    pub clamped_vertices: usize,
}

impl WrapOutput {
    /// Returns a one-line summary of the fit.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "wrap: {} vertices, band {:?} ({} torso points), \
             max displacement {:.5}, avg {:.5}, {} capped",
            self.cloud.len(),
            self.band_policy,
            self.torso_points_used,
            self.max_displacement,
            self.average_displacement,
            self.clamped_vertices,
        )
    }
}

impl std::fmt::Display for WrapOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}
