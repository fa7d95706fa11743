//! Deterministic slice-profile wrap fitting.
//!
//! Deforms the vertices of a rigid brace mesh so its horizontal
//! cross-sections approximate the corresponding cross-sections of a torso
//! point cloud, leaving a configurable clearance gap, without iterative
//! mesh optimization. Used to auto-fit an orthotic model to a body scan
//! for visualization.
//!
//! # Pipeline
//!
//! 1. **Band selection** - torso points are restricted to the brace
//!    height range, and outstretched arms are excluded via a
//!    spine-centered core filter ([`select_torso_band`]).
//! 2. **Robust slice profiling** - both clouds are bucketed into 60
//!    horizontal slices with percentile-based bounds per slice
//!    ([`profile_slices`]).
//! 3. **Fill and smooth** - empty slices are interpolated from neighbors
//!    and the bound curves smoothed ([`fill_and_smooth`]).
//! 4. **Interpolate, clamp, blend** - every brace vertex samples the
//!    slice curves continuously at its height and moves toward the torso
//!    section with clamped scale and capped, partially-blended
//!    displacement.
//!
//! Data flows strictly forward; the whole pipeline is a pure function of
//! its arguments with no shared state, so concurrent invocations are
//! fully independent.
//!
//! # Guarantees
//!
//! - Output length and order equal the brace input; height coordinates
//!   are bit-identical to the input.
//! - Repeated calls with identical inputs produce bit-identical output.
//! - The only error is an empty input cloud; all degenerate geometry is
//!   floored or clamped instead.
//!
//! # Example
//!
//! ```
//! use wrap_profile::{wrap, WrapParams};
//! use wrap_types::{Point3, PointCloud};
//!
//! let torso = PointCloud::from_positions(&[
//!     Point3::new(-0.3, 0.0, 0.0),
//!     Point3::new(0.3, 0.5, 0.0),
//!     Point3::new(0.0, 1.0, 0.3),
//! ]);
//! let brace = PointCloud::from_positions(&[
//!     Point3::new(-0.25, 0.1, 0.0),
//!     Point3::new(0.25, 0.9, 0.0),
//! ]);
//!
//! let params = WrapParams::new().with_clearance(0.005);
//! let output = wrap(&torso, &brace, &params).unwrap();
//!
//! assert_eq!(output.cloud.len(), brace.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod band;
mod deform;
mod error;
mod params;
mod profile;
mod result;
mod smooth;

pub use band::{select_torso_band, BandPolicy, BandSelection};
pub use error::{WrapError, WrapResult};
pub use params::{WrapParams, MAX_CLEARANCE, SLICE_COUNT};
pub use profile::{profile_slices, SliceProfile};
pub use result::WrapOutput;
pub use smooth::{fill_and_smooth, SmoothedBounds};

use wrap_types::PointCloud;

/// Fits the brace cloud to the torso cloud.
///
/// Runs the full slice-profile pipeline and returns the deformed brace
/// vertices plus diagnostics. See the crate docs for the pipeline stages.
///
/// # Errors
///
/// Returns [`WrapError::EmptyTorso`] or [`WrapError::EmptyBrace`] if the
/// corresponding cloud has no points; no spatial extent can be derived
/// from an empty set. No other input is rejected.
pub fn wrap(
    torso: &PointCloud,
    brace: &PointCloud,
    params: &WrapParams,
) -> WrapResult<WrapOutput> {
    if torso.is_empty() {
        return Err(WrapError::EmptyTorso);
    }
    if brace.is_empty() {
        return Err(WrapError::EmptyBrace);
    }

    let selection = select_torso_band(torso, brace);
    let torso_used = &selection.cloud;

    let torso_bounds = torso_used.bounds();
    let brace_bounds = brace.bounds();

    // Both clouds are profiled against the shared union height range so
    // slice indices line up.
    let min_y = torso_bounds.min.y.min(brace_bounds.min.y);
    let max_y = torso_bounds.max.y.max(brace_bounds.max.y);
    let span_y = (max_y - min_y).max(1e-6);

    let slices = params.slice_count;
    let (t_low, t_high) = params.torso_percentiles;
    let (b_low, b_high) = params.brace_percentiles;

    let torso_profile = profile_slices(torso_used, min_y, span_y, slices, t_low, t_high);
    let brace_profile = profile_slices(brace, min_y, span_y, slices, b_low, b_high);

    let torso_x = fill_and_smooth(
        &torso_profile.min_x,
        &torso_profile.max_x,
        &torso_profile.count,
        torso_bounds.min.x,
        torso_bounds.max.x,
        params.torso_smoothing_passes,
    );
    let torso_z = fill_and_smooth(
        &torso_profile.min_z,
        &torso_profile.max_z,
        &torso_profile.count,
        torso_bounds.min.z,
        torso_bounds.max.z,
        params.torso_smoothing_passes,
    );
    let brace_x = fill_and_smooth(
        &brace_profile.min_x,
        &brace_profile.max_x,
        &brace_profile.count,
        brace_bounds.min.x,
        brace_bounds.max.x,
        params.brace_smoothing_passes,
    );
    let brace_z = fill_and_smooth(
        &brace_profile.min_z,
        &brace_profile.max_z,
        &brace_profile.count,
        brace_bounds.min.z,
        brace_bounds.max.z,
        params.brace_smoothing_passes,
    );

    let deformed = deform::deform_vertices(
        brace, &torso_x, &torso_z, &brace_x, &brace_z, min_y, span_y, params,
    );

    Ok(WrapOutput {
        cloud: deformed.cloud,
        band_policy: selection.policy,
        torso_points_used: torso_used.len(),
        max_displacement: deformed.max_displacement,
        average_displacement: deformed.average_displacement,
        clamped_vertices: deformed.clamped_vertices,
    })
}
