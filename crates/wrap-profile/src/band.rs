//! Torso band selection.
//!
//! Restricts the torso point set to the height range the brace actually
//! covers, then optionally narrows to a spine-centered core so outstretched
//! arms do not inflate the horizontal extents.

use wrap_types::PointCloud;

/// Minimum number of points required before band or core filtering applies.
const MIN_FILTERED_POINTS: usize = 200;

/// Half-width of the spine-centered core band, in model units.
const CORE_HALF_WIDTH: f32 = 0.22;

/// Which filtering policy produced the retained torso points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandPolicy {
    /// Too few points fell inside the brace height band; the full torso
    /// set is used unfiltered.
    Full,
    /// The height band was applied, but the core filter was skipped or
    /// discarded for removing too much geometry.
    Band,
    /// The height band plus the spine-centered core filter were applied.
    Core,
}

/// The torso points retained for profiling, plus the policy that fired.
#[derive(Debug, Clone)]
pub struct BandSelection {
    /// The retained torso points.
    pub cloud: PointCloud,
    /// The filtering policy that produced `cloud`.
    pub policy: BandPolicy,
}

/// Selects the torso points relevant to the brace height range.
///
/// 1. Points within the brace height extent plus a margin of
///    `max(0.02, 0.12 * brace height span)` form the band.
/// 2. With at least 200 band points, points within 0.22 of the median x
///    form the core; the core is discarded if it drops below 200 points.
/// 3. With fewer than 200 band points, the full torso set is used.
///
/// The result is non-empty whenever `torso` is non-empty.
#[must_use]
pub fn select_torso_band(torso: &PointCloud, brace: &PointCloud) -> BandSelection {
    let mut b_min_y = f32::INFINITY;
    let mut b_max_y = f32::NEG_INFINITY;
    for p in brace {
        b_min_y = b_min_y.min(p.y);
        b_max_y = b_max_y.max(p.y);
    }

    let span_y = (b_max_y - b_min_y).max(1e-6);
    let margin = (span_y * 0.12).max(0.02);
    let lo = b_min_y - margin;
    let hi = b_max_y + margin;

    let band: Vec<_> = torso
        .iter()
        .filter(|p| p.y >= lo && p.y <= hi)
        .copied()
        .collect();

    if band.len() < MIN_FILTERED_POINTS {
        return BandSelection {
            cloud: torso.clone(),
            policy: BandPolicy::Full,
        };
    }

    let center_x = median(band.iter().map(|p| p.x).collect());
    let core: Vec<_> = band
        .iter()
        .filter(|p| (p.x - center_x).abs() < CORE_HALF_WIDTH)
        .copied()
        .collect();

    if core.len() < MIN_FILTERED_POINTS {
        BandSelection {
            cloud: PointCloud { points: band },
            policy: BandPolicy::Band,
        }
    } else {
        BandSelection {
            cloud: PointCloud { points: core },
            policy: BandPolicy::Core,
        }
    }
}

/// Median of a non-empty set of values; the mean of the two middle order
/// statistics for even counts.
fn median(mut values: Vec<f32>) -> f32 {
    values.sort_by(f32::total_cmp);
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) * 0.5
    }
}
