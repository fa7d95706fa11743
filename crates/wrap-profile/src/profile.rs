//! Robust per-slice bound estimation.
//!
//! Buckets a point set into a fixed number of horizontal slices along the
//! height axis and computes percentile-based bounding extents in the two
//! horizontal axes. Percentile bounds ignore scan outliers that would
//! inflate a plain min/max.

use wrap_types::PointCloud;

/// Percentile-based horizontal bounds per height slice.
///
/// All five arrays have length `slice_count`. Slices that received no
/// points keep the infinity sentinels; [`SliceProfile::count`] is the
/// authoritative emptiness test and the filler consumes it downstream.
#[derive(Debug, Clone)]
pub struct SliceProfile {
    /// Lower percentile of x per slice (`+inf` when empty).
    pub min_x: Vec<f32>,
    /// Upper percentile of x per slice (`-inf` when empty).
    pub max_x: Vec<f32>,
    /// Lower percentile of z per slice (`+inf` when empty).
    pub min_z: Vec<f32>,
    /// Upper percentile of z per slice (`-inf` when empty).
    pub max_z: Vec<f32>,
    /// Number of points that fell into each slice.
    pub count: Vec<u32>,
}

impl SliceProfile {
    /// Returns the number of slices.
    #[must_use]
    pub fn slice_count(&self) -> usize {
        self.count.len()
    }
}

/// Maps a height to its slice index.
///
/// Heights are normalized against the union height range and clamped, so
/// every point lands in a valid slice; the topmost slice absorbs `t == 1`.
#[inline]
fn slice_index(y: f32, min_y: f32, span_y: f32, slices: usize) -> usize {
    let t = ((y - min_y) / span_y).clamp(0.0, 1.0);
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let k = (t * slices as f32) as usize;
    k.min(slices - 1)
}

/// Profiles a point set into per-slice percentile bounds.
///
/// Bucketing is done in two passes: the first counts the per-slice
/// population, the second fills pre-sized arenas, so no per-slice growable
/// lists are needed. Each non-empty slice then yields the `q_low`-th and
/// `q_high`-th percentiles of its x and z values.
///
/// # Arguments
///
/// * `points` - The point set to profile
/// * `min_y` - Union height origin shared by torso and brace
/// * `span_y` - Union height span (must be positive; callers floor at 1e-6)
/// * `slices` - Number of height slices (≥ 1)
/// * `q_low`, `q_high` - Percentile pair in `[0, 100]`
///
/// Deterministic: identical inputs produce bit-identical profiles.
#[must_use]
pub fn profile_slices(
    points: &PointCloud,
    min_y: f32,
    span_y: f32,
    slices: usize,
    q_low: f32,
    q_high: f32,
) -> SliceProfile {
    let mut count = vec![0u32; slices];
    for p in points {
        count[slice_index(p.y, min_y, span_y, slices)] += 1;
    }

    // Prefix-sum offsets into one flat arena per horizontal axis.
    let mut offsets = vec![0usize; slices + 1];
    for k in 0..slices {
        offsets[k + 1] = offsets[k] + count[k] as usize;
    }

    let n = points.len();
    let mut xs = vec![0.0f32; n];
    let mut zs = vec![0.0f32; n];
    let mut cursor = offsets.clone();
    for p in points {
        let k = slice_index(p.y, min_y, span_y, slices);
        xs[cursor[k]] = p.x;
        zs[cursor[k]] = p.z;
        cursor[k] += 1;
    }

    let mut min_x = vec![f32::INFINITY; slices];
    let mut max_x = vec![f32::NEG_INFINITY; slices];
    let mut min_z = vec![f32::INFINITY; slices];
    let mut max_z = vec![f32::NEG_INFINITY; slices];

    for k in 0..slices {
        if count[k] == 0 {
            continue;
        }
        let bucket_x = &mut xs[offsets[k]..offsets[k + 1]];
        let bucket_z = &mut zs[offsets[k]..offsets[k + 1]];
        bucket_x.sort_by(f32::total_cmp);
        bucket_z.sort_by(f32::total_cmp);
        min_x[k] = percentile(bucket_x, q_low);
        max_x[k] = percentile(bucket_x, q_high);
        min_z[k] = percentile(bucket_z, q_low);
        max_z[k] = percentile(bucket_z, q_high);
    }

    SliceProfile {
        min_x,
        max_x,
        min_z,
        max_z,
        count,
    }
}

/// Percentile of sorted values by linear interpolation between the two
/// nearest order statistics: `rank = q / 100 * (n - 1)`.
///
/// This is the standard definition; alternate definitions diverge at small
/// sample counts, so it is fixed here for cross-slice consistency.
///
/// The input must be sorted and non-empty.
fn percentile(sorted: &[f32], q: f32) -> f32 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    #[allow(clippy::cast_precision_loss)]
    let rank = f64::from(q.clamp(0.0, 100.0)) / 100.0 * (n - 1) as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lo = rank.floor() as usize;
    if lo + 1 >= n {
        return sorted[n - 1];
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let frac = (rank - rank.floor()) as f32;
    sorted[lo] + (sorted[lo + 1] - sorted[lo]) * frac
}
