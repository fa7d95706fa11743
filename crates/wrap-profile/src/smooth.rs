//! Gap filling and smoothing of per-slice bounds.
//!
//! Raw slice profiles have holes (slices no point landed in) and
//! stair-step discontinuities between neighboring slices. This module
//! fills the holes by interpolating between valid slices and smooths the
//! result with a small fixed kernel, producing bound sequences that are
//! finite everywhere and safe to divide by.

/// Minimum allowed span between smoothed bounds.
const MIN_SPAN: f32 = 1e-4;

/// The 5-tap smoothing kernel, normalized to sum 1.
const KERNEL: [f32; 5] = [1.0 / 9.0, 2.0 / 9.0, 3.0 / 9.0, 2.0 / 9.0, 1.0 / 9.0];

/// A filled and smoothed bound pair.
///
/// Both arrays are finite everywhere and satisfy
/// `hi[i] - lo[i] >= 1e-4` for every slice.
#[derive(Debug, Clone)]
pub struct SmoothedBounds {
    /// Lower bound per slice.
    pub lo: Vec<f32>,
    /// Upper bound per slice.
    pub hi: Vec<f32>,
}

/// Fills empty slices and smooths a bound pair.
///
/// 1. With no valid slice at all, both arrays are filled uniformly with
///    the whole-object fallback values.
/// 2. Otherwise every slice index is linearly interpolated from the valid
///    slices, with flat extrapolation beyond the first and last valid
///    index.
/// 3. `passes` rounds of the `[1,2,3,2,1]/9` kernel are applied in
///    same-length mode. Positions beyond the array ends contribute zero,
///    which attenuates the outermost one or two slices; this matches the
///    reference smoothing exactly and is relied on by regression data.
/// 4. Any slice whose span fell below `1e-4` is widened symmetrically
///    around its midpoint.
///
/// # Arguments
///
/// * `lo`, `hi` - Raw per-slice bounds (±∞ sentinels where empty)
/// * `count` - Per-slice point counts; `count[i] > 0` marks a valid slice
/// * `fallback_lo`, `fallback_hi` - Whole-object bounds used when no slice
///   is valid
/// * `passes` - Number of smoothing rounds
#[must_use]
pub fn fill_and_smooth(
    lo: &[f32],
    hi: &[f32],
    count: &[u32],
    fallback_lo: f32,
    fallback_hi: f32,
    passes: usize,
) -> SmoothedBounds {
    let n = lo.len();
    let valid: Vec<usize> = (0..n).filter(|&i| count[i] > 0).collect();

    let (mut lo_f, mut hi_f) = if valid.is_empty() {
        (vec![fallback_lo; n], vec![fallback_hi; n])
    } else {
        (
            interp_at_indices(&valid, lo),
            interp_at_indices(&valid, hi),
        )
    };

    for _ in 0..passes {
        lo_f = convolve_same(&lo_f);
        hi_f = convolve_same(&hi_f);
    }

    // Keep a non-zero span so downstream division is safe.
    for i in 0..n {
        if hi_f[i] - lo_f[i] < MIN_SPAN {
            let mid = (hi_f[i] + lo_f[i]) * 0.5;
            lo_f[i] = mid - MIN_SPAN * 0.5;
            hi_f[i] = mid + MIN_SPAN * 0.5;
        }
    }

    SmoothedBounds { lo: lo_f, hi: hi_f }
}

/// Linearly interpolates `values` at every slice index, using the valid
/// slice indices as interpolation nodes. Indices outside the node range
/// hold the nearest valid value.
///
/// `nodes` must be non-empty and strictly increasing.
fn interp_at_indices(nodes: &[usize], values: &[f32]) -> Vec<f32> {
    let n = values.len();
    let mut out = vec![0.0f32; n];
    let mut seg = 0usize;

    for i in 0..n {
        if i <= nodes[0] {
            out[i] = values[nodes[0]];
            continue;
        }
        if i >= nodes[nodes.len() - 1] {
            out[i] = values[nodes[nodes.len() - 1]];
            continue;
        }

        // Advance to the segment [nodes[seg], nodes[seg + 1]] containing i.
        while nodes[seg + 1] < i {
            seg += 1;
        }
        let (a, b) = (nodes[seg], nodes[seg + 1]);
        if a == i {
            out[i] = values[a];
        } else {
            #[allow(clippy::cast_precision_loss)]
            let t = (i - a) as f32 / (b - a) as f32;
            out[i] = values[a] + (values[b] - values[a]) * t;
        }
    }

    out
}

/// Applies the fixed 5-tap kernel in same-length mode with zero padding
/// beyond the array ends.
#[allow(clippy::cast_possible_wrap)]
fn convolve_same(values: &[f32]) -> Vec<f32> {
    let n = values.len();
    let mut out = vec![0.0f32; n];

    #[allow(clippy::needless_range_loop)]
    for i in 0..n {
        let mut acc = 0.0f32;
        for (tap, &weight) in KERNEL.iter().enumerate() {
            // Kernel tap offsets are -2..=2 relative to i.
            let j = i as isize + tap as isize - 2;
            #[allow(clippy::cast_sign_loss)]
            if j >= 0 && (j as usize) < n {
                acc += values[j as usize] * weight;
            }
        }
        out[i] = acc;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn all_empty_uses_fallback() {
        let lo = vec![f32::INFINITY; 6];
        let hi = vec![f32::NEG_INFINITY; 6];
        let count = vec![0u32; 6];

        let out = fill_and_smooth(&lo, &hi, &count, -0.4, 0.4, 0);

        for i in 0..6 {
            assert_relative_eq!(out.lo[i], -0.4);
            assert_relative_eq!(out.hi[i], 0.4);
        }
    }

    #[test]
    fn holes_interpolate_between_valid_slices() {
        // Valid at indices 0 and 4, hole in between.
        let mut lo = vec![f32::INFINITY; 5];
        let mut hi = vec![f32::NEG_INFINITY; 5];
        let mut count = vec![0u32; 5];
        lo[0] = 0.0;
        hi[0] = 1.0;
        lo[4] = 4.0;
        hi[4] = 5.0;
        count[0] = 3;
        count[4] = 3;

        let out = fill_and_smooth(&lo, &hi, &count, 0.0, 5.0, 0);

        assert_relative_eq!(out.lo[1], 1.0);
        assert_relative_eq!(out.lo[2], 2.0);
        assert_relative_eq!(out.lo[3], 3.0);
        assert_relative_eq!(out.hi[2], 3.0);
    }

    #[test]
    fn flat_extrapolation_outside_node_range() {
        let mut lo = vec![f32::INFINITY; 6];
        let mut hi = vec![f32::NEG_INFINITY; 6];
        let mut count = vec![0u32; 6];
        lo[2] = -1.0;
        hi[2] = 1.0;
        lo[3] = -2.0;
        hi[3] = 2.0;
        count[2] = 1;
        count[3] = 1;

        let out = fill_and_smooth(&lo, &hi, &count, 0.0, 0.0, 0);

        assert_relative_eq!(out.lo[0], -1.0);
        assert_relative_eq!(out.lo[1], -1.0);
        assert_relative_eq!(out.lo[4], -2.0);
        assert_relative_eq!(out.lo[5], -2.0);
    }

    #[test]
    fn kernel_preserves_constant_interior() {
        // A constant signal stays constant away from the zero-padded edges.
        let values = vec![2.0f32; 9];
        let out = convolve_same(&values);
        for i in 2..7 {
            assert_relative_eq!(out[i], 2.0, epsilon = 1e-6);
        }
        // Edge bins lose the taps that fall outside and shrink toward zero.
        assert_relative_eq!(out[0], 2.0 * 6.0 / 9.0, epsilon = 1e-6);
        assert_relative_eq!(out[1], 2.0 * 8.0 / 9.0, epsilon = 1e-6);
    }

    #[test]
    fn minimum_span_is_enforced() {
        let lo = vec![1.0f32; 4];
        let hi = vec![1.0f32; 4];
        let count = vec![1u32; 4];

        let out = fill_and_smooth(&lo, &hi, &count, 0.0, 0.0, 0);

        for i in 0..4 {
            assert!(out.hi[i] - out.lo[i] >= MIN_SPAN - 1e-7);
            assert_relative_eq!((out.hi[i] + out.lo[i]) * 0.5, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn output_is_finite_after_smoothing() {
        let mut lo = vec![f32::INFINITY; 60];
        let mut hi = vec![f32::NEG_INFINITY; 60];
        let mut count = vec![0u32; 60];
        for i in 0..30 {
            lo[i] = -0.3;
            hi[i] = 0.3;
            count[i] = 10;
        }

        let out = fill_and_smooth(&lo, &hi, &count, -0.3, 0.3, 2);

        for i in 0..60 {
            assert!(out.lo[i].is_finite());
            assert!(out.hi[i].is_finite());
            assert!(out.hi[i] >= out.lo[i]);
        }
    }
}
