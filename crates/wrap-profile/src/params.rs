//! Wrap fitting parameters and configuration.

/// Number of horizontal slices used to profile both clouds.
pub const SLICE_COUNT: usize = 60;

/// Maximum accepted clearance gap between brace and torso.
pub const MAX_CLEARANCE: f32 = 0.03;

/// Parameters for slice-profile wrap fitting.
///
/// The defaults encode the tuning used for interactive brace fitting and
/// rarely need to change. Use the builder methods for experimentation.
///
/// # Example
///
/// ```
/// use wrap_profile::WrapParams;
///
/// let params = WrapParams::new().with_clearance(0.005);
/// assert!((params.clearance - 0.005).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct WrapParams {
    /// Desired gap between the fitted brace surface and the torso.
    /// Clamped to `[0.0, 0.03]`.
    pub clearance: f32,

    /// Number of horizontal slices. Default: 60.
    pub slice_count: usize,

    /// Percentile pair for torso slice bounds. Default: (12, 88).
    /// Aggressive, since scan noise is expected.
    pub torso_percentiles: (f32, f32),

    /// Percentile pair for brace slice bounds. Default: (5, 95).
    /// Tighter, since the appliance mesh is comparatively clean.
    pub brace_percentiles: (f32, f32),

    /// Smoothing passes over torso slice bounds. Default: 2.
    pub torso_smoothing_passes: usize,

    /// Smoothing passes over brace slice bounds. Default: 1.
    /// Brace geometry is already regular and needs less smoothing.
    pub brace_smoothing_passes: usize,

    /// Per-slice scale factor clamp range. Default: (0.72, 1.42).
    pub scale_clamp: (f32, f32),

    /// Displacement cap as a fraction of the global brace span. Default: 0.35.
    pub displacement_cap_ratio: f32,

    /// Absolute floor for the per-axis displacement cap. Default: 0.03.
    pub displacement_cap_floor: f32,

    /// Fraction of the computed displacement actually applied. Default: 0.74.
    /// Under-shoots the target for stability against noisy slice estimates.
    pub blend: f32,
}

impl Default for WrapParams {
    fn default() -> Self {
        Self {
            clearance: 0.005,
            slice_count: SLICE_COUNT,
            torso_percentiles: (12.0, 88.0),
            brace_percentiles: (5.0, 95.0),
            torso_smoothing_passes: 2,
            brace_smoothing_passes: 1,
            scale_clamp: (0.72, 1.42),
            displacement_cap_ratio: 0.35,
            displacement_cap_floor: 0.03,
            blend: 0.74,
        }
    }
}

impl WrapParams {
    /// Creates parameters with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the clearance gap, clamped to `[0.0, 0.03]`.
    ///
    /// # Example
    ///
    /// ```
    /// use wrap_profile::WrapParams;
    ///
    /// let params = WrapParams::new().with_clearance(1.0);
    /// assert!((params.clearance - 0.03).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn with_clearance(mut self, clearance: f32) -> Self {
        self.clearance = clearance.clamp(0.0, MAX_CLEARANCE);
        self
    }

    /// Sets the slice count. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_slice_count(mut self, slices: usize) -> Self {
        self.slice_count = slices.max(1);
        self
    }

    /// Sets the torso percentile pair.
    #[must_use]
    pub const fn with_torso_percentiles(mut self, low: f32, high: f32) -> Self {
        self.torso_percentiles = (low, high);
        self
    }

    /// Sets the brace percentile pair.
    #[must_use]
    pub const fn with_brace_percentiles(mut self, low: f32, high: f32) -> Self {
        self.brace_percentiles = (low, high);
        self
    }

    /// Sets the blend factor applied to computed displacements.
    #[must_use]
    pub fn with_blend(mut self, blend: f32) -> Self {
        self.blend = blend.clamp(0.0, 1.0);
        self
    }
}
