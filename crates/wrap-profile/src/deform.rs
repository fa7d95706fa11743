//! Per-vertex deformation from slice profiles.
//!
//! Converts smoothed per-slice bounds into center/extent curves, samples
//! them continuously at each brace vertex height, and moves the vertex
//! toward the torso profile with clamped scale and displacement. Sampling
//! between slice centers instead of snapping to a hard bin avoids a
//! visible seam at every slice transition.

use rayon::prelude::*;
use wrap_types::{Point3, PointCloud};

use crate::params::WrapParams;
use crate::smooth::SmoothedBounds;

/// Floor applied to every extent before division.
const MIN_EXTENT: f32 = 1e-6;

/// Per-slice center/extent curves for one horizontal axis.
#[derive(Debug, Clone)]
struct AxisCurve {
    center: Vec<f32>,
    extent: Vec<f32>,
}

impl AxisCurve {
    fn from_bounds(bounds: &SmoothedBounds) -> Self {
        let center = bounds
            .lo
            .iter()
            .zip(&bounds.hi)
            .map(|(lo, hi)| (lo + hi) * 0.5)
            .collect();
        let extent = bounds
            .lo
            .iter()
            .zip(&bounds.hi)
            .map(|(lo, hi)| (hi - lo).max(MIN_EXTENT))
            .collect();
        Self { center, extent }
    }

    /// Samples the curve at a continuous slice coordinate.
    fn sample(&self, i0: usize, i1: usize, a: f32) -> (f32, f32) {
        (
            lerp(self.center[i0], self.center[i1], a),
            lerp(self.extent[i0], self.extent[i1], a),
        )
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// The deformed cloud plus per-vertex displacement statistics.
#[derive(Debug, Clone)]
pub(crate) struct DeformOutput {
    pub cloud: PointCloud,
    pub max_displacement: f32,
    pub average_displacement: f32,
    pub clamped_vertices: usize,
}

/// Deforms every brace vertex toward the torso profile.
///
/// For each vertex the torso and brace center/extent curves are sampled at
/// the vertex's continuous height position; the vertex is re-centered and
/// scaled toward the torso section, with the scale clamped to the params
/// range and the displacement capped per axis at
/// `max(cap_floor, cap_ratio * global brace span)`. The configured blend
/// fraction of the capped displacement is applied. Height is copied
/// through exactly.
pub(crate) fn deform_vertices(
    brace: &PointCloud,
    torso_x: &SmoothedBounds,
    torso_z: &SmoothedBounds,
    brace_x: &SmoothedBounds,
    brace_z: &SmoothedBounds,
    min_y: f32,
    span_y: f32,
    params: &WrapParams,
) -> DeformOutput {
    let slices = torso_x.lo.len();
    let t_x = AxisCurve::from_bounds(torso_x);
    let t_z = AxisCurve::from_bounds(torso_z);
    let b_x = AxisCurve::from_bounds(brace_x);
    let b_z = AxisCurve::from_bounds(brace_z);

    // Displacement caps derive from the whole brace, not per slice, so one
    // bad slice cannot explode the mesh.
    let bounds = brace.bounds();
    let span_x = (bounds.max.x - bounds.min.x).max(MIN_EXTENT);
    let span_z = (bounds.max.z - bounds.min.z).max(MIN_EXTENT);
    let max_dx = (span_x * params.displacement_cap_ratio).max(params.displacement_cap_floor);
    let max_dz = (span_z * params.displacement_cap_ratio).max(params.displacement_cap_floor);

    let (scale_lo, scale_hi) = params.scale_clamp;
    let clearance2 = 2.0 * params.clearance;

    #[allow(clippy::cast_precision_loss)]
    let max_f = (slices - 1) as f32;

    struct VertexOutcome {
        point: Point3<f32>,
        displacement: f32,
        clamped: bool,
    }

    // Each vertex writes a disjoint output slot; no cross-iteration hazards.
    let outcomes: Vec<VertexOutcome> = brace
        .points
        .par_iter()
        .map(|p| {
            let y_norm = ((p.y - min_y) / span_y).clamp(0.0, 1.0);
            let f = y_norm * max_f;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let i0 = (f.floor() as usize).min(slices - 1);
            let i1 = (i0 + 1).min(slices - 1);
            #[allow(clippy::cast_precision_loss)]
            let a = f - i0 as f32;

            let (tcx, tw) = t_x.sample(i0, i1, a);
            let (tcz, td) = t_z.sample(i0, i1, a);
            let (bcx, bw) = b_x.sample(i0, i1, a);
            let (bcz, bd) = b_z.sample(i0, i1, a);

            let sx = ((tw + clearance2) / bw).clamp(scale_lo, scale_hi);
            let sz = ((td + clearance2) / bd).clamp(scale_lo, scale_hi);

            let target_x = tcx + (p.x - bcx) * sx;
            let target_z = tcz + (p.z - bcz) * sz;

            let raw_dx = target_x - p.x;
            let raw_dz = target_z - p.z;
            let dx = raw_dx.clamp(-max_dx, max_dx);
            let dz = raw_dz.clamp(-max_dz, max_dz);
            let clamped = dx != raw_dx || dz != raw_dz;

            let applied_dx = dx * params.blend;
            let applied_dz = dz * params.blend;

            VertexOutcome {
                point: Point3::new(p.x + applied_dx, p.y, p.z + applied_dz),
                displacement: applied_dx.hypot(applied_dz),
                clamped,
            }
        })
        .collect();

    let mut max_displacement = 0.0f32;
    let mut total = 0.0f32;
    let mut clamped_vertices = 0usize;
    let mut points = Vec::with_capacity(outcomes.len());
    for o in &outcomes {
        max_displacement = max_displacement.max(o.displacement);
        total += o.displacement;
        clamped_vertices += usize::from(o.clamped);
        points.push(o.point);
    }

    #[allow(clippy::cast_precision_loss)]
    let average_displacement = if points.is_empty() {
        0.0
    } else {
        total / points.len() as f32
    };

    DeformOutput {
        cloud: PointCloud { points },
        max_displacement,
        average_displacement,
        clamped_vertices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_bounds(lo: f32, hi: f32, slices: usize) -> SmoothedBounds {
        SmoothedBounds {
            lo: vec![lo; slices],
            hi: vec![hi; slices],
        }
    }

    #[test]
    fn axis_curve_floors_extent() {
        let bounds = flat_bounds(0.5, 0.5, 4);
        let curve = AxisCurve::from_bounds(&bounds);
        for k in 0..4 {
            assert_relative_eq!(curve.center[k], 0.5);
            assert_relative_eq!(curve.extent[k], MIN_EXTENT);
        }
    }

    #[test]
    fn centered_identical_profiles_leave_vertices_still() {
        // Torso and brace share center and width with zero clearance:
        // scale is 1, target equals source.
        let brace = PointCloud {
            points: vec![
                Point3::new(-0.25, 0.0, 0.1),
                Point3::new(0.25, 0.5, -0.1),
                Point3::new(0.0, 1.0, 0.0),
            ],
        };
        let x = flat_bounds(-0.25, 0.25, 8);
        let z = flat_bounds(-0.1, 0.1, 8);
        let params = WrapParams::new().with_clearance(0.0);

        let out = deform_vertices(&brace, &x, &z, &x, &z, 0.0, 1.0, &params);

        for (orig, moved) in brace.iter().zip(out.cloud.iter()) {
            assert_relative_eq!(orig.x, moved.x, epsilon = 1e-6);
            assert_relative_eq!(orig.z, moved.z, epsilon = 1e-6);
            assert_relative_eq!(orig.y, moved.y);
        }
        assert!(out.max_displacement < 1e-6);
        assert_eq!(out.clamped_vertices, 0);
    }

    #[test]
    fn scale_hits_clamp_ceiling() {
        // Torso 10x wider than the brace: raw scale would be 5, the clamp
        // ceiling of 1.42 must apply.
        let brace = PointCloud {
            points: vec![Point3::new(1.0, 0.5, 0.0), Point3::new(-1.0, 0.5, 0.0)],
        };
        let torso_x = flat_bounds(-10.0, 10.0, 4);
        let brace_x = flat_bounds(-1.0, 1.0, 4);
        let z = flat_bounds(-1.0, 1.0, 4);
        let params = WrapParams::new().with_clearance(0.0);

        let out = deform_vertices(&brace, &torso_x, &z, &brace_x, &z, 0.0, 1.0, &params);

        // x = 1 with scale 1.42 targets 1.42; displacement 0.42 is under
        // the cap (0.35 * span 2 = 0.7), so output = 1 + 0.74 * 0.42.
        assert_relative_eq!(out.cloud.points[0].x, 1.0 + 0.74 * 0.42, epsilon = 1e-4);
        assert_relative_eq!(out.cloud.points[1].x, -1.0 - 0.74 * 0.42, epsilon = 1e-4);
    }

    #[test]
    fn displacement_cap_applies_before_blend() {
        // Torso center offset far from the brace center: raw displacement
        // exceeds the cap, so the output moves exactly cap * blend.
        let brace = PointCloud {
            points: vec![Point3::new(-0.5, 0.5, 0.0), Point3::new(0.5, 0.5, 0.0)],
        };
        let torso_x = flat_bounds(99.5, 100.5, 4);
        let brace_x = flat_bounds(-0.5, 0.5, 4);
        let z = flat_bounds(-0.5, 0.5, 4);
        let params = WrapParams::new().with_clearance(0.0);

        let out = deform_vertices(&brace, &torso_x, &z, &brace_x, &z, 0.0, 1.0, &params);

        // span_x = 1.0, cap = max(0.03, 0.35) = 0.35, applied = 0.74 * 0.35
        let expected = 0.74 * 0.35;
        assert_relative_eq!(out.cloud.points[0].x, -0.5 + expected, epsilon = 1e-5);
        assert_relative_eq!(out.cloud.points[1].x, 0.5 + expected, epsilon = 1e-5);
        assert_eq!(out.clamped_vertices, 2);
        assert_relative_eq!(out.max_displacement, expected, epsilon = 1e-5);
    }

    #[test]
    fn height_is_never_modified() {
        let brace = PointCloud {
            points: (0..50)
                .map(|i| {
                    #[allow(clippy::cast_precision_loss)]
                    let y = i as f32 * 0.437;
                    Point3::new(0.3, y, -0.2)
                })
                .collect(),
        };
        let torso = flat_bounds(-1.0, 1.0, 8);
        let b = flat_bounds(-0.4, 0.4, 8);
        let params = WrapParams::default();

        let out = deform_vertices(&brace, &torso, &torso, &b, &b, 0.0, 25.0, &params);

        for (orig, moved) in brace.iter().zip(out.cloud.iter()) {
            assert_eq!(orig.y.to_bits(), moved.y.to_bits());
        }
    }
}
