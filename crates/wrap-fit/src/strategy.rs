//! Backend selection and fallback.
//!
//! Two fitting strategies exist: the deterministic slice-profile pipeline
//! (always available) and an optional iterative mesh-fitting solver
//! supplied by the caller through the [`IterativeSolver`] trait. This
//! module owns strategy selection and fallback-on-failure; the profile
//! pipeline has zero knowledge of, or dependency on, the iterative one.

use std::str::FromStr;

use thiserror::Error;
use wrap_profile::{wrap, WrapParams};
use wrap_types::{IndexedMesh, PointCloud};

use crate::error::{FitError, FitResult};

/// Which backend the client requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Prefer the iterative solver when one is available, otherwise use
    /// the profile pipeline.
    #[default]
    Auto,
    /// Always use the deterministic profile pipeline.
    Profile,
    /// Require the iterative solver; fail if it is unavailable or errors.
    Iterative,
}

impl FromStr for Backend {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "profile" => Ok(Self::Profile),
            "iterative" => Ok(Self::Iterative),
            other => Err(FitError::UnknownBackend {
                name: other.to_string(),
            }),
        }
    }
}

/// Which backend actually produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendUsed {
    /// The deterministic profile pipeline.
    Profile,
    /// The iterative mesh-fitting solver.
    Iterative,
}

impl std::fmt::Display for BackendUsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Profile => f.write_str("profile"),
            Self::Iterative => f.write_str("iterative"),
        }
    }
}

/// Resource budgets for the iterative solver path.
///
/// The iterative path exists for interactive use, so its work is bounded:
/// iteration counts are clamped and overly dense inputs are rejected
/// (triggering fallback under [`Backend::Auto`]).
#[derive(Debug, Clone, Copy)]
pub struct FitBudget;

impl FitBudget {
    /// Minimum iteration count handed to the solver.
    pub const MIN_ITERATIONS: u32 = 40;
    /// Maximum iteration count handed to the solver.
    pub const MAX_ITERATIONS: u32 = 220;
    /// Brace meshes denser than this are rejected by the iterative path.
    pub const MAX_BRACE_VERTICES: usize = 160_000;
    /// Torso clouds larger than this are downsampled before solving.
    pub const MAX_TORSO_POINTS: usize = 80_000;

    /// Clamps a requested iteration count into the allowed range.
    #[must_use]
    pub const fn clamp_iterations(iterations: u32) -> u32 {
        if iterations < Self::MIN_ITERATIONS {
            Self::MIN_ITERATIONS
        } else if iterations > Self::MAX_ITERATIONS {
            Self::MAX_ITERATIONS
        } else {
            iterations
        }
    }
}

/// Failure reported by an iterative solver.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SolverFailure {
    /// Description of what went wrong.
    pub message: String,
}

impl SolverFailure {
    /// Creates a failure with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An iterative mesh-fitting strategy.
///
/// Implementations typically run gradient-based optimization against an
/// external differentiable-geometry dependency. The trait keeps that
/// dependency entirely on the implementor's side: this workspace only
/// ever sees clouds in, clouds out.
///
/// The returned cloud must have exactly one point per brace vertex, in
/// brace vertex order; anything else is treated as a solver failure.
pub trait IterativeSolver {
    /// Human-readable solver name for diagnostics.
    fn name(&self) -> &str {
        "iterative"
    }

    /// Fits the brace mesh to the torso cloud.
    ///
    /// # Errors
    ///
    /// Returns [`SolverFailure`] on any internal failure; the boundary
    /// decides whether to fall back or surface it.
    fn fit(
        &self,
        torso: &PointCloud,
        brace: &IndexedMesh,
        iterations: u32,
    ) -> Result<PointCloud, SolverFailure>;
}

/// A fitting request as received from a client.
#[derive(Debug, Clone)]
pub struct FitRequest {
    /// The torso scan point cloud.
    pub torso: PointCloud,
    /// The brace mesh (faces matter only to the iterative path).
    pub brace: IndexedMesh,
    /// Requested clearance gap; clamped to `[0.0, 0.03]` before use.
    pub clearance: f32,
    /// Requested iteration count; clamped to `[40, 220]` before use.
    pub iterations: u32,
    /// Requested backend.
    pub backend: Backend,
}

impl FitRequest {
    /// Creates a request with default clearance (0.005), iterations (120)
    /// and backend ([`Backend::Auto`]).
    #[must_use]
    pub fn new(torso: PointCloud, brace: IndexedMesh) -> Self {
        Self {
            torso,
            brace,
            clearance: 0.005,
            iterations: 120,
            backend: Backend::Auto,
        }
    }

    /// Sets the clearance gap.
    #[must_use]
    pub const fn with_clearance(mut self, clearance: f32) -> Self {
        self.clearance = clearance;
        self
    }

    /// Sets the iteration count for the iterative path.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the backend.
    #[must_use]
    pub const fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }
}

/// The fitted vertices plus the transport metadata clients receive.
#[derive(Debug, Clone)]
pub struct FitOutcome {
    /// The fitted brace vertices, aligned 1:1 with the request's brace.
    pub cloud: PointCloud,
    /// Which backend produced the result.
    pub backend_used: BackendUsed,
    /// Number of vertices in `cloud`.
    pub vertex_count: usize,
}

/// Runs a fitting request, selecting and falling back between backends.
///
/// - [`Backend::Profile`] always runs the deterministic pipeline.
/// - [`Backend::Iterative`] requires `solver`; solver absence or failure
///   is surfaced as an error.
/// - [`Backend::Auto`] prefers `solver` when present but falls back to
///   the profile pipeline on any solver failure.
///
/// # Errors
///
/// Returns client-input errors from the core ([`FitError::Wrap`]), or
/// [`FitError::IterativeUnavailable`] / [`FitError::Iterative`] when the
/// iterative backend was explicitly required and could not deliver.
pub fn fit_with_strategy(
    request: &FitRequest,
    solver: Option<&dyn IterativeSolver>,
) -> FitResult<FitOutcome> {
    match request.backend {
        Backend::Profile => run_profile(request),
        Backend::Iterative => {
            let solver = solver.ok_or(FitError::IterativeUnavailable)?;
            run_iterative(request, solver).map_err(|failure| FitError::Iterative {
                message: failure.message,
            })
        }
        Backend::Auto => match solver {
            None => run_profile(request),
            Some(solver) => match run_iterative(request, solver) {
                Ok(outcome) => Ok(outcome),
                Err(failure) => {
                    log::warn!(
                        "iterative solver '{}' failed ({}); falling back to profile pipeline",
                        solver.name(),
                        failure.message
                    );
                    run_profile(request)
                }
            },
        },
    }
}

fn run_profile(request: &FitRequest) -> FitResult<FitOutcome> {
    let params = WrapParams::new().with_clearance(request.clearance);
    let output = wrap(&request.torso, &request.brace.to_cloud(), &params)?;
    let vertex_count = output.cloud.len();
    Ok(FitOutcome {
        cloud: output.cloud,
        backend_used: BackendUsed::Profile,
        vertex_count,
    })
}

fn run_iterative(
    request: &FitRequest,
    solver: &dyn IterativeSolver,
) -> Result<FitOutcome, SolverFailure> {
    let vertex_count = request.brace.vertex_count();
    if vertex_count > FitBudget::MAX_BRACE_VERTICES {
        return Err(SolverFailure::new(format!(
            "brace mesh too dense for iterative path ({vertex_count} vertices)"
        )));
    }

    let iterations = FitBudget::clamp_iterations(request.iterations);
    let torso = downsample(&request.torso, FitBudget::MAX_TORSO_POINTS);

    let cloud = solver.fit(&torso, &request.brace, iterations)?;
    if cloud.len() != vertex_count {
        return Err(SolverFailure::new(format!(
            "solver returned {} vertices, expected {vertex_count}",
            cloud.len()
        )));
    }

    Ok(FitOutcome {
        cloud,
        backend_used: BackendUsed::Iterative,
        vertex_count,
    })
}

/// Deterministic stride downsampling to at most `max_points` points.
fn downsample(cloud: &PointCloud, max_points: usize) -> PointCloud {
    let n = cloud.len();
    if n <= max_points {
        return cloud.clone();
    }

    let stride = n.div_ceil(max_points);
    PointCloud {
        points: cloud.points.iter().step_by(stride).copied().collect(),
    }
}
