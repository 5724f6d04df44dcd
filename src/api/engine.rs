//! Engine facade: validate, project, classify, solve, evaluate
//!
//! The facade is stateless. Every call takes a fresh snapshot of the
//! beacon list and produces exactly one estimate; concurrent calls from
//! multiple threads are safe without locking.

use crate::algorithms::evaluation;
use crate::algorithms::geometry;
use crate::algorithms::projection;
use crate::algorithms::solver::PlanarSolver;
use crate::api::types::{EngineOptions, PositionEstimate};
use crate::core::Beacon;
use crate::validation::error::EngineError;
use crate::validation::input::validate_beacons;

/// Weighted position estimation engine
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionEngine {
    options: EngineOptions,
}

impl PositionEngine {
    /// Engine with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with explicit options
    pub fn with_options(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Estimate the target position from a beacon snapshot.
    ///
    /// Fails only on malformed input (`InvalidInput`) or an empty list
    /// (`InsufficientBeacons`); geometrically difficult configurations
    /// return a degraded estimate with its confidence flags lowered.
    pub fn compute(&self, beacons: &[Beacon]) -> Result<PositionEstimate, EngineError> {
        validate_beacons(beacons)?;

        let (planar, frame) = projection::project(beacons)?;
        let classification = geometry::classify(&planar, self.options.collinearity_threshold);

        let solver = PlanarSolver {
            max_iterations: self.options.max_iterations,
            epsilon_m: self.options.epsilon_m,
        };
        let solution = solver.solve(&planar, classification.strategy);
        let evaluation = evaluation::evaluate(&planar, &solution, &frame);

        Ok(PositionEstimate {
            lat: evaluation.position.lat,
            lng: evaluation.position.lng,
            residual_norm: evaluation.residual_norm,
            converged: solution.converged,
            iterations: solution.iterations,
            underdetermined: solution.underdetermined,
            quality: evaluation.quality,
            strategy: classification.strategy,
            geometry_grade: classification.grade,
            beacon_count: beacons.len(),
        })
    }
}

/// One-shot convenience wrapper around [`PositionEngine`]
pub fn compute(
    beacons: &[Beacon],
    options: &EngineOptions,
) -> Result<PositionEstimate, EngineError> {
    PositionEngine::with_options(*options).compute(beacons)
}
