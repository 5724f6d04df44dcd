//! Engine options and result types

use serde::{Deserialize, Serialize};

use crate::algorithms::geometry::{GeometryGrade, SolveStrategy};
use crate::core::{
    DEFAULT_COLLINEARITY_THRESHOLD, DEFAULT_EPSILON_M, DEFAULT_MAX_ITERATIONS,
};

/// Tuning options for a computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Iteration cap for the Gauss-Newton solver
    pub max_iterations: usize,
    /// Convergence tolerance on the position update step (meters)
    pub epsilon_m: f64,
    /// Condition-number threshold above which beacon geometry is treated
    /// as collinear
    pub collinearity_threshold: f64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            epsilon_m: DEFAULT_EPSILON_M,
            collinearity_threshold: DEFAULT_COLLINEARITY_THRESHOLD,
        }
    }
}

/// Position estimate with confidence signals
///
/// Consumers should gate trust on `underdetermined` and `converged`
/// before rendering the point as authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionEstimate {
    /// Estimated latitude (degrees)
    pub lat: f64,
    /// Estimated longitude (degrees)
    pub lng: f64,
    /// Weighted RMS of the range residuals (meters)
    pub residual_norm: f64,
    /// Whether the solver met its tolerance (direct solves count as met)
    pub converged: bool,
    /// Iterations spent; 0 for direct solutions
    pub iterations: usize,
    /// True when the beacon set could not pin down a unique point
    pub underdetermined: bool,
    /// Confidence score in [0, 1]; 0 when underdetermined
    pub quality: f64,
    /// Strategy the classifier selected
    pub strategy: SolveStrategy,
    /// Coarse grading of the beacon configuration
    pub geometry_grade: GeometryGrade,
    /// Number of beacons used
    pub beacon_count: usize,
}

impl PositionEstimate {
    /// Whether a consumer should treat the point as authoritative
    pub fn is_trustworthy(&self) -> bool {
        !self.underdetermined && self.converged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = EngineOptions::default();
        assert_eq!(options.max_iterations, 20);
        assert_eq!(options.epsilon_m, 1e-3);
        assert_eq!(options.collinearity_threshold, 1e8);
    }

    #[test]
    fn test_options_json_round_trip() {
        let options = EngineOptions {
            max_iterations: 50,
            epsilon_m: 1e-4,
            collinearity_threshold: 1e6,
        };
        let json = serde_json::to_string(&options).unwrap();
        let back: EngineOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(options, back);
    }

    #[test]
    fn test_trustworthy_gating() {
        let estimate = PositionEstimate {
            lat: 0.0,
            lng: 0.0,
            residual_norm: 0.1,
            converged: true,
            iterations: 4,
            underdetermined: false,
            quality: 0.9,
            strategy: SolveStrategy::LeastSquares,
            geometry_grade: GeometryGrade::Good,
            beacon_count: 5,
        };
        assert!(estimate.is_trustworthy());

        let centroid_fallback = PositionEstimate {
            converged: false,
            underdetermined: true,
            quality: 0.0,
            strategy: SolveStrategy::Centroid,
            ..estimate
        };
        assert!(!centroid_fallback.is_trustworthy());
    }
}
