//! Beacon geometry classification
//!
//! Trilateration needs beacons that are not all on one line; a
//! near-collinear set makes the linearized system ill-conditioned and the
//! solution wildly unstable. The classifier measures that via the
//! condition number of the difference matrix the solvers build, and
//! routes bad configurations to the centroid fallback instead of letting
//! them produce a divergent point.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::core::PlanarBeacon;

/// Solving strategy selected from beacon count and spatial configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStrategy {
    /// Weighted centroid fallback for underdetermined or degenerate sets
    Centroid,
    /// Direct three-beacon trilateration
    ClosedForm,
    /// Iterative weighted least squares
    LeastSquares,
}

/// Coarse grading of a beacon configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryGrade {
    /// Well-spread beacons, numerically comfortable
    Excellent,
    /// Adequate spread
    Good,
    /// Marginal but usable
    Acceptable,
    /// Narrow configuration, elevated uncertainty
    Poor,
    /// Near-collinear or underdetermined
    Degenerate,
}

impl GeometryGrade {
    /// Grade from the condition number of the difference matrix
    pub fn from_condition_number(condition_number: f64) -> Self {
        if condition_number < 1e1 {
            GeometryGrade::Excellent
        } else if condition_number < 1e3 {
            GeometryGrade::Good
        } else if condition_number < 1e5 {
            GeometryGrade::Acceptable
        } else if condition_number.is_finite() {
            GeometryGrade::Poor
        } else {
            GeometryGrade::Degenerate
        }
    }

    pub fn is_reliable(&self) -> bool {
        matches!(
            self,
            GeometryGrade::Excellent | GeometryGrade::Good | GeometryGrade::Acceptable
        )
    }
}

/// Classifier outcome for one beacon set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub strategy: SolveStrategy,
    /// Condition number of the difference matrix; `None` below 3 beacons
    pub condition_number: Option<f64>,
    pub grade: GeometryGrade,
}

/// Pick the solving strategy for a planar beacon set.
///
/// A condition number above `collinearity_threshold` marks the set as
/// effectively collinear and falls back to the centroid.
pub fn classify(beacons: &[PlanarBeacon], collinearity_threshold: f64) -> Classification {
    if beacons.len() < 3 {
        return Classification {
            strategy: SolveStrategy::Centroid,
            condition_number: None,
            grade: GeometryGrade::Degenerate,
        };
    }

    let condition_number = condition_number(beacons);
    if condition_number > collinearity_threshold {
        return Classification {
            strategy: SolveStrategy::Centroid,
            condition_number: Some(condition_number),
            grade: GeometryGrade::Degenerate,
        };
    }

    let strategy = if beacons.len() == 3 {
        SolveStrategy::ClosedForm
    } else {
        SolveStrategy::LeastSquares
    };

    Classification {
        strategy,
        condition_number: Some(condition_number),
        grade: GeometryGrade::from_condition_number(condition_number),
    }
}

/// Condition number of the (N-1)x2 matrix of position differences used by
/// the trilateration linearization. Infinite when the smallest singular
/// value vanishes (all beacons on one line).
pub fn condition_number(beacons: &[PlanarBeacon]) -> f64 {
    let first = beacons[0];
    let rows = beacons.len() - 1;
    let matrix = DMatrix::from_fn(rows, 2, |row, col| {
        let b = beacons[row + 1];
        if col == 0 {
            2.0 * (b.x - first.x)
        } else {
            2.0 * (b.y - first.y)
        }
    });

    let singular_values = matrix.svd(false, false).singular_values;
    let s_max = singular_values.max();
    let s_min = singular_values.min();

    if s_min > 1e-12 {
        s_max / s_min
    } else {
        f64::INFINITY
    }
}
