//! Converts planar solutions into geographic estimates with quality
//! metrics

use crate::algorithms::projection::PlanarFrame;
use crate::algorithms::solver::PlanarSolution;
use crate::core::{GeoPoint, PlanarBeacon};

/// Evaluated solution: geographic position plus quality metrics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub position: GeoPoint,
    /// Weighted RMS of the range residuals (meters)
    pub residual_norm: f64,
    /// Confidence score in [0, 1]; 0 when underdetermined
    pub quality: f64,
}

/// Inverse-project a planar solution and attach quality metrics
pub fn evaluate(
    beacons: &[PlanarBeacon],
    solution: &PlanarSolution,
    frame: &PlanarFrame,
) -> Evaluation {
    let residual_norm = weighted_residual_norm(beacons, solution.x, solution.y);
    let quality = if solution.underdetermined {
        0.0
    } else {
        quality_score(residual_norm, median_distance(beacons))
    };

    Evaluation {
        position: frame.unproject(solution.x, solution.y),
        residual_norm,
        quality,
    }
}

/// Weighted root-mean-square of the range residuals at a planar point
pub fn weighted_residual_norm(beacons: &[PlanarBeacon], x: f64, y: f64) -> f64 {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for b in beacons {
        let range = ((x - b.x).powi(2) + (y - b.y).powi(2)).sqrt();
        let residual = range - b.distance;
        weighted_sum += b.weight * residual * residual;
        total_weight += b.weight;
    }

    (weighted_sum / total_weight).sqrt()
}

/// Quality decreases linearly as the residual norm approaches the median
/// measured distance, clamped to [0, 1]. A zero median leaves the ratio
/// undefined: perfect agreement scores 1, anything else 0.
fn quality_score(residual_norm: f64, median_distance: f64) -> f64 {
    if median_distance > 0.0 {
        (1.0 - residual_norm / median_distance).clamp(0.0, 1.0)
    } else if residual_norm < f64::EPSILON {
        1.0
    } else {
        0.0
    }
}

/// Upper median of the measured distances
fn median_distance(beacons: &[PlanarBeacon]) -> f64 {
    let mut distances: Vec<f64> = beacons.iter().map(|b| b.distance).collect();
    distances.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    distances[distances.len() / 2]
}
