//! Planar solvers: closed-form trilateration, weighted Gauss-Newton, and
//! the weighted-centroid fallback
//!
//! All solvers minimize the same objective, the weighted sum of squared
//! range residuals `sum(w_i * (|P - B_i| - d_i)^2)`. The closed form
//! handles exactly three beacons; Gauss-Newton handles larger sets; the
//! centroid is the answer of last resort and is always flagged as
//! underdetermined.

use nalgebra::{Matrix2, Vector2};

use crate::algorithms::geometry::SolveStrategy;
use crate::core::{PlanarBeacon, DEFAULT_EPSILON_M, DEFAULT_MAX_ITERATIONS};

/// Distance floor below which the Jacobian direction is undefined (meters)
const MIN_JACOBIAN_DISTANCE_M: f64 = 1e-6;

/// Step-halving attempts before a diverging iteration gives up
const DIVERGENCE_RETRY_BUDGET: usize = 3;

/// |det| tolerance for the closed-form 2x2 system
const DET_TOLERANCE: f64 = 1e-9;

/// Relative determinant floor for the Gauss-Newton normal matrix
const NORMAL_DET_FLOOR: f64 = 1e-12;

/// Planar solution prior to evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarSolution {
    pub x: f64,
    pub y: f64,
    /// Whether the solver met its tolerance (direct solves count as met)
    pub converged: bool,
    /// Iterations spent; 0 for direct solves
    pub iterations: usize,
    /// True when the input could not pin down a unique point
    pub underdetermined: bool,
}

/// Iterative solver configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarSolver {
    /// Gauss-Newton iteration cap
    pub max_iterations: usize,
    /// Convergence tolerance on the update step (meters)
    pub epsilon_m: f64,
}

impl Default for PlanarSolver {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            epsilon_m: DEFAULT_EPSILON_M,
        }
    }
}

impl PlanarSolver {
    /// Solve a planar beacon set with the strategy the classifier picked.
    ///
    /// Never fails: degenerate closed-form systems and diverging
    /// iterations degrade to the weighted centroid with
    /// `underdetermined = true`.
    pub fn solve(&self, beacons: &[PlanarBeacon], strategy: SolveStrategy) -> PlanarSolution {
        match strategy {
            SolveStrategy::Centroid => Self::centroid_solution(beacons, 0),
            SolveStrategy::ClosedForm => match Self::closed_form(beacons) {
                Some(point) => PlanarSolution {
                    x: point.x,
                    y: point.y,
                    converged: true,
                    iterations: 0,
                    underdetermined: false,
                },
                // Re-checked defensively; the classifier should have
                // routed collinear sets to the centroid already.
                None => Self::centroid_solution(beacons, 0),
            },
            SolveStrategy::LeastSquares => self.gauss_newton(beacons, self.initial_guess(beacons)),
        }
    }

    /// Direct trilateration of exactly three beacons.
    ///
    /// Subtracting the first beacon's circle equation from the other two
    /// eliminates the quadratic term and leaves a 2x2 linear system in
    /// the target coordinates. Returns `None` when the system is singular
    /// (collinear beacons).
    pub fn closed_form(beacons: &[PlanarBeacon]) -> Option<Vector2<f64>> {
        if beacons.len() != 3 {
            return None;
        }

        let b1 = beacons[0];
        let mut a = Matrix2::zeros();
        let mut rhs = Vector2::zeros();

        for (row, bi) in beacons[1..].iter().enumerate() {
            a[(row, 0)] = 2.0 * (bi.x - b1.x);
            a[(row, 1)] = 2.0 * (bi.y - b1.y);
            rhs[row] = b1.distance.powi(2) - bi.distance.powi(2) + bi.x.powi(2)
                - b1.x.powi(2)
                + bi.y.powi(2)
                - b1.y.powi(2);
        }

        if a.determinant().abs() < DET_TOLERANCE {
            return None;
        }

        a.try_inverse().map(|inverse| inverse * rhs)
    }

    /// Weighted centroid of the beacon positions
    pub fn weighted_centroid(beacons: &[PlanarBeacon]) -> Vector2<f64> {
        let mut total_weight = 0.0;
        let mut sum = Vector2::zeros();
        for b in beacons {
            total_weight += b.weight;
            sum += Vector2::new(b.x, b.y) * b.weight;
        }
        sum / total_weight
    }

    fn centroid_solution(beacons: &[PlanarBeacon], iterations: usize) -> PlanarSolution {
        let centroid = Self::weighted_centroid(beacons);
        PlanarSolution {
            x: centroid.x,
            y: centroid.y,
            converged: false,
            iterations,
            underdetermined: true,
        }
    }

    /// Starting point for the iteration: closed-form solution of the
    /// highest-weight beacon triple, or the weighted centroid when that
    /// triple is degenerate.
    fn initial_guess(&self, beacons: &[PlanarBeacon]) -> Vector2<f64> {
        let mut indices: Vec<usize> = (0..beacons.len()).collect();
        indices.sort_by(|&a, &b| {
            beacons[b]
                .weight
                .partial_cmp(&beacons[a].weight)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let triple: Vec<PlanarBeacon> = indices.iter().take(3).map(|&i| beacons[i]).collect();
        Self::closed_form(&triple).unwrap_or_else(|| Self::weighted_centroid(beacons))
    }

    /// Gauss-Newton refinement of the weighted range residuals.
    ///
    /// Solves the weighted normal equations each iteration and applies
    /// the update step. A step norm growing for two consecutive
    /// iterations triggers step halving; if the iteration keeps diverging
    /// past the retry budget the solver abandons refinement and returns
    /// the weighted centroid flagged as underdetermined.
    fn gauss_newton(&self, beacons: &[PlanarBeacon], start: Vector2<f64>) -> PlanarSolution {
        let mut position = start;
        let mut prev_step_norm = f64::INFINITY;
        let mut growth_streak = 0usize;
        let mut retries = 0usize;
        let mut iterations = 0usize;

        while iterations < self.max_iterations {
            iterations += 1;

            let (jtwj, jtwr) = Self::normal_equations(beacons, &position);

            // A rank-deficient normal matrix means every residual
            // gradient points the same way; nothing left to refine. The
            // trace is the total weight, so this scales with the input.
            if jtwj.determinant().abs() <= NORMAL_DET_FLOOR * jtwj.trace().powi(2) {
                return Self::centroid_solution(beacons, iterations);
            }
            let Some(inverse) = jtwj.try_inverse() else {
                return Self::centroid_solution(beacons, iterations);
            };

            let mut step = -(inverse * jtwr);
            let mut step_norm = step.norm();

            if step_norm > prev_step_norm {
                growth_streak += 1;
            } else {
                growth_streak = 0;
            }

            if growth_streak >= 2 {
                if retries >= DIVERGENCE_RETRY_BUDGET {
                    return Self::centroid_solution(beacons, iterations);
                }
                step *= 0.5;
                step_norm *= 0.5;
                retries += 1;
                growth_streak = 0;
            }

            position += step;

            if step_norm < self.epsilon_m {
                return PlanarSolution {
                    x: position.x,
                    y: position.y,
                    converged: true,
                    iterations,
                    underdetermined: false,
                };
            }

            prev_step_norm = step_norm;
        }

        PlanarSolution {
            x: position.x,
            y: position.y,
            converged: false,
            iterations,
            underdetermined: false,
        }
    }

    /// Accumulate `J^T W J` and `J^T W r` for the current estimate.
    ///
    /// The Jacobian row for a beacon is the unit vector from the beacon
    /// to the estimate; within the distance floor of a beacon that
    /// direction is undefined and a fixed unit vector stands in.
    fn normal_equations(
        beacons: &[PlanarBeacon],
        position: &Vector2<f64>,
    ) -> (Matrix2<f64>, Vector2<f64>) {
        let mut jtwj = Matrix2::zeros();
        let mut jtwr = Vector2::zeros();

        for b in beacons {
            let dx = position.x - b.x;
            let dy = position.y - b.y;
            let range = (dx * dx + dy * dy).sqrt();

            let (ux, uy) = if range < MIN_JACOBIAN_DISTANCE_M {
                (1.0, 0.0)
            } else {
                (dx / range, dy / range)
            };

            let residual = range - b.distance;
            let w = b.weight;

            jtwj[(0, 0)] += w * ux * ux;
            jtwj[(0, 1)] += w * ux * uy;
            jtwj[(1, 0)] += w * uy * ux;
            jtwj[(1, 1)] += w * uy * uy;

            jtwr[0] += w * ux * residual;
            jtwr[1] += w * uy * residual;
        }

        (jtwj, jtwr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::evaluation::weighted_residual_norm;

    fn planar(x: f64, y: f64, distance: f64) -> PlanarBeacon {
        PlanarBeacon {
            x,
            y,
            distance,
            weight: 1.0,
        }
    }

    fn distance(x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
        ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt()
    }

    #[test]
    fn test_closed_form_exact_recovery() {
        let truth = (12.0, -7.5);
        let anchors = [(0.0, 0.0), (30.0, 5.0), (8.0, 25.0)];
        let beacons: Vec<PlanarBeacon> = anchors
            .iter()
            .map(|&(x, y)| planar(x, y, distance(x, y, truth.0, truth.1)))
            .collect();

        let point = PlanarSolver::closed_form(&beacons).unwrap();
        assert!((point.x - truth.0).abs() < 1e-9);
        assert!((point.y - truth.1).abs() < 1e-9);
    }

    #[test]
    fn test_closed_form_rejects_collinear() {
        let beacons = vec![
            planar(0.0, 0.0, 5.0),
            planar(1.0, 0.0, 4.0),
            planar(2.0, 0.0, 3.0),
        ];
        assert!(PlanarSolver::closed_form(&beacons).is_none());
    }

    #[test]
    fn test_noisy_three_beacon_fix_converges() {
        // Distances deliberately inconsistent; the direct solve must
        // still land within a small residual of all three circles.
        let beacons = vec![
            planar(2.0, 4.0, 5.7),
            planar(5.5, 13.0, 6.8),
            planar(11.5, 2.0, 6.4),
        ];
        let solver = PlanarSolver::default();
        let solution = solver.solve(&beacons, SolveStrategy::ClosedForm);

        assert!(solution.converged);
        assert!(!solution.underdetermined);
        let residual = weighted_residual_norm(&beacons, solution.x, solution.y);
        assert!(residual < 0.5, "residual {} too large", residual);

        // Stable across repeated calls.
        let again = solver.solve(&beacons, SolveStrategy::ClosedForm);
        assert_eq!(solution, again);
    }

    #[test]
    fn test_gauss_newton_exact_recovery_six_beacons() {
        let truth = (3.0, -2.0);
        let anchors = [
            (-20.0, 0.0),
            (25.0, 10.0),
            (0.0, 30.0),
            (15.0, -25.0),
            (-10.0, -18.0),
            (30.0, -5.0),
        ];
        let beacons: Vec<PlanarBeacon> = anchors
            .iter()
            .map(|&(x, y)| planar(x, y, distance(x, y, truth.0, truth.1)))
            .collect();

        let solver = PlanarSolver::default();
        let solution = solver.solve(&beacons, SolveStrategy::LeastSquares);

        assert!(solution.converged);
        assert!(solution.iterations <= solver.max_iterations);
        assert!((solution.x - truth.0).abs() < 1e-3);
        assert!((solution.y - truth.1).abs() < 1e-3);
    }

    #[test]
    fn test_gauss_newton_weight_scaling_invariance() {
        let beacons = vec![
            planar(0.0, 0.0, 10.0),
            planar(20.0, 0.0, 12.0),
            planar(0.0, 20.0, 15.0),
            planar(20.0, 20.0, 18.0),
        ];
        let scaled: Vec<PlanarBeacon> = beacons
            .iter()
            .map(|b| PlanarBeacon {
                weight: b.weight * 7.0,
                ..*b
            })
            .collect();

        let solver = PlanarSolver::default();
        let base = solver.solve(&beacons, SolveStrategy::LeastSquares);
        let rescaled = solver.solve(&scaled, SolveStrategy::LeastSquares);

        assert!((base.x - rescaled.x).abs() < 1e-9);
        assert!((base.y - rescaled.y).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_weighting() {
        let beacons = vec![
            PlanarBeacon {
                x: 0.0,
                y: 0.0,
                distance: 1.0,
                weight: 1.0,
            },
            PlanarBeacon {
                x: 10.0,
                y: 0.0,
                distance: 1.0,
                weight: 3.0,
            },
        ];
        let centroid = PlanarSolver::weighted_centroid(&beacons);
        assert!((centroid.x - 7.5).abs() < 1e-12);
        assert!((centroid.y - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_centroid_strategy_flags_underdetermined() {
        let beacons = vec![planar(0.0, 0.0, 5.0), planar(10.0, 0.0, 5.0)];
        let solver = PlanarSolver::default();
        let solution = solver.solve(&beacons, SolveStrategy::Centroid);

        assert!(solution.underdetermined);
        assert!(!solution.converged);
        assert!(solution.x.is_finite() && solution.y.is_finite());
    }

    #[test]
    fn test_coincident_beacons_fall_back_to_centroid() {
        // Four beacons at the same spot: rank-1 normal matrix, no
        // direction information at all.
        let beacons = vec![
            planar(5.0, 5.0, 3.0),
            planar(5.0, 5.0, 4.0),
            planar(5.0, 5.0, 5.0),
            planar(5.0, 5.0, 6.0),
        ];
        let solver = PlanarSolver::default();
        let solution = solver.gauss_newton(&beacons, Vector2::new(50.0, 50.0));

        assert!(solution.underdetermined);
        assert!((solution.x - 5.0).abs() < 1e-9);
        assert!((solution.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_iteration_cap_reports_non_convergence() {
        let truth = (3.0, -2.0);
        let anchors = [(-20.0, 0.0), (25.0, 10.0), (0.0, 30.0), (15.0, -25.0)];
        let noise = [0.4, -0.3, 0.2, -0.5];
        let beacons: Vec<PlanarBeacon> = anchors
            .iter()
            .zip(noise)
            .map(|(&(x, y), n)| planar(x, y, distance(x, y, truth.0, truth.1) + n))
            .collect();

        let solver = PlanarSolver {
            max_iterations: 1,
            epsilon_m: 1e-12,
        };
        let solution = solver.solve(&beacons, SolveStrategy::LeastSquares);

        assert!(!solution.converged);
        assert_eq!(solution.iterations, 1);
        assert!(!solution.underdetermined);
        assert!(solution.x.is_finite() && solution.y.is_finite());
    }
}
