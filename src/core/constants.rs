//! Physical constants and solver defaults

/// Mean Earth radius used by the equirectangular projection (meters)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Default iteration cap for the Gauss-Newton solver
pub const DEFAULT_MAX_ITERATIONS: usize = 20;

/// Default convergence tolerance on the position update step (meters)
pub const DEFAULT_EPSILON_M: f64 = 1e-3;

/// Default condition-number threshold for the collinearity test
pub const DEFAULT_COLLINEARITY_THRESHOLD: f64 = 1e8;
