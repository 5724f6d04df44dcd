//! Weighted position estimation from distance beacons
//!
//! Projects geographic beacons onto a local plane, solves for the
//! best-fit point minimizing weighted range residuals, and reports the
//! estimate together with explicit confidence signals.

pub mod core;
pub mod algorithms;
pub mod validation;
pub mod api;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{Beacon, GeoPoint, PlanarBeacon, EARTH_RADIUS_M};
pub use algorithms::geometry::{GeometryGrade, SolveStrategy};
pub use algorithms::projection::PlanarFrame;
pub use algorithms::solver::{PlanarSolution, PlanarSolver};
pub use api::engine::{compute, PositionEngine};
pub use api::formatting::{CsvFormatter, JsonFormatter, TextFormatter};
pub use api::types::{EngineOptions, PositionEstimate};
pub use utils::config::{ConfigError, ConfigurationManager};
pub use validation::error::{EngineError, InputField};
