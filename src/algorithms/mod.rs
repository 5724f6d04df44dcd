//! Position estimation algorithms: projection, classification, solving,
//! and result evaluation

pub mod evaluation;
pub mod geometry;
pub mod projection;
pub mod solver;

pub use geometry::{GeometryGrade, SolveStrategy};
pub use projection::PlanarFrame;
pub use solver::{PlanarSolution, PlanarSolver};
