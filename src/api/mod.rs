//! Public engine interface: options, results, and output formatting

pub mod engine;
pub mod formatting;
pub mod types;

pub use engine::{compute, PositionEngine};
pub use formatting::{CsvFormatter, JsonFormatter, TextFormatter};
pub use types::{EngineOptions, PositionEstimate};
