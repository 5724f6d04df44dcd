//! Input validation and error types

pub mod error;
pub mod input;

pub use error::{EngineError, InputField};
pub use input::validate_beacons;
