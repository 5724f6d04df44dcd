//! Core types and constants for the position estimation engine

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
