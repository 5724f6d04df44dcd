//! Error classification for the position estimation engine
//!
//! Only malformed input is a hard failure. Geometrically difficult
//! situations (collinear beacons, iteration-cap exhaustion) degrade to a
//! best-effort estimate carrying explicit confidence flags instead of
//! surfacing here.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Beacon field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputField {
    Latitude,
    Longitude,
    Distance,
    Weight,
}

impl InputField {
    /// Valid range for the field, for diagnostics
    pub fn valid_range(&self) -> &'static str {
        match self {
            InputField::Latitude => "[-90, 90]",
            InputField::Longitude => "[-180, 180]",
            InputField::Distance => "[0, inf)",
            InputField::Weight => "(0, inf)",
        }
    }
}

/// Fatal errors a computation can return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineError {
    /// A beacon carried a NaN, infinite, or out-of-range value
    InvalidInput {
        beacon_id: String,
        field: InputField,
        value: f64,
    },
    /// The beacon list was empty
    InsufficientBeacons { available: usize, required: usize },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidInput {
                beacon_id,
                field,
                value,
            } => {
                write!(
                    f,
                    "Invalid {:?} for beacon {}: {} (valid range: {})",
                    field,
                    beacon_id,
                    value,
                    field.valid_range()
                )
            }
            EngineError::InsufficientBeacons {
                available,
                required,
            } => {
                write!(
                    f,
                    "Insufficient beacons: {} available, {} required",
                    available, required
                )
            }
        }
    }
}

impl std::error::Error for EngineError {}
