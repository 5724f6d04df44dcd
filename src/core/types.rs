//! Core data types for the position estimation engine

use serde::{Deserialize, Serialize};

fn default_weight() -> f64 {
    1.0
}

/// 2D position in geographic coordinates (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Reference point with a known location and a measured distance to the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beacon {
    pub id: String,
    /// Latitude (degrees)
    pub lat: f64,
    /// Longitude (degrees)
    pub lng: f64,
    /// Measured distance to the unknown target (meters)
    pub distance: f64,
    /// Relative trust in this measurement; defaults to 1
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl Beacon {
    /// Create a unit-weight beacon
    pub fn new(id: impl Into<String>, lat: f64, lng: f64, distance: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
            distance,
            weight: 1.0,
        }
    }

    /// Create a beacon with an explicit measurement weight
    pub fn with_weight(
        id: impl Into<String>,
        lat: f64,
        lng: f64,
        distance: f64,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
            distance,
            weight,
        }
    }
}

/// Beacon projected onto the local tangent plane (meters from the origin)
///
/// Exists only within a single computation; carries exactly what the
/// solver needs and nothing else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarBeacon {
    pub x: f64,
    pub y: f64,
    pub distance: f64,
    pub weight: f64,
}
