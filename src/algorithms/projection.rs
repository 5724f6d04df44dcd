//! Equirectangular projection between geographic and local planar frames
//!
//! Beacon sets span at most a few kilometers, so a flat-earth projection
//! around a local origin is accurate enough; the origin is the arithmetic
//! mean of the beacon coordinates to keep planar magnitudes small.

use std::f64::consts::PI;

use crate::core::{Beacon, GeoPoint, PlanarBeacon, EARTH_RADIUS_M};
use crate::validation::error::EngineError;

const DEG_TO_RAD: f64 = PI / 180.0;

/// Local tangent plane centered at a geographic origin.
///
/// `project` and `unproject` are exact inverses around the same origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarFrame {
    origin: GeoPoint,
    cos_lat0: f64,
}

impl PlanarFrame {
    /// Frame centered at an explicit origin
    pub fn new(origin: GeoPoint) -> Self {
        // The projection degenerates at the poles; floor the scale factor
        // so the frame stays invertible with finite output.
        let cos_lat0 = (origin.lat * DEG_TO_RAD).cos().max(1e-12);
        Self { origin, cos_lat0 }
    }

    /// Frame centered at the arithmetic mean of the beacon coordinates
    pub fn for_beacons(beacons: &[Beacon]) -> Result<Self, EngineError> {
        if beacons.is_empty() {
            return Err(EngineError::InsufficientBeacons {
                available: 0,
                required: 1,
            });
        }

        let n = beacons.len() as f64;
        let lat0 = beacons.iter().map(|b| b.lat).sum::<f64>() / n;
        let lng0 = beacons.iter().map(|b| b.lng).sum::<f64>() / n;

        Ok(Self::new(GeoPoint {
            lat: lat0,
            lng: lng0,
        }))
    }

    /// Geographic origin of the frame
    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// Project geographic coordinates to planar meters (east, north)
    pub fn project(&self, lat: f64, lng: f64) -> (f64, f64) {
        let x = (lng - self.origin.lng) * DEG_TO_RAD * self.cos_lat0 * EARTH_RADIUS_M;
        let y = (lat - self.origin.lat) * DEG_TO_RAD * EARTH_RADIUS_M;
        (x, y)
    }

    /// Invert the projection back to geographic coordinates
    pub fn unproject(&self, x: f64, y: f64) -> GeoPoint {
        GeoPoint {
            lat: self.origin.lat + y / (DEG_TO_RAD * EARTH_RADIUS_M),
            lng: self.origin.lng + x / (DEG_TO_RAD * self.cos_lat0 * EARTH_RADIUS_M),
        }
    }

    /// Project a beacon, carrying its measurement data along
    pub fn project_beacon(&self, beacon: &Beacon) -> PlanarBeacon {
        let (x, y) = self.project(beacon.lat, beacon.lng);
        PlanarBeacon {
            x,
            y,
            distance: beacon.distance,
            weight: beacon.weight,
        }
    }
}

/// Project a beacon set onto the plane centered at its centroid.
///
/// Fails with `InsufficientBeacons` on an empty list; pure otherwise.
pub fn project(beacons: &[Beacon]) -> Result<(Vec<PlanarBeacon>, PlanarFrame), EngineError> {
    let frame = PlanarFrame::for_beacons(beacons)?;
    let planar = beacons.iter().map(|b| frame.project_beacon(b)).collect();
    Ok((planar, frame))
}
