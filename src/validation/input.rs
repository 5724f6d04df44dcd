//! Per-beacon range and finiteness checks

use crate::core::Beacon;
use crate::validation::error::{EngineError, InputField};

/// Validate every beacon in a computation's input snapshot.
///
/// Returns the first violation found; a rejected list produces no
/// partial result. An empty list passes here; the projector owns that
/// check because it is the component that cannot proceed without data.
pub fn validate_beacons(beacons: &[Beacon]) -> Result<(), EngineError> {
    for beacon in beacons {
        validate_beacon(beacon)?;
    }
    Ok(())
}

fn validate_beacon(beacon: &Beacon) -> Result<(), EngineError> {
    check(beacon, InputField::Latitude, beacon.lat, |v| {
        (-90.0..=90.0).contains(&v)
    })?;
    check(beacon, InputField::Longitude, beacon.lng, |v| {
        (-180.0..=180.0).contains(&v)
    })?;
    check(beacon, InputField::Distance, beacon.distance, |v| v >= 0.0)?;
    check(beacon, InputField::Weight, beacon.weight, |v| v > 0.0)?;
    Ok(())
}

fn check(
    beacon: &Beacon,
    field: InputField,
    value: f64,
    in_range: impl Fn(f64) -> bool,
) -> Result<(), EngineError> {
    if !value.is_finite() || !in_range(value) {
        return Err(EngineError::InvalidInput {
            beacon_id: beacon.id.clone(),
            field,
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_beacons_pass() {
        let beacons = vec![
            Beacon::new("1", 47.0, 11.0, 50.0),
            Beacon::with_weight("2", -12.5, -77.0, 0.0, 2.5),
        ];
        assert!(validate_beacons(&beacons).is_ok());
    }

    #[test]
    fn test_negative_distance_rejected() {
        let beacons = vec![Beacon::new("1", 10.0, 10.0, -1.0)];
        let error = validate_beacons(&beacons).unwrap_err();
        assert_eq!(
            error,
            EngineError::InvalidInput {
                beacon_id: "1".to_string(),
                field: InputField::Distance,
                value: -1.0,
            }
        );
    }

    #[test]
    fn test_nan_coordinate_rejected() {
        let beacons = vec![Beacon::new("1", f64::NAN, 10.0, 5.0)];
        let error = validate_beacons(&beacons).unwrap_err();
        assert!(matches!(
            error,
            EngineError::InvalidInput {
                field: InputField::Latitude,
                ..
            }
        ));
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let too_far_north = vec![Beacon::new("1", 90.5, 0.0, 5.0)];
        assert!(validate_beacons(&too_far_north).is_err());

        let wrapped_longitude = vec![Beacon::new("1", 0.0, 181.0, 5.0)];
        assert!(validate_beacons(&wrapped_longitude).is_err());
    }

    #[test]
    fn test_non_positive_weight_rejected() {
        let zero_weight = vec![Beacon::with_weight("1", 0.0, 0.0, 5.0, 0.0)];
        assert!(matches!(
            validate_beacons(&zero_weight).unwrap_err(),
            EngineError::InvalidInput {
                field: InputField::Weight,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_list_passes_validation() {
        assert!(validate_beacons(&[]).is_ok());
    }
}
