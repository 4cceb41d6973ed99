/// Earth's mean radius in feet (6371 km)
pub const EARTH_RADIUS_FT: f64 = 20_902_231.52;

/// Feet in one meter
pub const FEET_PER_METER: f64 = 3.28084;

/// Calculate the Haversine distance between two points in feet
///
/// Spherical approximation, good to roughly 0.5% against the ellipsoid.
/// Used as the scoring metric for nearest-match search.
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in feet
#[inline]
pub fn haversine_distance_feet(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lon1_rad = lon1.to_radians();
    let lat2_rad = lat2.to_radians();
    let lon2_rad = lon2.to_radians();

    let delta_lat = lat2_rad - lat1_rad;
    let delta_lon = lon2_rad - lon1_rad;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_FT * c
}

/// Convert a distance in meters to feet
#[inline]
pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point_is_zero() {
        let distance = haversine_distance_feet(37.7749, -122.4194, 37.7749, -122.4194);
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_haversine_short_distance() {
        // Two survey shots roughly 4.6 ft apart
        let distance = haversine_distance_feet(37.7749, -122.4194, 37.77491, -122.41939);
        assert!(distance > 4.0 && distance < 5.0, "Distance should be ~4.65ft, got {}", distance);
    }

    #[test]
    fn test_haversine_new_york_to_los_angeles() {
        // ~3936 km, ~12.9 million feet
        let distance = haversine_distance_feet(40.7128, -74.0060, 34.0522, -118.2437);
        assert!(
            (distance - 12_912_553.0).abs() < 1_000.0,
            "Distance should be ~12.9M ft, got {}",
            distance
        );
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let forward = haversine_distance_feet(51.5074, -0.1278, 48.8566, 2.3522);
        let reverse = haversine_distance_feet(48.8566, 2.3522, 51.5074, -0.1278);
        assert!((forward - reverse).abs() < 1e-6);
    }

    #[test]
    fn test_meters_to_feet() {
        assert_eq!(meters_to_feet(0.0), 0.0);
        assert!((meters_to_feet(1000.0) - 3280.84).abs() < 1e-9);
    }
}
