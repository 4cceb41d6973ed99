//! Sample survey run served by the development diagnostics endpoint.

use crate::models::record::Record;
use crate::models::requests::GpsTriangulateRequest;

const BASE_POINTS: &[(i64, f64, f64)] = &[
    (1, 37.7749, -122.4194),
    (2, 37.7750, -122.4193),
    (3, 37.7747, -122.4191),
    (4, 37.7755, -122.4188),
    (5, 37.7760, -122.4175),
];

const STATIONS: &[(&str, f64, f64, &str)] = &[
    ("STA-100", 37.77491, -122.41939, "Station Alpha"),
    ("STA-200", 37.7750, -122.4195, "Station Bravo"),
    ("STA-300", 37.7746, -122.4190, "Station Charlie"),
    ("STA-400", 37.7755, -122.4188, "Station Delta"),
    ("STA-500", 37.7800, -122.4100, "Station Echo"),
];

/// Build the sample request: five base shots against five stations
pub fn sample_request() -> GpsTriangulateRequest {
    let base_data = BASE_POINTS
        .iter()
        .map(|&(id, lat, lon)| {
            Record::new()
                .with("id", id)
                .with("base_latitude", lat)
                .with("base_longitude", lon)
        })
        .collect();

    let comparison_data = STATIONS
        .iter()
        .map(|&(station_id, lat, lon, stationing)| {
            Record::new()
                .with("station_id", station_id)
                .with("target_latitude", lat)
                .with("target_longitude", lon)
                .with("stationing", stationing)
        })
        .collect();

    GpsTriangulateRequest {
        base_lat_column: "base_latitude".to_string(),
        base_lon_column: "base_longitude".to_string(),
        target_lat_column: "target_latitude".to_string(),
        target_lon_column: "target_longitude".to_string(),
        ..GpsTriangulateRequest::new(base_data, comparison_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NearestMatcher;
    use crate::models::FieldValue;
    use validator::Validate;

    #[test]
    fn test_sample_is_valid() {
        let request = sample_request();
        assert!(request.validate().is_ok());
        assert_eq!(request.base_data.len(), 5);
        assert_eq!(request.comparison_data.len(), 5);
    }

    #[test]
    fn test_sample_matches() {
        let request = sample_request();
        let matcher = NearestMatcher::new(request.max_distance);
        let pairs = matcher
            .find_closest(&request.base_data, &request.comparison_data, &request.column_keys())
            .unwrap();

        let stations: Vec<Option<&FieldValue>> = pairs
            .iter()
            .map(|p| p.closest_comparison.and_then(|r| r.get("station_id")))
            .collect();

        assert_eq!(
            stations,
            vec![
                Some(&FieldValue::from("STA-100")),
                None,
                None,
                Some(&FieldValue::from("STA-400")),
                None,
            ]
        );
        assert_eq!(pairs[3].distance_in_feet, Some(0.0));
    }
}
