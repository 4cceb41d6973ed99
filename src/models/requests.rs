use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::core::{ColumnKeys, DEFAULT_MAX_DISTANCE_FT};
use crate::models::domain::GeoPoint;
use crate::models::record::Record;

/// Request to pair every base record with its closest comparison record
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GpsTriangulateRequest {
    #[validate(length(min = 1, message = "BaseData is required and cannot be empty."))]
    #[serde(alias = "base_data", rename = "baseData", default)]
    pub base_data: Vec<Record>,
    #[validate(length(min = 1, message = "ComparisonData is required and cannot be empty."))]
    #[serde(alias = "comparison_data", rename = "comparisonData", default)]
    pub comparison_data: Vec<Record>,
    #[validate(custom(
        function = "not_blank",
        message = "BaseLatColumn is required and cannot be empty."
    ))]
    #[serde(
        alias = "base_lat_column",
        rename = "baseLatColumn",
        default = "default_lat_column"
    )]
    pub base_lat_column: String,
    #[validate(custom(
        function = "not_blank",
        message = "BaseLonColumn is required and cannot be empty."
    ))]
    #[serde(
        alias = "base_lon_column",
        rename = "baseLonColumn",
        default = "default_lon_column"
    )]
    pub base_lon_column: String,
    #[validate(custom(
        function = "not_blank",
        message = "TargetLatColumn is required and cannot be empty."
    ))]
    #[serde(
        alias = "target_lat_column",
        rename = "targetLatColumn",
        default = "default_lat_column"
    )]
    pub target_lat_column: String,
    #[validate(custom(
        function = "not_blank",
        message = "TargetLonColumn is required and cannot be empty."
    ))]
    #[serde(
        alias = "target_lon_column",
        rename = "targetLonColumn",
        default = "default_lon_column"
    )]
    pub target_lon_column: String,
    #[validate(range(exclusive_min = 0.0, message = "MaxDistance must be greater than zero."))]
    #[serde(alias = "max_distance", rename = "maxDistance", default = "default_max_distance")]
    pub max_distance: f64,
}

impl GpsTriangulateRequest {
    /// Request with the default column names and radius
    pub fn new(base_data: Vec<Record>, comparison_data: Vec<Record>) -> Self {
        Self {
            base_data,
            comparison_data,
            base_lat_column: default_lat_column(),
            base_lon_column: default_lon_column(),
            target_lat_column: default_lat_column(),
            target_lon_column: default_lon_column(),
            max_distance: default_max_distance(),
        }
    }

    pub fn column_keys(&self) -> ColumnKeys {
        ColumnKeys {
            base_lat: self.base_lat_column.clone(),
            base_lon: self.base_lon_column.clone(),
            target_lat: self.target_lat_column.clone(),
            target_lon: self.target_lon_column.clone(),
        }
    }
}

fn default_lat_column() -> String {
    "lat".to_string()
}

fn default_lon_column() -> String {
    "lon".to_string()
}

fn default_max_distance() -> f64 {
    DEFAULT_MAX_DISTANCE_FT
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Request for the ellipsoidal distance between two points
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DistanceBetweenPointsRequest {
    #[validate(
        required(message = "Point1 cannot be null"),
        custom(
            function = "point_in_range",
            message = "Point1 must have latitude in [-90, 90] and longitude in [-180, 180]."
        )
    )]
    #[serde(alias = "point_1", rename = "point1", default)]
    pub point1: Option<GeoPoint>,
    #[validate(
        required(message = "Point2 cannot be null"),
        custom(
            function = "point_in_range",
            message = "Point2 must have latitude in [-90, 90] and longitude in [-180, 180]."
        )
    )]
    #[serde(alias = "point_2", rename = "point2", default)]
    pub point2: Option<GeoPoint>,
}

fn point_in_range(point: &GeoPoint) -> Result<(), ValidationError> {
    if !point.is_in_range() {
        return Err(ValidationError::new("range"));
    }
    Ok(())
}

/// Flatten every violation, including nested ones, into a sorted list of messages
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    collect_messages(errors, &mut messages);
    messages.sort();
    messages
}

fn collect_messages(errors: &ValidationErrors, messages: &mut Vec<String>) {
    for kind in errors.errors().values() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                messages.extend(field_errors.iter().map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, messages),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, messages);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_record(lat: f64, lon: f64) -> Record {
        Record::new().with("lat", lat).with("lon", lon)
    }

    #[test]
    fn test_defaults_applied() {
        let request: GpsTriangulateRequest = serde_json::from_str(
            r#"{"baseData":[{"lat":37.7749,"lon":-122.4194}],
                "comparisonData":[{"lat":37.775,"lon":-122.4193}]}"#,
        )
        .unwrap();

        assert_eq!(request.base_lat_column, "lat");
        assert_eq!(request.base_lon_column, "lon");
        assert_eq!(request.target_lat_column, "lat");
        assert_eq!(request.target_lon_column, "lon");
        assert_eq!(request.max_distance, 15.0);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_collects_all_violations() {
        let mut request =
            GpsTriangulateRequest::new(vec![], vec![point_record(37.7749, -122.4194)]);
        request.max_distance = 0.0;
        request.target_lon_column = "   ".to_string();

        let errors = request.validate().unwrap_err();
        let messages = validation_messages(&errors);

        assert_eq!(
            messages,
            vec![
                "BaseData is required and cannot be empty.",
                "MaxDistance must be greater than zero.",
                "TargetLonColumn is required and cannot be empty.",
            ]
        );
    }

    #[test]
    fn test_missing_lists_reported() {
        let request: GpsTriangulateRequest = serde_json::from_str("{}").unwrap();
        let messages = validation_messages(&request.validate().unwrap_err());

        assert_eq!(messages.len(), 2);
        assert!(messages.iter().any(|m| m.contains("BaseData")));
        assert!(messages.iter().any(|m| m.contains("ComparisonData")));
    }

    #[test]
    fn test_missing_points_reported() {
        let request: DistanceBetweenPointsRequest = serde_json::from_str("{}").unwrap();
        let messages = validation_messages(&request.validate().unwrap_err());

        assert_eq!(messages, vec!["Point1 cannot be null", "Point2 cannot be null"]);
    }

    #[test]
    fn test_out_of_range_point_reported() {
        let request = DistanceBetweenPointsRequest {
            point1: Some(GeoPoint::new(95.0, 0.0)),
            point2: Some(GeoPoint::new(0.0, 0.0)),
        };
        let messages = validation_messages(&request.validate().unwrap_err());

        assert_eq!(
            messages,
            vec!["Point1 must have latitude in [-90, 90] and longitude in [-180, 180]."]
        );
    }

    #[test]
    fn test_both_points_out_of_range_reported() {
        let request = DistanceBetweenPointsRequest {
            point1: Some(GeoPoint::new(0.0, 180.5)),
            point2: Some(GeoPoint::new(-90.5, 0.0)),
        };
        let messages = validation_messages(&request.validate().unwrap_err());

        assert_eq!(messages.len(), 2);
        assert!(messages[0].starts_with("Point1"));
        assert!(messages[1].starts_with("Point2"));
    }

    #[test]
    fn test_points_on_the_boundary_are_valid() {
        let request = DistanceBetweenPointsRequest {
            point1: Some(GeoPoint::new(90.0, -180.0)),
            point2: Some(GeoPoint::new(-90.0, 180.0)),
        };

        assert!(request.validate().is_ok());
    }
}
