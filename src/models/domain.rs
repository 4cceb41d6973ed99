use serde::{Deserialize, Serialize};

use crate::core::distance::meters_to_feet;
use crate::models::record::Record;

/// Which coordinate axis a value lies on, and its valid range in degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Axis::Latitude => (-90.0, 90.0),
            Axis::Longitude => (-180.0, 180.0),
        }
    }

    pub fn contains(self, value: f64) -> bool {
        let (min, max) = self.bounds();
        (min..=max).contains(&value)
    }
}

/// A geographic point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether the point lies on the valid latitude/longitude grid
    pub fn is_in_range(&self) -> bool {
        Axis::Latitude.contains(self.latitude) && Axis::Longitude.contains(self.longitude)
    }
}

/// Result of an ellipsoidal distance solve
///
/// Bearings are in degrees from true north. Both are zero when the
/// two input points coincide.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeodesicResult {
    #[serde(rename = "distance")]
    pub distance_meters: f64,
    #[serde(rename = "initialBearing")]
    pub initial_bearing: f64,
    #[serde(rename = "finalBearing")]
    pub final_bearing: f64,
}

impl GeodesicResult {
    pub fn distance_feet(&self) -> f64 {
        meters_to_feet(self.distance_meters)
    }
}

/// A base record paired with its closest comparison record, if any
///
/// `closest_comparison` and `distance_in_feet` are either both set or both
/// absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPair<'a> {
    #[serde(rename = "baseRecord")]
    pub base_record: &'a Record,
    #[serde(rename = "closestComparison")]
    pub closest_comparison: Option<&'a Record>,
    #[serde(rename = "distanceInFeet")]
    pub distance_in_feet: Option<f64>,
}

impl MatchedPair<'_> {
    pub fn is_matched(&self) -> bool {
        self.closest_comparison.is_some()
    }
}
