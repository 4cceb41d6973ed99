//! GPS Triangulation - nearest-point matching and geodesic distances for survey data
//!
//! This library pairs survey shots with their closest reference station using
//! Haversine distances, and solves point-to-point distances on the WGS-84
//! ellipsoid with Vincenty's inverse formula.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{
    haversine_distance_feet, vincenty_inverse, ColumnKeys, GeodesicError, GeodesicSolver,
    MatchError, NearestMatcher,
};
pub use crate::models::{FieldError, FieldValue, GeoPoint, GeodesicResult, MatchedPair, Record};
