// Model exports
pub mod domain;
pub mod record;
pub mod requests;
pub mod responses;
pub mod sample;

pub use domain::{Axis, GeoPoint, GeodesicResult, MatchedPair};
pub use record::{FieldError, FieldValue, Record};
pub use requests::{validation_messages, DistanceBetweenPointsRequest, GpsTriangulateRequest};
pub use responses::{ErrorResponse, HealthResponse};
pub use sample::sample_request;
