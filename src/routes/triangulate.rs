use actix_web::{web, HttpResponse, Responder};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::config::Settings;
use crate::core::{GeodesicSolver, MatchError, NearestMatcher};
use crate::models::{
    sample_request, validation_messages, DistanceBetweenPointsRequest, ErrorResponse,
    GpsTriangulateRequest, HealthResponse,
};

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub solver: GeodesicSolver,
    pub diagnostics: bool,
}

impl AppState {
    pub fn new(solver: GeodesicSolver, diagnostics: bool) -> Self {
        Self { solver, diagnostics }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            GeodesicSolver::new(settings.geodesic.max_iterations),
            settings.diagnostics.is_development(),
        )
    }
}

#[derive(Debug, Error)]
enum TriangulateError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configure all /api routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/GpsTriangulate", web::post().to(gps_triangulate))
        .route("/DistanceBetweenPoints", web::post().to(distance_between_points))
        .route("/sample", web::get().to(sample));
}

pub(crate) async fn index() -> impl Responder {
    HttpResponse::Ok().body("Hello GpsTriangulation!")
}

/// Health check endpoint
pub(crate) async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

fn validation_failed(messages: Vec<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(
        "Validation failed",
        messages.join("\n"),
        400,
    ))
}

/// Nearest-station matching endpoint
///
/// POST /api/GpsTriangulate
///
/// Request body:
/// ```json
/// {
///   "baseData": [{ "id": 1, "lat": 37.7749, "lon": -122.4194 }],
///   "comparisonData": [{ "station_id": "STA-100", "lat": 37.77491, "lon": -122.41939 }],
///   "baseLatColumn": "lat",
///   "baseLonColumn": "lon",
///   "targetLatColumn": "lat",
///   "targetLonColumn": "lon",
///   "maxDistance": 15
/// }
/// ```
async fn gps_triangulate(req: web::Json<GpsTriangulateRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        let messages = validation_messages(&errors);
        tracing::info!("Validation failed for GpsTriangulate request: {:?}", messages);
        return validation_failed(messages);
    }

    let request = req.into_inner();
    let run_id = Uuid::new_v4();

    // O(n·m) scan, kept off the async workers
    let result = web::block(move || {
        let _span = tracing::info_span!("gps_triangulate", %run_id).entered();

        tracing::info!(
            "Matching {} base records against {} comparison records within {}ft",
            request.base_data.len(),
            request.comparison_data.len(),
            request.max_distance
        );

        let matcher = NearestMatcher::new(request.max_distance);
        let pairs = matcher.find_closest(
            &request.base_data,
            &request.comparison_data,
            &request.column_keys(),
        )?;

        let matched = pairs.iter().filter(|p| p.is_matched()).count();
        tracing::info!("Matched {} of {} base records", matched, pairs.len());

        Ok::<_, TriangulateError>(serde_json::to_value(&pairs)?)
    })
    .await;

    match result {
        Ok(Ok(pairs)) => HttpResponse::Ok().json(pairs),
        Ok(Err(TriangulateError::Match(e))) => {
            tracing::warn!("Triangulation run {} rejected: {}", run_id, e);
            HttpResponse::BadRequest().json(ErrorResponse::new(
                "Invalid record",
                e.to_string(),
                400,
            ))
        }
        Ok(Err(e)) => {
            tracing::error!("Triangulation run {} failed: {}", run_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Failed to build response",
                e.to_string(),
                500,
            ))
        }
        Err(e) => {
            tracing::error!("Triangulation run {} could not be scheduled: {}", run_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Triangulation unavailable",
                e.to_string(),
                500,
            ))
        }
    }
}

/// Point-to-point distance endpoint
///
/// POST /api/DistanceBetweenPoints
///
/// Request body:
/// ```json
/// {
///   "point1": { "latitude": 37.7749, "longitude": -122.4194 },
///   "point2": { "latitude": 34.0522, "longitude": -118.2437 }
/// }
/// ```
///
/// Responds with the ellipsoidal distance in feet as a bare JSON number.
async fn distance_between_points(
    state: web::Data<AppState>,
    req: web::Json<DistanceBetweenPointsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        let messages = validation_messages(&errors);
        tracing::info!("Validation failed for DistanceBetweenPoints request: {:?}", messages);
        return validation_failed(messages);
    }

    let (Some(point1), Some(point2)) = (req.point1, req.point2) else {
        return validation_failed(vec!["Both points are required".to_string()]);
    };

    match state.solver.distance_feet(point1, point2) {
        Ok(distance) => {
            tracing::debug!("Distance {:?} -> {:?}: {}ft", point1, point2, distance);
            HttpResponse::Ok().json(distance)
        }
        Err(e) => {
            tracing::warn!("Distance {:?} -> {:?} not computed: {}", point1, point2, e);
            HttpResponse::UnprocessableEntity().json(ErrorResponse::new(
                "Geodesic solver did not converge",
                e.to_string(),
                422,
            ))
        }
    }
}

/// Development-only sample request
///
/// GET /api/sample
async fn sample(state: web::Data<AppState>) -> impl Responder {
    if !state.diagnostics {
        return HttpResponse::NotFound().json(ErrorResponse::new(
            "Not found",
            "Sample data is only available in development",
            404,
        ));
    }

    tracing::info!("Serving sample triangulation request");
    HttpResponse::Ok().json(sample_request())
}
