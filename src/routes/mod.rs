// Route exports
pub mod triangulate;

pub use triangulate::AppState;

use actix_web::{error, http::StatusCode, web, HttpResponse};

use crate::models::ErrorResponse;

/// Error body returned when the JSON extractor rejects a payload
#[derive(Debug)]
pub struct JsonError(pub ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError(ErrorResponse::new(
        "invalid_json",
        format!("Invalid JSON: {}", err),
        StatusCode::BAD_REQUEST.as_u16(),
    ))
    .into()
}

/// JSON extractor config with the service's error body
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(triangulate::index))
        .route("/health", web::get().to(triangulate::health_check))
        .service(web::scope("/api").configure(triangulate::configure));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_payload_error_uses_error_response_body() {
        let req = TestRequest::default().to_http_request();
        let err = handle_json_payload_error(error::JsonPayloadError::ContentType, &req);

        assert_eq!(err.as_response_error().status_code(), StatusCode::BAD_REQUEST);

        let json_error = err.as_error::<JsonError>().unwrap();
        assert_eq!(json_error.0.error, "invalid_json");
        assert_eq!(json_error.0.status_code, 400);
        assert!(json_error.0.message.starts_with("Invalid JSON: "));
    }
}
