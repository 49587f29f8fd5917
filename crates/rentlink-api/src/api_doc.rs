//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use rentlink_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rentlink API",
        version = "0.1.0",
        description = "Identity document uploads for car-rental reservations. Documents are stored privately in an S3-compatible bucket and shared through presigned URLs, optionally behind short links served at /d/{code}."
    ),
    paths(
        handlers::upload::upload_document,
        handlers::short_link::resolve_short_link,
        handlers::health::liveness_check,
        handlers::health::readiness_check,
    ),
    components(schemas(
        models::UploadResponse,
        models::DocType,
        error::ErrorResponse,
        handlers::health::ReadinessResponse,
    )),
    tags(
        (name = "uploads", description = "Document upload"),
        (name = "short-links", description = "Short-link redirection"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_lists_public_paths() {
        let spec = get_openapi_spec();
        for path in ["/api/upload", "/d/{code}", "/health", "/health/ready"] {
            assert!(spec.paths.paths.contains_key(path), "{path}");
        }
    }
}
