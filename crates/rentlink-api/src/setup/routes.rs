//! Route configuration and setup

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use rentlink_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and the text fields around the file.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// The transport ceiling is this many times the upload limit. File and text
/// field limits are enforced while parsing; the ceiling only bounds how much
/// a single request may push at the server.
pub const BODY_LIMIT_FACTOR: usize = 4;

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let body_limit = config
        .max_upload_bytes
        .saturating_mul(BODY_LIMIT_FACTOR)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    tracing::info!(
        max_upload_mb = config.max_upload_mb(),
        body_limit_bytes = body_limit,
        http_concurrency_limit = config.http_concurrency_limit(),
        short_links_enabled = config.short_links_enabled,
        short_link_error_style = ?config.short_link_error_style,
        "Routes configured"
    );

    let app = Router::new()
        .route("/api/upload", post(handlers::upload::upload_document))
        .route("/d/{code}", get(handlers::short_link::resolve_short_link))
        .route("/d/", get(handlers::short_link::resolve_missing_code))
        .route("/health", get(handlers::health::liveness_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(ConcurrencyLimitLayer::new(config.http_concurrency_limit()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
