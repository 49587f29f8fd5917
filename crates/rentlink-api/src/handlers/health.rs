use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use utoipa::ToSchema;

const TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub storage: String,
    pub backend: String,
}

/// Liveness probe - always 200 while the process can respond
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Process is alive"))
)]
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "alive"
        })),
    )
}

/// Readiness probe - checks the bucket is reachable
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Storage reachable", body = ReadinessResponse),
        (status = 503, description = "Storage unreachable", body = ReadinessResponse)
    )
)]
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut response = ReadinessResponse {
        status: "ready".to_string(),
        storage: "unknown".to_string(),
        backend: state.storage.backend_type().to_string(),
    };

    let ready = match tokio::time::timeout(TIMEOUT, state.storage.health_check()).await {
        Ok(Ok(())) => {
            response.storage = "ready".to_string();
            true
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Storage readiness check failed");
            response.storage = format!("not_ready: {}", e);
            false
        }
        Err(_) => {
            tracing::error!("Storage readiness check timed out");
            response.storage = "timeout".to_string();
            false
        }
    };

    let status_code = if ready {
        StatusCode::OK
    } else {
        response.status = "not_ready".to_string();
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
