use crate::error::ErrorResponse;
use crate::services::{Resolution, ResolveFailure};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::{
        header::{CACHE_CONTROL, LOCATION},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use rentlink_core::ShortLinkErrorStyle;
use std::sync::Arc;

fn redirect(location: &str) -> Option<Response> {
    let location = HeaderValue::from_str(location).ok()?;
    Some(
        (
            StatusCode::FOUND,
            [
                (LOCATION, location),
                (CACHE_CONTROL, HeaderValue::from_static("no-store")),
            ],
        )
            .into_response(),
    )
}

fn failure_response(failure: ResolveFailure, style: ShortLinkErrorStyle, fallback: &str) -> Response {
    match style {
        ShortLinkErrorStyle::Redirect => redirect(fallback).unwrap_or_else(|| {
            tracing::error!(fallback = %fallback, "Fallback URL is not a valid Location header");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }),
        ShortLinkErrorStyle::Json => {
            ErrorResponse::new(failure.message(), failure.status_code())
                .with_code(failure.code())
                .into_response()
        }
    }
}

/// Turn a resolution into the HTTP answer for the configured error style.
pub fn short_link_response(
    resolution: Resolution,
    style: ShortLinkErrorStyle,
    fallback: &str,
) -> Response {
    match resolution {
        Resolution::Redirect(url) => redirect(&url).unwrap_or_else(|| {
            tracing::warn!("Stored URL is not a valid Location header");
            failure_response(ResolveFailure::Malformed, style, fallback)
        }),
        Resolution::Fallback(failure) => failure_response(failure, style, fallback),
    }
}

#[utoipa::path(
    get,
    path = "/d/{code}",
    tag = "short-links",
    params(("code" = String, Path, description = "Short code")),
    responses(
        (status = 302, description = "Redirect to the presigned URL, or to the fallback location on any failure"),
        (status = 400, description = "Empty code (JSON error style only)", body = ErrorResponse),
        (status = 404, description = "Unknown or malformed link (JSON error style only)", body = ErrorResponse),
        (status = 410, description = "Expired link (JSON error style only)", body = ErrorResponse),
        (status = 500, description = "Store failure (JSON error style only)", body = ErrorResponse)
    )
)]
pub async fn resolve_short_link(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Response {
    let resolution = state.short_links.resolve(&code).await;
    short_link_response(
        resolution,
        state.config.short_link_error_style,
        &state.config.short_link_fallback_url,
    )
}

/// `/d/` with nothing after it.
pub async fn resolve_missing_code(State(state): State<Arc<AppState>>) -> Response {
    short_link_response(
        Resolution::Fallback(ResolveFailure::EmptyCode),
        state.config.short_link_error_style,
        &state.config.short_link_fallback_url,
    )
}
