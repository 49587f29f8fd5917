use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_upload_request;
use axum::{
    extract::{Multipart, State},
    Json,
};
use rentlink_core::models::UploadResponse;
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "uploads",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "Fields: file (required), docType (cpf|cnh|doc), nome, carro"
    ),
    responses(
        (status = 200, description = "Document stored and presigned", body = UploadResponse),
        (status = 400, description = "Missing file, unsupported format or file too large", body = ErrorResponse),
        (status = 500, description = "Store failure or short code exhaustion", body = ErrorResponse)
    )
)]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let request = extract_upload_request(multipart, state.config.max_upload_bytes).await?;
    let response = state.uploads.accept_upload(request).await?;
    Ok(Json(response))
}
