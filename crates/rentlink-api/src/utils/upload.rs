//! Multipart parsing for the upload endpoint

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};
use rentlink_core::models::{DocType, DocumentMime};
use rentlink_core::AppError;

use crate::services::upload::{UploadRequest, UploadedFile};

pub const FIELD_FILE: &str = "file";
pub const FIELD_DOC_TYPE: &str = "docType";
pub const FIELD_NAME: &str = "nome";
pub const FIELD_CAR: &str = "carro";

/// Upper bound for each text field (`docType`, `nome`, `carro`).
pub const MAX_TEXT_FIELD_BYTES: usize = 4 * 1024;

/// Map a multipart read failure. Hitting the transport body limit is
/// reported as `FileTooLarge`; the exact size is unknown at that point, so
/// the upload limit plus one is used.
fn multipart_error(err: MultipartError, max_upload_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge {
            size: max_upload_bytes.saturating_add(1),
            max_mb: max_upload_bytes / 1024 / 1024,
        }
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}

enum Capped {
    Within(Bytes),
    /// Reading stopped after this many bytes, which is over the cap.
    Exceeded(usize),
}

/// Read a field chunk by chunk, stopping as soon as more than `cap` bytes
/// have arrived.
async fn read_capped(field: &mut Field<'_>, cap: usize) -> Result<Capped, MultipartError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.chunk().await? {
        buf.extend_from_slice(&chunk);
        if buf.len() > cap {
            return Ok(Capped::Exceeded(buf.len()));
        }
    }
    Ok(Capped::Within(buf.freeze()))
}

async fn read_text(
    field: &mut Field<'_>,
    field_name: &str,
    max_upload_bytes: usize,
) -> Result<String, AppError> {
    match read_capped(field, MAX_TEXT_FIELD_BYTES)
        .await
        .map_err(|e| multipart_error(e, max_upload_bytes))?
    {
        Capped::Within(data) => String::from_utf8(data.to_vec()).map_err(|_| {
            AppError::InvalidInput(format!("Campo '{}' não é texto UTF-8 válido.", field_name))
        }),
        Capped::Exceeded(_) => Err(AppError::InvalidInput(format!(
            "Campo '{}' muito longo (máx. {} bytes).",
            field_name, MAX_TEXT_FIELD_BYTES
        ))),
    }
}

/// Parse the upload form into an `UploadRequest`.
///
/// A `file` field only counts as a file when it carries a filename. Its
/// declared type is checked from the part headers before any content is read,
/// and the content is read only up to the upload limit, so an unsupported
/// type is reported ahead of an oversized one. Only one file is accepted.
/// Unknown fields are ignored; `docType` falls back to `doc`.
pub async fn extract_upload_request(
    mut multipart: Multipart,
    max_upload_bytes: usize,
) -> Result<UploadRequest, AppError> {
    let mut request = UploadRequest::default();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_upload_bytes))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            FIELD_FILE => {
                if field.file_name().is_none() {
                    tracing::debug!("Ignoring non-file value in 'file' field");
                    continue;
                }
                if request.file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }

                let declared = field.content_type().unwrap_or_default().to_string();
                if DocumentMime::from_declared(&declared).is_none() {
                    return Err(AppError::UnsupportedFormat(declared));
                }

                let data = match read_capped(&mut field, max_upload_bytes)
                    .await
                    .map_err(|e| multipart_error(e, max_upload_bytes))?
                {
                    Capped::Within(data) => data,
                    Capped::Exceeded(size) => {
                        return Err(AppError::FileTooLarge {
                            size,
                            max_mb: max_upload_bytes / 1024 / 1024,
                        });
                    }
                };

                request.file = Some(UploadedFile {
                    data,
                    content_type: Some(declared),
                });
            }
            FIELD_DOC_TYPE => {
                let raw = read_text(&mut field, FIELD_DOC_TYPE, max_upload_bytes).await?;
                request.doc_type = DocType::parse_lenient(&raw);
            }
            FIELD_NAME => {
                request.name = read_text(&mut field, FIELD_NAME, max_upload_bytes).await?;
            }
            FIELD_CAR => {
                request.car_label = read_text(&mut field, FIELD_CAR, max_upload_bytes).await?;
            }
            _ => {}
        }
    }

    Ok(request)
}
