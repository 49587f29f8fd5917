use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use chrono::{DateTime, NaiveDate, Utc};
use rentlink_core::models::{DocType, DocumentMime, ShortLinkDescriptor, UploadResponse};
use rentlink_core::validation::sanitize_upper;
use rentlink_core::{AppError, Config};
use rentlink_storage::keys::{document_key, short_link_key};
use rentlink_storage::{PutOptions, ResponseOverrides, Storage};
use uuid::Uuid;

use super::types::UploadRequest;
use crate::services::short_code::ShortCodeMinter;

const DESCRIPTOR_CONTENT_TYPE: &str = "application/json";
const DESCRIPTOR_CACHE_CONTROL: &str = "no-store";
const ANONYMOUS_CUSTOMER: &str = "CLIENTE";

/// The part of `Config` the upload flow needs.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub max_upload_bytes: usize,
    pub presign_expires: Duration,
    pub short_links_enabled: bool,
    pub short_code_len: usize,
    /// No trailing slash
    pub public_base_url: Option<String>,
}

impl UploadSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_upload_bytes: config.max_upload_bytes,
            presign_expires: Duration::from_secs(config.presign_expires_secs),
            short_links_enabled: config.short_links_enabled,
            short_code_len: config.short_code_len,
            public_base_url: config.public_base_url.clone(),
        }
    }

    fn max_upload_mb(&self) -> usize {
        self.max_upload_bytes / 1024 / 1024
    }
}

/// Friendly attachment name, e.g. `CPF-JOAO-SILVA-2026-01-13.pdf`.
pub fn download_filename(doc_type: DocType, name: &str, date: NaiveDate, ext: &str) -> String {
    let person = sanitize_upper(name);
    let person = if person.is_empty() {
        ANONYMOUS_CUSTOMER.to_string()
    } else {
        person
    };
    format!(
        "{}-{}-{}.{}",
        doc_type.label(),
        person,
        date.format("%Y-%m-%d"),
        ext
    )
}

/// Accepts identity documents for a reservation.
///
/// Each call is independent: a retry creates a new key because of the UUID
/// component.
#[derive(Clone)]
pub struct DocumentUploadService {
    storage: Arc<dyn Storage>,
    minter: ShortCodeMinter,
    settings: UploadSettings,
}

impl DocumentUploadService {
    pub fn new(storage: Arc<dyn Storage>, settings: UploadSettings) -> Self {
        let minter = ShortCodeMinter::new(storage.clone(), settings.short_code_len);
        Self {
            storage,
            minter,
            settings,
        }
    }

    pub async fn accept_upload(&self, request: UploadRequest) -> Result<UploadResponse, AppError> {
        self.accept_upload_at(request, Utc::now()).await
    }

    /// Validate, store, presign and optionally publish a short link, as of
    /// `now`. Validation order: missing file, declared type, size.
    pub async fn accept_upload_at(
        &self,
        request: UploadRequest,
        now: DateTime<Utc>,
    ) -> Result<UploadResponse, AppError> {
        let start = Instant::now();

        let file = request.file.ok_or(AppError::MissingFile)?;
        let declared = file.content_type.clone().unwrap_or_default();
        let mime = DocumentMime::from_declared(&declared)
            .ok_or_else(|| AppError::UnsupportedFormat(declared.clone()))?;
        let size = file.size();
        if size > self.settings.max_upload_bytes {
            return Err(AppError::FileTooLarge {
                size,
                max_mb: self.settings.max_upload_mb(),
            });
        }

        let date = now.date_naive();
        let ext = mime.extension();
        let key = document_key(
            date,
            request.doc_type,
            Uuid::new_v4(),
            &request.name,
            &request.car_label,
            ext,
        )?;

        self.storage
            .put_object(
                &key,
                file.data,
                PutOptions::new(mime.content_type()).content_disposition("inline"),
            )
            .await?;

        let download_name = download_filename(request.doc_type, &request.name, date, ext);
        let url = self
            .storage
            .presigned_get(
                &key,
                self.settings.presign_expires,
                ResponseOverrides {
                    content_disposition: Some(format!(
                        "attachment; filename=\"{}\"",
                        download_name
                    )),
                    content_type: Some(mime.content_type().to_string()),
                },
            )
            .await?;

        let expires_in = self.settings.presign_expires.as_secs();
        let exp_at = now.timestamp_millis() + (expires_in as i64) * 1000;

        let (code, short_url) = if self.settings.short_links_enabled {
            let code = self.publish_short_link(&url, exp_at, &key).await?;
            let short_url = self
                .settings
                .public_base_url
                .as_ref()
                .map(|base| format!("{}/d/{}", base, code));
            (Some(code), short_url)
        } else {
            (None, None)
        };

        tracing::info!(
            key = %key,
            doc_type = %request.doc_type,
            size_bytes = size as u64,
            short_code = ?code,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Document upload accepted"
        );

        Ok(UploadResponse {
            key,
            url,
            short_url,
            code,
            expires_in,
            exp_at,
            download_name,
        })
    }

    /// Mint a free code and write its descriptor. Returns the code.
    async fn publish_short_link(&self, url: &str, exp_at: i64, key: &str) -> Result<String, AppError> {
        let code = self.minter.mint().await?;
        let descriptor = ShortLinkDescriptor::new(url, exp_at, key);
        let body = serde_json::to_vec(&descriptor)?;

        self.storage
            .put_object(
                &short_link_key(&code)?,
                Bytes::from(body),
                PutOptions::new(DESCRIPTOR_CONTENT_TYPE).cache_control(DESCRIPTOR_CACHE_CONTROL),
            )
            .await?;

        Ok(code)
    }
}
