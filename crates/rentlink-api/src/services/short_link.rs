//! Short-link resolution
//!
//! Loads `short/<code>.json`, checks `expAt` and yields either the stored
//! presigned URL or the reason the link cannot be followed. Resolution never
//! fails outright; the handler decides how a failure is shown.

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use rentlink_core::models::ShortLinkDescriptor;
use rentlink_storage::keys::short_link_key;
use rentlink_storage::{Storage, StorageError};

/// Why a short link could not be followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveFailure {
    /// Code was empty after trimming
    EmptyCode,
    /// No descriptor for this code
    NotFound,
    /// Descriptor is not JSON or has no usable `url`
    Malformed,
    /// `expAt` has passed
    Expired,
    /// The store could not be read
    Store,
}

impl ResolveFailure {
    /// Status used when failures are reported as JSON.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ResolveFailure::EmptyCode => StatusCode::BAD_REQUEST,
            ResolveFailure::NotFound | ResolveFailure::Malformed => StatusCode::NOT_FOUND,
            ResolveFailure::Expired => StatusCode::GONE,
            ResolveFailure::Store => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ResolveFailure::EmptyCode => "Código inválido",
            ResolveFailure::NotFound | ResolveFailure::Malformed => "Link não encontrado",
            ResolveFailure::Expired => "Link expirado",
            ResolveFailure::Store => "Erro ao abrir link",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ResolveFailure::EmptyCode => "INVALID_CODE",
            ResolveFailure::NotFound => "LINK_NOT_FOUND",
            ResolveFailure::Malformed => "LINK_MALFORMED",
            ResolveFailure::Expired => "LINK_EXPIRED",
            ResolveFailure::Store => "LINK_ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Redirect(String),
    Fallback(ResolveFailure),
}

#[derive(Clone)]
pub struct ShortLinkResolver {
    storage: Arc<dyn Storage>,
}

impl ShortLinkResolver {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn resolve(&self, code: &str) -> Resolution {
        self.resolve_at(code, Utc::now()).await
    }

    /// Resolve `code` as of `now`. A link is expired once `now >= expAt`.
    pub async fn resolve_at(&self, code: &str, now: DateTime<Utc>) -> Resolution {
        let code = code.trim();
        if code.is_empty() {
            return Resolution::Fallback(ResolveFailure::EmptyCode);
        }

        // A code that cannot form a valid key cannot have been minted.
        let key = match short_link_key(code) {
            Ok(key) => key,
            Err(_) => {
                tracing::debug!(code = %code, "Short code with invalid characters");
                return Resolution::Fallback(ResolveFailure::NotFound);
            }
        };

        let body = match self.storage.get_object(&key).await {
            Ok(body) => body,
            Err(StorageError::NotFound(_)) => {
                tracing::debug!(code = %code, "Short link not found");
                return Resolution::Fallback(ResolveFailure::NotFound);
            }
            Err(e) => {
                tracing::error!(error = %e, code = %code, key = %key, "Short link lookup failed");
                return Resolution::Fallback(ResolveFailure::Store);
            }
        };

        let descriptor: ShortLinkDescriptor = match serde_json::from_slice(&body) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                tracing::warn!(error = %e, code = %code, "Short link descriptor is malformed");
                return Resolution::Fallback(ResolveFailure::Malformed);
            }
        };

        if descriptor.url.trim().is_empty() {
            tracing::warn!(code = %code, "Short link descriptor has no url");
            return Resolution::Fallback(ResolveFailure::Malformed);
        }

        if descriptor.is_expired_at(now.timestamp_millis()) {
            tracing::info!(code = %code, exp_at = ?descriptor.exp_at, "Short link expired");
            return Resolution::Fallback(ResolveFailure::Expired);
        }

        tracing::info!(code = %code, key = ?descriptor.key, "Short link resolved");
        Resolution::Redirect(descriptor.url)
    }
}
