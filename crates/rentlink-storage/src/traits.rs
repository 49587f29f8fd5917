//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use rentlink_core::AppError;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Any failure reported by the store. `code` is the provider's error code
    /// when it sent one (e.g. `AccessDenied`, `NoSuchBucket`).
    #[error("Storage backend error: {message}")]
    Backend {
        message: String,
        code: Option<String>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

impl StorageError {
    pub fn backend(message: impl Into<String>) -> Self {
        StorageError::Backend {
            message: message.into(),
            code: None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Backend { message, code } => {
                AppError::StoreOperationFailed { message, code }
            }
            StorageError::NotFound(key) => AppError::StoreOperationFailed {
                message: format!("Object not found: {}", key),
                code: Some("NoSuchKey".to_string()),
            },
            StorageError::Config(message) => AppError::MissingConfiguration(message),
            other => AppError::StoreOperationFailed {
                message: other.to_string(),
                code: None,
            },
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Headers written with an object. Objects are always private.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutOptions {
    pub content_type: String,
    pub content_disposition: Option<String>,
    pub cache_control: Option<String>,
}

impl PutOptions {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            ..Default::default()
        }
    }

    pub fn content_disposition(mut self, value: impl Into<String>) -> Self {
        self.content_disposition = Some(value.into());
        self
    }

    pub fn cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = Some(value.into());
        self
    }
}

/// Response headers a presigned GET asks the store to send back, overriding
/// whatever was set at write time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseOverrides {
    pub content_disposition: Option<String>,
    pub content_type: Option<String>,
}

/// Storage abstraction trait
///
/// Both the upload service and the short-link resolver talk to the object
/// store through this trait only, so tests can swap in `MemoryStorage`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` at `key`, replacing anything already there.
    async fn put_object(&self, key: &str, data: Bytes, options: PutOptions) -> StorageResult<()>;

    /// Read the whole object. Absent objects are `StorageError::NotFound`.
    async fn get_object(&self, key: &str) -> StorageResult<Bytes>;

    /// HEAD the key. A not-found answer is `Ok(false)`; every other failure
    /// is returned as an error.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Generate a presigned GET URL valid for `expires_in`.
    async fn presigned_get(
        &self,
        key: &str,
        expires_in: Duration,
        overrides: ResponseOverrides,
    ) -> StorageResult<String>;

    /// Check that the bucket is reachable with the configured credentials.
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
