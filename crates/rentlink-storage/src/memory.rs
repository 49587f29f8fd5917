//! In-memory storage backend.
//!
//! Objects live in a `HashMap` behind a mutex. Besides the `Storage` trait it
//! exposes hooks for tests: keys can be reported as taken without being
//! written, operations can be made to fail with a provider-style error code,
//! and HEAD requests are recorded.

use crate::traits::{PutOptions, ResponseOverrides, Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

type TakenPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Trait operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Put,
    Get,
    Exists,
    Presign,
    HealthCheck,
}

/// An object as written through `put_object`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Bytes,
    pub options: PutOptions,
}

#[derive(Default)]
struct State {
    objects: HashMap<String, StoredObject>,
    failures: HashMap<Operation, String>,
    taken: Option<TakenPredicate>,
    head_requests: Vec<String>,
}

/// Storage implementation that keeps objects in process memory
#[derive(Clone)]
pub struct MemoryStorage {
    bucket: String,
    state: Arc<Mutex<State>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_bucket("rentlink")
    }

    pub fn with_bucket(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // Every write is a single insert, so a poisoned map is still consistent.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_failure(&self, operation: Operation) -> StorageResult<()> {
        match self.state().failures.get(&operation) {
            Some(code) => Err(StorageError::Backend {
                message: format!("Injected {:?} failure", operation),
                code: Some(code.clone()),
            }),
            None => Ok(()),
        }
    }

    /// Insert an object directly, bypassing failure injection.
    pub fn insert(&self, key: &str, data: impl Into<Bytes>, content_type: &str) {
        self.state().objects.insert(
            key.to_string(),
            StoredObject {
                data: data.into(),
                options: PutOptions::new(content_type),
            },
        );
    }

    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.state().objects.get(key).cloned()
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.state().objects.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Report every key matching `predicate` as existing on HEAD.
    pub fn mark_taken<F>(&self, predicate: F)
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.state().taken = Some(Arc::new(predicate));
    }

    /// Make `operation` fail with a backend error carrying `code`.
    pub fn fail_on(&self, operation: Operation, code: &str) {
        self.state().failures.insert(operation, code.to_string());
    }

    pub fn clear_failures(&self) {
        self.state().failures.clear();
    }

    /// Keys passed to `exists`, in call order.
    pub fn head_requests(&self) -> Vec<String> {
        self.state().head_requests.clone()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put_object(&self, key: &str, data: Bytes, options: PutOptions) -> StorageResult<()> {
        self.check_failure(Operation::Put)?;
        tracing::debug!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = data.len() as u64,
            "Memory put_object"
        );
        self.state()
            .objects
            .insert(key.to_string(), StoredObject { data, options });
        Ok(())
    }

    async fn get_object(&self, key: &str) -> StorageResult<Bytes> {
        self.check_failure(Operation::Get)?;
        self.state()
            .objects
            .get(key)
            .map(|object| object.data.clone())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.check_failure(Operation::Exists)?;
        let mut state = self.state();
        state.head_requests.push(key.to_string());
        let taken = state.taken.as_ref().is_some_and(|predicate| predicate(key));
        Ok(taken || state.objects.contains_key(key))
    }

    async fn presigned_get(
        &self,
        key: &str,
        expires_in: Duration,
        overrides: ResponseOverrides,
    ) -> StorageResult<String> {
        self.check_failure(Operation::Presign)?;
        let mut url = format!(
            "https://memory.invalid/{}/{}?X-Amz-Expires={}",
            self.bucket,
            key,
            expires_in.as_secs()
        );
        if overrides.content_disposition.is_some() {
            url.push_str("&response-content-disposition=attachment");
        }
        if let Some(content_type) = overrides.content_type {
            url.push_str("&response-content-type=");
            url.push_str(&content_type.replace('/', "%2F"));
        }
        Ok(url)
    }

    async fn health_check(&self) -> StorageResult<()> {
        self.check_failure(Operation::HealthCheck)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_get() {
        let storage = MemoryStorage::new();
        storage
            .put_object(
                "short/abc.json",
                Bytes::from_static(b"{}"),
                PutOptions::new("application/json").cache_control("no-store"),
            )
            .await
            .unwrap();

        assert_eq!(
            storage.get_object("short/abc.json").await.unwrap(),
            Bytes::from_static(b"{}")
        );
        let stored = storage.object("short/abc.json").unwrap();
        assert_eq!(stored.options.cache_control.as_deref(), Some("no-store"));
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found() {
        let storage = MemoryStorage::new();
        let err = storage.get_object("short/nope.json").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!storage.exists("short/nope.json").await.unwrap());
    }

    #[tokio::test]
    async fn test_mark_taken_and_head_log() {
        let storage = MemoryStorage::new();
        storage.mark_taken(|key| key.starts_with("short/"));

        assert!(storage.exists("short/anything.json").await.unwrap());
        assert!(!storage.exists("reservas/x.pdf").await.unwrap());
        assert_eq!(
            storage.head_requests(),
            vec!["short/anything.json".to_string(), "reservas/x.pdf".to_string()]
        );
    }

    #[tokio::test]
    async fn test_injected_failure_carries_code() {
        let storage = MemoryStorage::new();
        storage.fail_on(Operation::Exists, "AccessDenied");

        match storage.exists("short/x.json").await {
            Err(StorageError::Backend { code, .. }) => {
                assert_eq!(code.as_deref(), Some("AccessDenied"))
            }
            other => panic!("Expected backend error, got {:?}", other),
        }

        storage.clear_failures();
        assert!(storage.exists("short/x.json").await.is_ok());
    }

    #[tokio::test]
    async fn test_presigned_url_mentions_key_and_expiry() {
        let storage = MemoryStorage::with_bucket("docs");
        let url = storage
            .presigned_get(
                "reservas/2026-01-13/cpf-1.pdf",
                Duration::from_secs(3600),
                ResponseOverrides {
                    content_disposition: Some("attachment; filename=\"x.pdf\"".to_string()),
                    content_type: Some("application/pdf".to_string()),
                },
            )
            .await
            .unwrap();
        assert!(url.starts_with("https://memory.invalid/docs/reservas/2026-01-13/cpf-1.pdf"));
        assert!(url.contains("X-Amz-Expires=3600"));
        assert!(url.contains("response-content-type=application%2Fpdf"));
    }
}
