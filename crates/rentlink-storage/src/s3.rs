use crate::traits::{PutOptions, ResponseOverrides, Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use rentlink_core::S3Settings;
use std::time::{Duration, Instant};

/// S3 storage implementation
///
/// Works against any S3-compatible endpoint. Credentials are the static pair
/// from configuration; the ambient AWS credential chain is not consulted.
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
}

impl S3Storage {
    /// Create a new S3Storage instance from validated settings.
    pub async fn new(settings: &S3Settings) -> StorageResult<Self> {
        if settings.endpoint.is_empty() || settings.bucket.is_empty() {
            return Err(StorageError::Config(
                "S3 endpoint and bucket are required".to_string(),
            ));
        }

        let credentials = Credentials::new(
            settings.access_key_id.clone(),
            settings.secret_access_key.clone(),
            None,
            None,
            "static",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&settings.endpoint)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(settings.force_path_style)
            .build();

        tracing::info!(
            endpoint = %settings.endpoint,
            region = %settings.region,
            bucket = %settings.bucket,
            force_path_style = settings.force_path_style,
            "S3 client configured"
        );

        Ok(S3Storage {
            client: Client::from_conf(s3_config),
            bucket: settings.bucket.clone(),
        })
    }
}

fn backend_error<E, R>(err: &SdkError<E, R>) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    StorageError::Backend {
        message: err
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string()),
        code: err.code().map(str::to_string),
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[async_trait]
impl Storage for S3Storage {
    async fn put_object(&self, key: &str, data: Bytes, options: PutOptions) -> StorageResult<()> {
        let size = data.len() as u64;
        let start = Instant::now();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(&options.content_type)
            .set_content_disposition(options.content_disposition)
            .set_cache_control(options.cache_control)
            .send()
            .await
            .map_err(|e| {
                let err = backend_error(&e);
                tracing::error!(
                    error = %err,
                    code = ?e.code(),
                    bucket = %self.bucket,
                    key = %key,
                    size_bytes = size,
                    duration_ms = elapsed_ms(start),
                    "S3 put_object failed"
                );
                err
            })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = elapsed_ms(start),
            "S3 put_object successful"
        );

        Ok(())
    }

    async fn get_object(&self, key: &str) -> StorageResult<Bytes> {
        let start = Instant::now();

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| match &e {
                SdkError::ServiceError(service_err)
                    if matches!(service_err.err(), GetObjectError::NoSuchKey(_)) =>
                {
                    StorageError::NotFound(key.to_string())
                }
                _ => {
                    let err = backend_error(&e);
                    tracing::error!(
                        error = %err,
                        bucket = %self.bucket,
                        key = %key,
                        duration_ms = elapsed_ms(start),
                        "S3 get_object failed"
                    );
                    err
                }
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::backend(e.to_string()))?
            .into_bytes();

        tracing::debug!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = data.len() as u64,
            duration_ms = elapsed_ms(start),
            "S3 get_object successful"
        );

        Ok(data)
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let not_found = match &e {
                    SdkError::ServiceError(service_err) => {
                        matches!(service_err.err(), HeadObjectError::NotFound(_))
                            || service_err.raw().status().as_u16() == 404
                    }
                    _ => false,
                } || e.code() == Some("NotFound");

                if not_found {
                    Ok(false)
                } else {
                    let err = backend_error(&e);
                    tracing::error!(
                        error = %err,
                        bucket = %self.bucket,
                        key = %key,
                        "S3 head_object failed"
                    );
                    Err(err)
                }
            }
        }
    }

    async fn presigned_get(
        &self,
        key: &str,
        expires_in: Duration,
        overrides: ResponseOverrides,
    ) -> StorageResult<String> {
        let presigning_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::Config(e.to_string()))?;

        let presigned_request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .set_response_content_disposition(overrides.content_disposition)
            .set_response_content_type(overrides.content_type)
            .presigned(presigning_config)
            .await
            .map_err(|e| backend_error(&e))?;

        tracing::debug!(
            bucket = %self.bucket,
            key = %key,
            expires_in_secs = expires_in.as_secs(),
            "S3 presigned GET generated"
        );

        Ok(presigned_request.uri().to_string())
    }

    async fn health_check(&self) -> StorageResult<()> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| backend_error(&e))?;
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
