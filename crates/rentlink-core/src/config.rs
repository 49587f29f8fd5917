//! Configuration module
//!
//! All settings are read once at startup, validated, and then handed to the
//! services as an explicit value. Nothing downstream reads the process
//! environment.

use std::env;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 4000;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;
const S3_REGION: &str = "us-central";
const UPLOAD_MAX_MB: usize = 8;
/// SigV4 presigned URLs cannot outlive seven days.
pub const MAX_PRESIGN_EXPIRES_SECS: u64 = 60 * 60 * 24 * 7;
const SHORT_CODE_LEN: usize = 8;
const SHORT_CODE_LEN_RANGE: std::ops::RangeInclusive<usize> = 4..=32;
const SHORT_LINK_FALLBACK_URL: &str = "/";

/// Configuration failures. Always fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing env: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// How the short-link endpoint reports a link it cannot follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortLinkErrorStyle {
    /// Every failure becomes a 302 to the fallback location.
    #[default]
    Redirect,
    /// Failures become JSON bodies with 400/404/410/500 statuses.
    Json,
}

impl FromStr for ShortLinkErrorStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "redirect" => Ok(ShortLinkErrorStyle::Redirect),
            "json" => Ok(ShortLinkErrorStyle::Json),
            other => Err(format!("expected 'redirect' or 'json', got '{}'", other)),
        }
    }
}

/// Connection settings for the S3-compatible object store.
#[derive(Clone)]
pub struct S3Settings {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub force_path_style: bool,
}

// Keep the secret out of logs.
impl std::fmt::Debug for S3Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Settings")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("access_key_id", &self.access_key_id)
            .field("force_path_style", &self.force_path_style)
            .finish_non_exhaustive()
    }
}

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub log_format: String,
    pub http_concurrency_limit: usize,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub storage_backend: StorageBackend,
    /// Present whenever `storage_backend` is `S3`.
    pub s3: Option<S3Settings>,
    pub max_upload_bytes: usize,
    pub presign_expires_secs: u64,
    pub short_links_enabled: bool,
    pub short_code_len: usize,
    pub short_link_error_style: ShortLinkErrorStyle,
    pub short_link_fallback_url: String,
    /// Base used to build `<base>/d/<code>`; no trailing slash.
    pub public_base_url: Option<String>,
}

impl Config {
    /// Load configuration from the process environment (and `.env` when present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as absent.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());
        let is_production = is_production_name(&environment);

        let cors_origins_str = get("CORS_ORIGINS").unwrap_or_else(|| "*".to_string());
        if is_production && cors_origins_str.trim() == "*" {
            return Err(ConfigError::Invalid {
                key: "CORS_ORIGINS",
                message: "cannot be '*' in production; specify explicit origins".to_string(),
            });
        }
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: parse_or(&get, "PORT", SERVER_PORT)?,
            cors_origins,
            environment,
            log_format: get("LOG_FORMAT")
                .map(|s| s.to_lowercase())
                .unwrap_or_else(|| "compact".to_string()),
            http_concurrency_limit: parse_or(&get, "HTTP_CONCURRENCY_LIMIT", HTTP_CONCURRENCY_LIMIT)?
                .max(1),
        };

        let storage_backend = match get("STORAGE_BACKEND") {
            Some(raw) => raw.parse::<StorageBackend>().map_err(|e| ConfigError::Invalid {
                key: "STORAGE_BACKEND",
                message: e.to_string(),
            })?,
            None => StorageBackend::default(),
        };

        let s3 = match storage_backend {
            StorageBackend::S3 => Some(S3Settings {
                endpoint: required(&get, "S3_ENDPOINT")?,
                region: get("S3_REGION").unwrap_or_else(|| S3_REGION.to_string()),
                bucket: required(&get, "S3_BUCKET")?,
                access_key_id: required(&get, "S3_ACCESS_KEY_ID")?,
                secret_access_key: required(&get, "S3_SECRET_ACCESS_KEY")?,
                force_path_style: get("S3_FORCE_PATH_STYLE")
                    .map(|v| parse_bool(&v))
                    .unwrap_or(true),
            }),
            StorageBackend::Memory => None,
        };

        let upload_max_mb: usize = parse_or(&get, "UPLOAD_MAX_MB", UPLOAD_MAX_MB)?;

        let public_base_url = get("PUBLIC_SITE_URL")
            .or_else(|| get("URL"))
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());

        let config = Config {
            base,
            storage_backend,
            s3,
            max_upload_bytes: upload_max_mb.saturating_mul(1024 * 1024),
            presign_expires_secs: parse_or(&get, "S3_PRESIGN_EXPIRES", MAX_PRESIGN_EXPIRES_SECS)?,
            short_links_enabled: get("SHORT_LINKS_ENABLED")
                .map(|v| parse_bool(&v))
                .unwrap_or(true),
            short_code_len: parse_or(&get, "SHORT_CODE_LEN", SHORT_CODE_LEN)?,
            short_link_error_style: match get("SHORT_LINK_ERROR_STYLE") {
                Some(raw) => raw
                    .parse::<ShortLinkErrorStyle>()
                    .map_err(|message| ConfigError::Invalid {
                        key: "SHORT_LINK_ERROR_STYLE",
                        message,
                    })?,
                None => ShortLinkErrorStyle::default(),
            },
            short_link_fallback_url: get("SHORT_LINK_FALLBACK_URL")
                .unwrap_or_else(|| SHORT_LINK_FALLBACK_URL.to_string()),
            public_base_url,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid {
                key: "UPLOAD_MAX_MB",
                message: "must be at least 1".to_string(),
            });
        }

        if self.presign_expires_secs == 0 || self.presign_expires_secs > MAX_PRESIGN_EXPIRES_SECS
        {
            return Err(ConfigError::Invalid {
                key: "S3_PRESIGN_EXPIRES",
                message: format!("must be between 1 and {} seconds", MAX_PRESIGN_EXPIRES_SECS),
            });
        }

        if !SHORT_CODE_LEN_RANGE.contains(&self.short_code_len) {
            return Err(ConfigError::Invalid {
                key: "SHORT_CODE_LEN",
                message: format!(
                    "must be between {} and {}",
                    SHORT_CODE_LEN_RANGE.start(),
                    SHORT_CODE_LEN_RANGE.end()
                ),
            });
        }

        if self.storage_backend == StorageBackend::S3 && self.s3.is_none() {
            return Err(ConfigError::Missing("S3_ENDPOINT"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.base.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn log_format(&self) -> &str {
        &self.base.log_format
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.base.http_concurrency_limit
    }

    pub fn max_upload_mb(&self) -> usize {
        self.max_upload_bytes / 1024 / 1024
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

fn required<F>(get: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    get(key).ok_or(ConfigError::Missing(key))
}

fn parse_or<F, T>(get: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}
