//! Rentlink Core Library
//!
//! This crate provides the configuration, error types, domain models and input
//! sanitization shared by the storage and API crates.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ConfigError, S3Settings, ShortLinkErrorStyle};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
