//! Rentlink Storage Library
//!
//! The object store client used by the upload service and the short-link
//! resolver: the `Storage` trait, an S3-compatible implementation and an
//! in-memory one for tests.
//!
//! # Storage key format
//!
//! - **Documents**: `reservas/{date}/{doc_type}-{uuid}[__{name}][__{car}].{ext}`
//! - **Short-link descriptors**: `short/{code}.json`
//!
//! Keys only use `[A-Za-z0-9-_./]`, never contain `..` and never start with
//! `/`. Key generation is centralized in the `keys` module.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-memory")]
pub use memory::{MemoryStorage, Operation};
pub use rentlink_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{PutOptions, ResponseOverrides, Storage, StorageError, StorageResult};
