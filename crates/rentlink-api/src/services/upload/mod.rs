//! Document upload service
//!
//! validate → store privately → presign → (optionally) mint a short link

mod service;
mod types;

pub use service::{download_filename, DocumentUploadService, UploadSettings};
pub use types::{UploadRequest, UploadedFile};
