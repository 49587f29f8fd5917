//! Types used by the document upload service

use bytes::Bytes;
use rentlink_core::models::DocType;

/// The `file` part of an upload, as declared by the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub data: Bytes,
    /// Declared MIME type; never sniffed from the content
    pub content_type: Option<String>,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A parsed upload form. Built once at the HTTP boundary.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub file: Option<UploadedFile>,
    pub doc_type: DocType,
    /// Customer name (`nome`), raw
    pub name: String,
    /// Car label (`carro`), raw
    pub car_label: String,
}
