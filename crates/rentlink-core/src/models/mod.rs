pub mod document;
pub mod short_link;
pub mod upload;

pub use document::{DocType, DocumentMime};
pub use short_link::ShortLinkDescriptor;
pub use upload::UploadResponse;
