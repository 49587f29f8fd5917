pub mod short_code;
pub mod short_link;
pub mod upload;

pub use short_code::ShortCodeMinter;
pub use short_link::{Resolution, ResolveFailure, ShortLinkResolver};
pub use upload::{DocumentUploadService, UploadRequest, UploadedFile};
