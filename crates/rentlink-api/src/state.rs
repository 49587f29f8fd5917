//! Application state shared by all handlers.

use rentlink_core::Config;
use rentlink_storage::Storage;
use std::sync::Arc;

use crate::services::upload::UploadSettings;
use crate::services::{DocumentUploadService, ShortLinkResolver};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub uploads: DocumentUploadService,
    pub short_links: ShortLinkResolver,
}

impl AppState {
    /// Wire the services around a single storage handle.
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        let uploads =
            DocumentUploadService::new(storage.clone(), UploadSettings::from_config(&config));
        let short_links = ShortLinkResolver::new(storage.clone());
        Self {
            config,
            storage,
            uploads,
            short_links,
        }
    }
}
