//! Storage setup and initialization

use anyhow::{Context, Result};
use rentlink_core::Config;
use rentlink_storage::{create_storage, Storage};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage...");
    let storage = create_storage(config)
        .await
        .context("Failed to create storage backend")?;

    if let Some(s3) = &config.s3 {
        tracing::info!(
            backend = %storage.backend_type(),
            bucket = %s3.bucket,
            endpoint = %s3.endpoint,
            "Storage initialized successfully"
        );
    } else {
        tracing::info!(backend = %storage.backend_type(), "Storage initialized successfully");
    }

    Ok(storage)
}
