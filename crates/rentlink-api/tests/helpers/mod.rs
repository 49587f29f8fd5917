//! Test helpers: build AppState and router over in-memory storage.
//!
//! Run from workspace root: `cargo test -p rentlink-api`.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use rentlink_api::setup::routes;
use rentlink_api::state::AppState;
use rentlink_core::Config;
use rentlink_storage::MemoryStorage;
use std::collections::HashMap;
use std::sync::Arc;

pub const PUBLIC_SITE_URL: &str = "https://locadora.example.com";

/// Test application: server plus a handle on the backing store.
pub struct TestApp {
    pub server: TestServer,
    pub storage: MemoryStorage,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

fn base_vars() -> HashMap<&'static str, String> {
    HashMap::from([
        ("STORAGE_BACKEND", "memory".to_string()),
        ("PUBLIC_SITE_URL", PUBLIC_SITE_URL.to_string()),
        ("UPLOAD_MAX_MB", "1".to_string()),
    ])
}

/// Default setup: redirect error style, short links on, 1 MB uploads.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[]).await
}

/// Setup with extra or overriding environment values.
pub async fn setup_test_app_with(overrides: &[(&'static str, &str)]) -> TestApp {
    let mut vars = base_vars();
    for (key, value) in overrides {
        vars.insert(key, value.to_string());
    }
    let config = Config::from_lookup(|key| vars.get(key).cloned())
        .expect("Failed to build test configuration");

    let storage = MemoryStorage::new();
    let state = Arc::new(AppState::new(config.clone(), Arc::new(storage.clone())));
    let app = routes::setup_routes(&config, state.clone())
        .await
        .expect("Failed to set up routes");

    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        storage,
        state,
    }
}
