//! Rentlink API Library
//!
//! HTTP surface for document uploads and short-link redirects: handlers,
//! services, application state and setup.

mod api_doc;
mod handlers;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
