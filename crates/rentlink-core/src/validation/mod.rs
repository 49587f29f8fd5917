//! Validation modules

pub mod sanitize;

pub use sanitize::{sanitize, sanitize_upper, MAX_SANITIZED_LENGTH};
