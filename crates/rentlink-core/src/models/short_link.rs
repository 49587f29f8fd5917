use serde::{Deserialize, Serialize};

/// JSON record persisted at `short/<code>.json`.
///
/// `exp_at` is an absolute epoch-millisecond deadline. Written once at upload
/// time and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLinkDescriptor {
    pub url: String,
    #[serde(rename = "expAt", default, skip_serializing_if = "Option::is_none")]
    pub exp_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl ShortLinkDescriptor {
    pub fn new(url: impl Into<String>, exp_at: i64, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            exp_at: Some(exp_at),
            key: Some(key.into()),
        }
    }

    /// A descriptor without `expAt` never expires on its own.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.exp_at.is_some_and(|exp_at| now_ms >= exp_at)
    }
}
