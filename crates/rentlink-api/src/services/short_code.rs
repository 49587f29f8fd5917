//! Short-code minting
//!
//! Codes are drawn from the 62 ASCII alphanumerics. Uniqueness is checked with
//! a HEAD on the descriptor key before the caller writes it; two concurrent
//! mints can still pick the same code between check and write, which the
//! size of the code space makes negligible.

use std::sync::Arc;

use rand::distr::Alphanumeric;
use rand::Rng;
use rentlink_core::AppError;
use rentlink_storage::keys::short_link_key;
use rentlink_storage::Storage;

/// Attempts made at each code length before giving up on it.
pub const ATTEMPTS_PER_TIER: usize = 6;
/// Minimum length of the widened second tier.
pub const WIDE_CODE_MIN_LEN: usize = 10;

/// Random alphanumeric code of `len` characters.
pub fn random_code(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[derive(Clone)]
pub struct ShortCodeMinter {
    storage: Arc<dyn Storage>,
    length: usize,
}

impl ShortCodeMinter {
    pub fn new(storage: Arc<dyn Storage>, length: usize) -> Self {
        Self { storage, length }
    }

    /// Code lengths tried in order: the configured one, then
    /// `max(length + 2, 10)`.
    pub fn tiers(&self) -> [usize; 2] {
        [self.length, (self.length + 2).max(WIDE_CODE_MIN_LEN)]
    }

    /// Find a code whose descriptor key does not exist yet.
    ///
    /// Any HEAD failure other than not-found aborts minting. Twelve collisions
    /// in a row yield `AppError::CodeGenerationFailed`.
    pub async fn mint(&self) -> Result<String, AppError> {
        let mut attempts = 0;
        for len in self.tiers() {
            for _ in 0..ATTEMPTS_PER_TIER {
                attempts += 1;
                let code = random_code(len);
                let key = short_link_key(&code)?;
                if !self.storage.exists(&key).await? {
                    tracing::debug!(code_len = len, attempts, "Short code minted");
                    return Ok(code);
                }
                tracing::debug!(code_len = len, attempts, "Short code collision");
            }
        }

        tracing::warn!(attempts, tiers = ?self.tiers(), "Short code space exhausted");
        Err(AppError::CodeGenerationFailed { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentlink_storage::{MemoryStorage, Operation};

    fn code_of(key: &str) -> &str {
        key.trim_start_matches("short/").trim_end_matches(".json")
    }

    #[test]
    fn test_random_code_alphabet_and_length() {
        for len in [4, 8, 10, 32] {
            let code = random_code(len);
            assert_eq!(code.len(), len);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_tiers() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        assert_eq!(ShortCodeMinter::new(storage.clone(), 8).tiers(), [8, 10]);
        assert_eq!(ShortCodeMinter::new(storage.clone(), 4).tiers(), [4, 10]);
        assert_eq!(ShortCodeMinter::new(storage, 12).tiers(), [12, 14]);
    }

    #[tokio::test]
    async fn test_first_tier_succeeds_on_empty_store() {
        let memory = MemoryStorage::new();
        let minter = ShortCodeMinter::new(Arc::new(memory.clone()), 8);

        for _ in 0..20 {
            let code = minter.mint().await.unwrap();
            assert_eq!(code.len(), 8);
        }
        assert_eq!(memory.head_requests().len(), 20);
    }

    #[tokio::test]
    async fn test_escalates_to_wider_codes_when_first_tier_is_taken() {
        let memory = MemoryStorage::new();
        memory.mark_taken(|key| code_of(key).len() == 8);
        let minter = ShortCodeMinter::new(Arc::new(memory.clone()), 8);

        let code = minter.mint().await.unwrap();
        assert_eq!(code.len(), 10);

        let heads = memory.head_requests();
        assert_eq!(heads.len(), ATTEMPTS_PER_TIER + 1);
        assert!(heads[..ATTEMPTS_PER_TIER]
            .iter()
            .all(|key| code_of(key).len() == 8));
    }

    #[tokio::test]
    async fn test_exhausting_both_tiers_fails() {
        let memory = MemoryStorage::new();
        memory.mark_taken(|_| true);
        let minter = ShortCodeMinter::new(Arc::new(memory.clone()), 8);

        match minter.mint().await {
            Err(AppError::CodeGenerationFailed { attempts }) => {
                assert_eq!(attempts, 2 * ATTEMPTS_PER_TIER)
            }
            other => panic!("Expected CodeGenerationFailed, got {:?}", other),
        }
        assert_eq!(memory.head_requests().len(), 2 * ATTEMPTS_PER_TIER);
    }

    #[tokio::test]
    async fn test_head_failure_is_propagated() {
        let memory = MemoryStorage::new();
        memory.fail_on(Operation::Exists, "AccessDenied");
        let minter = ShortCodeMinter::new(Arc::new(memory), 8);

        match minter.mint().await {
            Err(AppError::StoreOperationFailed { code, .. }) => {
                assert_eq!(code.as_deref(), Some("AccessDenied"))
            }
            other => panic!("Expected StoreOperationFailed, got {:?}", other),
        }
    }
}
