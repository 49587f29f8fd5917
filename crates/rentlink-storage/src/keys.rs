//! Shared key generation for storage backends.
//!
//! Documents live under `reservas/{date}/`, short-link descriptors under
//! `short/`. Every key goes through [`validate_key`] before it is returned.

use chrono::NaiveDate;
use rentlink_core::models::DocType;
use rentlink_core::validation::sanitize;
use uuid::Uuid;

use crate::traits::{StorageError, StorageResult};

pub const DOCUMENT_PREFIX: &str = "reservas";
pub const SHORT_LINK_PREFIX: &str = "short";

/// Build the key for an uploaded document:
/// `reservas/{date}/{doc_type}-{id}[__{name}][__{car}].{ext}`.
///
/// `name` and `car` are raw user input. They are sanitized and lower-cased
/// here, and omitted entirely when nothing survives sanitization.
pub fn document_key(
    date: NaiveDate,
    doc_type: DocType,
    id: Uuid,
    name: &str,
    car: &str,
    ext: &str,
) -> StorageResult<String> {
    let mut key = format!(
        "{}/{}/{}-{}",
        DOCUMENT_PREFIX,
        date.format("%Y-%m-%d"),
        doc_type.as_str(),
        id
    );
    for segment in [name, car] {
        let clean = sanitize(segment).to_ascii_lowercase();
        if !clean.is_empty() {
            key.push_str("__");
            key.push_str(&clean);
        }
    }
    key.push('.');
    key.push_str(ext);

    validate_key(&key)?;
    Ok(key)
}

/// Key of the descriptor for a short code: `short/{code}.json`.
pub fn short_link_key(code: &str) -> StorageResult<String> {
    let key = format!("{}/{}.json", SHORT_LINK_PREFIX, code);
    validate_key(&key)?;
    Ok(key)
}

/// Reject keys with characters outside `[A-Za-z0-9-_./]`, `..` segments or a
/// leading `/`.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("empty key".to_string()));
    }
    if key.starts_with('/') {
        return Err(StorageError::InvalidKey(format!("leading slash: {}", key)));
    }
    if key.contains("..") {
        return Err(StorageError::InvalidKey(format!("path traversal: {}", key)));
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/')))
    {
        return Err(StorageError::InvalidKey(format!(
            "unexpected character {:?} in {}",
            bad, key
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 13).expect("valid date")
    }

    fn id() -> Uuid {
        Uuid::parse_str("0f8fad5b-d9cb-469f-a165-70867728950e").expect("valid uuid")
    }

    #[test]
    fn test_document_key_with_name_and_car() {
        let key = document_key(date(), DocType::Cpf, id(), "João Silva", "Onix 2022", "pdf")
            .expect("key");
        assert_eq!(
            key,
            "reservas/2026-01-13/cpf-0f8fad5b-d9cb-469f-a165-70867728950e__joao-silva__onix-2022.pdf"
        );
    }

    #[test]
    fn test_document_key_omits_empty_segments() {
        let key = document_key(date(), DocType::Doc, id(), "", "!!!", "bin").expect("key");
        assert_eq!(
            key,
            "reservas/2026-01-13/doc-0f8fad5b-d9cb-469f-a165-70867728950e.bin"
        );

        let key = document_key(date(), DocType::Cnh, id(), "", "Gol", "jpg").expect("key");
        assert!(key.ends_with("cnh-0f8fad5b-d9cb-469f-a165-70867728950e__gol.jpg"));
    }

    #[test]
    fn test_document_key_neutralizes_hostile_input() {
        let key = document_key(date(), DocType::Cpf, id(), "../../etc/passwd", "a/b", "png")
            .expect("key");
        assert!(!key.contains(".."));
        assert_eq!(key.matches('/').count(), 2);
        assert!(validate_key(&key).is_ok());
    }

    #[test]
    fn test_short_link_key() {
        assert_eq!(short_link_key("Ab3dE6gH").expect("key"), "short/Ab3dE6gH.json");
        assert!(short_link_key("../x").is_err());
        assert!(short_link_key("a b").is_err());
        assert!(short_link_key("código").is_err());
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("reservas/2026-01-13/doc-1.pdf").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/short/x.json").is_err());
        assert!(validate_key("short/../x.json").is_err());
        assert!(validate_key("short/x?.json").is_err());
    }
}
