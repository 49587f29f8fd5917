use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned by `POST /api/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Storage key of the uploaded document
    pub key: String,
    /// Presigned GET URL
    pub url: String,
    /// `<base>/d/<code>`, or null when no public base URL is configured
    pub short_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Signature lifetime in seconds
    pub expires_in: u64,
    /// Epoch milliseconds after which the short link stops resolving
    pub exp_at: i64,
    pub download_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_fields_and_null_short_url() {
        let response = UploadResponse {
            key: "reservas/2026-01-13/cpf-1.pdf".to_string(),
            url: "https://s3.example.com/x".to_string(),
            short_url: None,
            code: Some("Ab3dE6gH".to_string()),
            expires_in: 604800,
            exp_at: 1_768_300_000_000,
            download_name: "CPF-CLIENTE-2026-01-13.pdf".to_string(),
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json["shortUrl"].is_null());
        assert_eq!(json["code"], "Ab3dE6gH");
        assert_eq!(json["expiresIn"], 604800);
        assert_eq!(json["expAt"], 1_768_300_000_000_i64);
        assert_eq!(json["downloadName"], "CPF-CLIENTE-2026-01-13.pdf");
    }

    #[test]
    fn test_code_omitted_when_short_links_disabled() {
        let response = UploadResponse {
            key: "k".to_string(),
            url: "u".to_string(),
            short_url: None,
            code: None,
            expires_in: 60,
            exp_at: 0,
            download_name: "DOC-CLIENTE-2026-01-13.bin".to_string(),
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("code").is_none());
        assert!(json.get("shortUrl").is_some());
    }
}
