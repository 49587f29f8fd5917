//! Error types module
//!
//! Every failure the upload and short-link flows can produce is an `AppError`.
//! `ErrorMetadata` tells the HTTP layer how to present each variant.

use crate::config::ConfigError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code, when one exists. Store failures carry the
    /// provider's own code (e.g. "AccessDenied").
    fn error_code(&self) -> Option<String>;

    /// Client-facing message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing file")]
    MissingFile,

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {size} bytes (max {max_mb} MB)")]
    FileTooLarge { size: usize, max_mb: usize },

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Store operation failed: {message}")]
    StoreOperationFailed {
        message: String,
        code: Option<String>,
    },

    #[error("Short code generation failed after {attempts} attempts")]
    CodeGenerationFailed { attempts: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::MissingConfiguration(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}

impl AppError {
    /// Get error type as string (for logging)
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MissingFile => "MissingFile",
            AppError::UnsupportedFormat(_) => "UnsupportedFormat",
            AppError::FileTooLarge { .. } => "FileTooLarge",
            AppError::MissingConfiguration(_) => "MissingConfiguration",
            AppError::StoreOperationFailed { .. } => "StoreOperationFailed",
            AppError::CodeGenerationFailed { .. } => "CodeGenerationFailed",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Validation failures are the caller's fault and map to 400.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::MissingFile
                | AppError::UnsupportedFormat(_)
                | AppError::FileTooLarge { .. }
                | AppError::InvalidInput(_)
        )
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        if self.is_validation() {
            400
        } else {
            500
        }
    }

    fn error_code(&self) -> Option<String> {
        match self {
            AppError::StoreOperationFailed { code, .. } => code.clone(),
            AppError::MissingFile => Some("MISSING_FILE".to_string()),
            AppError::UnsupportedFormat(_) => Some("UNSUPPORTED_FORMAT".to_string()),
            AppError::FileTooLarge { .. } => Some("FILE_TOO_LARGE".to_string()),
            AppError::MissingConfiguration(_) => Some("MISSING_CONFIGURATION".to_string()),
            AppError::CodeGenerationFailed { .. } => Some("CODE_GENERATION_FAILED".to_string()),
            AppError::InvalidInput(_) => Some("INVALID_INPUT".to_string()),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => None,
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MissingFile => "Arquivo ausente.".to_string(),
            AppError::UnsupportedFormat(_) => {
                "Formato inválido. Use PNG, JPG/JPEG ou PDF.".to_string()
            }
            AppError::FileTooLarge { max_mb, .. } => {
                format!("Arquivo muito grande (máx. {}MB).", max_mb)
            }
            AppError::CodeGenerationFailed { .. } => {
                "Falha ao gerar código curto (colisão). Tente novamente.".to_string()
            }
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::StoreOperationFailed { message, .. } => message.clone(),
            AppError::MissingConfiguration(_)
            | AppError::Internal(_)
            | AppError::InternalWithSource { .. } => "Erro interno no upload.".to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        if self.is_validation() {
            LogLevel::Debug
        } else if matches!(self, AppError::CodeGenerationFailed { .. }) {
            LogLevel::Warn
        } else {
            LogLevel::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_requests() {
        let errors = [
            AppError::MissingFile,
            AppError::UnsupportedFormat("text/plain".to_string()),
            AppError::FileTooLarge {
                size: 9 * 1024 * 1024,
                max_mb: 8,
            },
            AppError::InvalidInput("bad multipart".to_string()),
        ];
        for err in errors {
            assert_eq!(err.http_status_code(), 400, "{}", err.error_type());
            assert_eq!(err.log_level(), LogLevel::Debug);
        }
    }

    #[test]
    fn test_store_failure_keeps_provider_code() {
        let err = AppError::StoreOperationFailed {
            message: "Access Denied".to_string(),
            code: Some("AccessDenied".to_string()),
        };
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code().as_deref(), Some("AccessDenied"));
        assert_eq!(err.client_message(), "Access Denied");
    }

    #[test]
    fn test_unclassified_errors_default_to_500() {
        let err = AppError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), None);
        assert_eq!(err.error_type(), "Internal");
    }

    #[test]
    fn test_config_error_becomes_missing_configuration() {
        let err = AppError::from(ConfigError::Missing("S3_BUCKET"));
        match &err {
            AppError::MissingConfiguration(msg) => assert!(msg.contains("S3_BUCKET")),
            other => panic!("Expected MissingConfiguration, got {:?}", other),
        }
        assert_eq!(err.http_status_code(), 500);
    }

    #[test]
    fn test_file_too_large_message_mentions_limit() {
        let err = AppError::FileTooLarge {
            size: 10,
            max_mb: 8,
        };
        assert!(err.client_message().contains("8MB"));
    }
}
