use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of identity document attached to a reservation.
///
/// Parsing never fails: anything that is not `cpf` or `cnh` (case-insensitive)
/// becomes `Doc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Cpf,
    Cnh,
    #[default]
    Doc,
}

impl DocType {
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "cpf" => DocType::Cpf,
            "cnh" => DocType::Cnh,
            _ => DocType::Doc,
        }
    }

    /// Lower-case form used inside storage keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Cpf => "cpf",
            DocType::Cnh => "cnh",
            DocType::Doc => "doc",
        }
    }

    /// Upper-case form used in download filenames.
    pub fn label(&self) -> &'static str {
        match self {
            DocType::Cpf => "CPF",
            DocType::Cnh => "CNH",
            DocType::Doc => "DOC",
        }
    }
}

impl Display for DocType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// The declared MIME types accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentMime {
    Png,
    Jpeg,
    Pdf,
}

impl DocumentMime {
    /// Match a declared content type exactly, ignoring surrounding
    /// whitespace. Case variants and parameters are rejected; there is no
    /// content sniffing.
    pub fn from_declared(content_type: &str) -> Option<Self> {
        match content_type.trim() {
            "image/png" => Some(DocumentMime::Png),
            "image/jpeg" => Some(DocumentMime::Jpeg),
            "application/pdf" => Some(DocumentMime::Pdf),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentMime::Png => "image/png",
            DocumentMime::Jpeg => "image/jpeg",
            DocumentMime::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentMime::Png => "png",
            DocumentMime::Jpeg => "jpg",
            DocumentMime::Pdf => "pdf",
        }
    }
}
