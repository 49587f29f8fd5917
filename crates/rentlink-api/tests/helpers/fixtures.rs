//! Document payloads and multipart forms.

use axum_test::multipart::{MultipartForm, Part};
use rentlink_core::models::ShortLinkDescriptor;

/// PNG signature followed by an IHDR chunk header. Content is never sniffed,
/// only the declared type matters.
pub fn minimal_png() -> Vec<u8> {
    let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend_from_slice(&[0, 0, 0, 13, b'I', b'H', b'D', b'R']);
    data
}

pub fn minimal_pdf() -> Vec<u8> {
    b"%PDF-1.4\n%%EOF\n".to_vec()
}

pub fn file_part(data: Vec<u8>, file_name: &str, mime: &str) -> Part {
    Part::bytes(bytes::Bytes::from(data))
        .file_name(file_name.to_string())
        .mime_type(mime.to_string())
}

/// The form the reservation page sends.
pub fn upload_form(part: Part, doc_type: &str, name: &str, car: &str) -> MultipartForm {
    MultipartForm::new()
        .add_part("file", part)
        .add_text("docType", doc_type.to_string())
        .add_text("nome", name.to_string())
        .add_text("carro", car.to_string())
}

pub fn descriptor_json(url: &str, exp_at: i64) -> Vec<u8> {
    let descriptor = ShortLinkDescriptor::new(url, exp_at, "reservas/2026-01-13/cpf-x.pdf");
    serde_json::to_vec(&descriptor).expect("descriptor serializes")
}

pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
