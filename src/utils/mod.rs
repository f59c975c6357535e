use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

pub mod logger;

/// Builds a self-describing data URI from raw image bytes.
///
/// The service stores payloads opaquely; this is the encoding the browser
/// client uses when it submits a capture.
pub fn encode_data_uri(mime_type: &str, raw: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, BASE64.encode(raw))
}
