//! Request and response bodies of the résumé service, as they appear on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub(crate) struct AnalyzeRequest<'a> {
    pub resume_text: &'a str,
    /// Serialized as `null` when the user gave no role.
    pub target_role: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    pub success: bool,
    /// Absent on failure bodies. Present, possibly empty, on success.
    #[serde(default)]
    pub extracted_text: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Error body of the service. `detail` is usually a string, but validation
/// failures send a list of objects there instead.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

/// Pulls a human-readable `detail` out of an error body, if there is one.
pub(crate) fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

/// Content type sent with the multipart file part.
pub(crate) fn mime_for(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".pdf") {
        "application/pdf"
    } else if lower.ends_with(".docx") {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    } else {
        "application/octet-stream"
    }
}
