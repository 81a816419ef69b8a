//! What an HTTP layer writes back for a classified attachment.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::buffer::ByteBuffer;
use crate::classify::Classification;

/// RFC 5987 `attr-char` minus alphanumerics: everything else is encoded.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Successful binary download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResponse {
    pub status: u16,
    pub content_type: String,
    pub file_name: String,
    pub body: ByteBuffer,
}

impl DownloadResponse {
    pub fn content_disposition(&self) -> String {
        content_disposition(&self.file_name)
    }

    /// `Content-Type`, `Content-Disposition` and `Content-Length`.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Content-Type", self.content_type.clone()),
            ("Content-Disposition", self.content_disposition()),
            ("Content-Length", self.body.len().to_string()),
        ]
    }
}

impl From<Classification> for DownloadResponse {
    fn from(classification: Classification) -> Self {
        Self {
            status: 200,
            content_type: classification.content_type.mime,
            file_name: classification.file_name.into_string(),
            body: classification.bytes,
        }
    }
}

/// JSON body of a failed download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// `attachment; filename="..."`, plus `filename*` when the name is not ASCII.
///
/// ```
/// use filegate_core::content_disposition;
///
/// assert_eq!(content_disposition("a \"b\".pdf"), r#"attachment; filename="a \"b\".pdf""#);
/// assert_eq!(
///     content_disposition("ü.pdf"),
///     "attachment; filename=\"_.pdf\"; filename*=UTF-8''%C3%BC.pdf"
/// );
/// ```
pub fn content_disposition(file_name: &str) -> String {
    let mut fallback = String::with_capacity(file_name.len());
    let mut ascii = true;
    for c in file_name.chars().filter(|c| !c.is_control()) {
        match c {
            '"' | '\\' => {
                fallback.push('\\');
                fallback.push(c);
            }
            c if c.is_ascii() => fallback.push(c),
            _ => {
                ascii = false;
                fallback.push('_');
            }
        }
    }
    let mut header = format!("attachment; filename=\"{fallback}\"");
    if !ascii {
        let clean: String = file_name.chars().filter(|c| !c.is_control()).collect();
        header.push_str("; filename*=UTF-8''");
        header.extend(utf8_percent_encode(&clean, ATTR_CHAR));
    }
    header
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_type::ContentTypeResult;
    use crate::file_name::resolve_file_name;

    #[test]
    fn headers_from_classification() {
        let classification = Classification {
            bytes: ByteBuffer::new(vec![0x25, 0x50, 0x44, 0x46]).unwrap(),
            content_type: ContentTypeResult {
                mime: "application/pdf".into(),
                detected: true,
            },
            file_name: resolve_file_name("report", None, "application/pdf", "pdf", "document"),
        };
        let response = DownloadResponse::from(classification);
        assert_eq!(response.status, 200);
        assert_eq!(
            response.headers(),
            vec![
                ("Content-Type", "application/pdf".to_string()),
                ("Content-Disposition", "attachment; filename=\"report.pdf\"".to_string()),
                ("Content-Length", "4".to_string()),
            ]
        );
    }

    #[test]
    fn control_characters_are_dropped() {
        assert_eq!(
            content_disposition("evil\r\nSet-Cookie: x.pdf"),
            "attachment; filename=\"evilSet-Cookie: x.pdf\""
        );
    }

    #[test]
    fn error_body_serializes_like_upstream_contract() {
        let body = ErrorBody::new("File data is empty or invalid");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"success": false, "error": "File data is empty or invalid"})
        );
    }
}
