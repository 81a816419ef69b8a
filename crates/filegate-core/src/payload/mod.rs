//! Payload normalization: upstream value of unknown shape to one byte buffer.
//!
//! Shape inspection ([`RawPayload::inspect`]) picks exactly one variant for a
//! value, first match wins:
//!
//! 1. wrapped file result (`fileContents` + optional `contentType`,
//!    `fileDownloadName`); its contents go through steps 2-5
//! 2. array of integers in `0..=255`
//! 3. array-like object with keys `"0".."n-1"`
//! 4. string (base64, else latin1)
//! 5. object carrying one of [`CONVENTIONAL_FIELDS`]; the field value goes
//!    through steps 2-4
//!
//! Anything else is [`PayloadError::UnsupportedPayloadShape`]. Extraction
//! ([`normalize`]) then fails with [`PayloadError::EmptyPayload`] on zero bytes.

mod text;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::buffer::{print_octets, ByteBuffer};
use crate::error::PayloadError;

use text::decode_string;

/// Field names searched, in order, on a generic object.
pub const CONVENTIONAL_FIELDS: [&str; 5] = ["data", "content", "base64", "fileData", "file"];

const WRAPPED_CONTENTS: &str = "fileContents";
const WRAPPED_CONTENT_TYPE: &str = "contentType";
const WRAPPED_FILE_NAME: &str = "fileDownloadName";

/// Upstream payload after shape inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawPayload {
    Bytes(Vec<u8>),
    WrappedFile {
        contents: Box<RawPayload>,
        declared_content_type: Option<String>,
        declared_file_name: Option<String>,
    },
    Base64String(String),
    ArrayLikeObject(Vec<u8>),
    GenericObject {
        field: &'static str,
        inner: Box<RawPayload>,
    },
}

impl RawPayload {
    /// Picks the variant describing `value`.
    pub fn inspect(value: &Value) -> Result<Self, PayloadError> {
        if let Value::Object(map) = value {
            if let Some(contents) = map.get(WRAPPED_CONTENTS) {
                let contents = Self::inspect_contents(contents)?;
                return Ok(RawPayload::WrappedFile {
                    contents: Box::new(contents),
                    declared_content_type: non_empty_string(map, WRAPPED_CONTENT_TYPE),
                    declared_file_name: non_empty_string(map, WRAPPED_FILE_NAME),
                });
            }
        }
        Self::inspect_contents(value)
    }

    /// Steps 2-5.
    fn inspect_contents(value: &Value) -> Result<Self, PayloadError> {
        if let Some(payload) = Self::inspect_direct(value) {
            return Ok(payload);
        }
        if let Value::Object(map) = value {
            for field in CONVENTIONAL_FIELDS {
                if let Some(payload) = map.get(field).and_then(Self::inspect_direct) {
                    return Ok(RawPayload::GenericObject {
                        field,
                        inner: Box::new(payload),
                    });
                }
            }
        }
        let shape = PayloadShape::of(value);
        warn!(shape = %shape, "unsupported payload shape received from upstream");
        Err(PayloadError::UnsupportedPayloadShape { shape })
    }

    /// Steps 2-4.
    fn inspect_direct(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => bytes_from_values(items.iter()).map(RawPayload::Bytes),
            Value::Object(map) => array_like_values(map)
                .and_then(bytes_from_values)
                .map(RawPayload::ArrayLikeObject),
            Value::String(text) => Some(RawPayload::Base64String(text.clone())),
            _ => None,
        }
    }

    /// Variant name, for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            RawPayload::Bytes(_) => "bytes",
            RawPayload::WrappedFile { .. } => "wrapped_file",
            RawPayload::Base64String(_) => "base64_string",
            RawPayload::ArrayLikeObject(_) => "array_like_object",
            RawPayload::GenericObject { .. } => "generic_object",
        }
    }
}

impl From<Vec<u8>> for RawPayload {
    fn from(bytes: Vec<u8>) -> Self {
        RawPayload::Bytes(bytes)
    }
}

impl From<&[u8]> for RawPayload {
    fn from(bytes: &[u8]) -> Self {
        RawPayload::Bytes(bytes.to_vec())
    }
}

/// Normalized bytes plus whatever metadata the upstream declared alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPayload {
    pub bytes: ByteBuffer,
    pub declared_content_type: Option<String>,
    pub declared_file_name: Option<String>,
}

#[derive(Default)]
struct Extracted {
    bytes: Vec<u8>,
    content_type: Option<String>,
    file_name: Option<String>,
}

fn extract(payload: RawPayload) -> Extracted {
    match payload {
        RawPayload::Bytes(bytes) | RawPayload::ArrayLikeObject(bytes) => Extracted {
            bytes,
            ..Extracted::default()
        },
        RawPayload::Base64String(text) => {
            let decoded = decode_string(&text);
            Extracted {
                bytes: decoded.bytes,
                content_type: decoded.data_uri_mime,
                file_name: None,
            }
        }
        RawPayload::GenericObject { inner, .. } => extract(*inner),
        RawPayload::WrappedFile {
            contents,
            declared_content_type,
            declared_file_name,
        } => {
            let inner = extract(*contents);
            Extracted {
                bytes: inner.bytes,
                content_type: declared_content_type.or(inner.content_type),
                file_name: declared_file_name,
            }
        }
    }
}

/// Extracts the bytes of an inspected payload.
pub fn normalize(payload: RawPayload) -> Result<NormalizedPayload, PayloadError> {
    let kind = payload.kind();
    let extracted = extract(payload);
    let bytes = ByteBuffer::new(extracted.bytes).inspect_err(|_| {
        warn!(kind, "payload normalized to zero bytes");
    })?;
    debug!(kind, len = bytes.len(), head = %print_octets(&bytes, 16), "payload normalized");
    Ok(NormalizedPayload {
        bytes,
        declared_content_type: extracted.content_type,
        declared_file_name: extracted.file_name,
    })
}

/// [`RawPayload::inspect`] followed by [`normalize`].
pub fn normalize_value(value: &Value) -> Result<NormalizedPayload, PayloadError> {
    normalize(RawPayload::inspect(value)?)
}

/// Description of a value that matched no payload variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadShape {
    pub kind: &'static str,
    /// Own keys when the value is an object.
    pub keys: Vec<String>,
}

impl PayloadShape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(map) => PayloadShape {
                kind: "object",
                keys: map.keys().cloned().collect(),
            },
            Value::Null => Self::scalar("null"),
            Value::Bool(_) => Self::scalar("bool"),
            Value::Number(_) => Self::scalar("number"),
            Value::String(_) => Self::scalar("string"),
            Value::Array(_) => Self::scalar("array"),
        }
    }

    pub fn scalar(kind: &'static str) -> Self {
        PayloadShape {
            kind,
            keys: Vec::new(),
        }
    }
}

impl std::fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind == "object" {
            write!(f, "object {{{}}}", self.keys.join(", "))
        } else {
            f.write_str(self.kind)
        }
    }
}

fn non_empty_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Values of an object whose keys are exactly `"0".."n-1"`, in index order.
/// An empty object counts as an empty array-like object.
fn array_like_values(map: &Map<String, Value>) -> Option<Vec<&Value>> {
    (0..map.len())
        .map(|index| map.get(index.to_string().as_str()))
        .collect()
}

fn bytes_from_values<'a>(values: impl IntoIterator<Item = &'a Value>) -> Option<Vec<u8>> {
    values
        .into_iter()
        .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn byte_array_is_bytes() {
        let payload = RawPayload::inspect(&json!([1, 2, 255])).unwrap();
        assert_eq!(payload, RawPayload::Bytes(vec![1, 2, 255]));
    }

    #[test]
    fn out_of_range_array_is_unsupported() {
        let err = RawPayload::inspect(&json!([1, 256])).unwrap_err();
        assert_eq!(
            err,
            PayloadError::UnsupportedPayloadShape {
                shape: PayloadShape::scalar("array")
            }
        );
        assert!(RawPayload::inspect(&json!([1, -1])).is_err());
        assert!(RawPayload::inspect(&json!([1, "2"])).is_err());
    }

    #[test]
    fn array_like_object_is_ordered_by_index() {
        let payload = RawPayload::inspect(&json!({"1": 66, "0": 65, "2": 67})).unwrap();
        assert_eq!(payload, RawPayload::ArrayLikeObject(b"ABC".to_vec()));
    }

    #[test]
    fn gapped_index_keys_are_not_array_like() {
        let err = RawPayload::inspect(&json!({"0": 1, "2": 3})).unwrap_err();
        match err {
            PayloadError::UnsupportedPayloadShape { shape } => {
                assert_eq!(shape.kind, "object");
                assert_eq!(shape.keys, vec!["0".to_string(), "2".to_string()]);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(RawPayload::inspect(&json!({"00": 1})).is_err());
    }

    #[test]
    fn wrapped_file_captures_metadata() {
        let payload = RawPayload::inspect(&json!({
            "fileContents": "aGVsbG8=",
            "contentType": "text/plain",
            "fileDownloadName": "note"
        }))
        .unwrap();
        assert_eq!(
            payload,
            RawPayload::WrappedFile {
                contents: Box::new(RawPayload::Base64String("aGVsbG8=".into())),
                declared_content_type: Some("text/plain".into()),
                declared_file_name: Some("note".into()),
            }
        );
        let normalized = normalize(payload).unwrap();
        assert_eq!(normalized.bytes.as_bytes(), b"hello");
        assert_eq!(normalized.declared_file_name.as_deref(), Some("note"));
    }

    #[test]
    fn wrapped_contents_may_use_conventional_field() {
        let normalized = normalize_value(&json!({
            "fileContents": {"type": "Buffer", "data": [37, 80, 68, 70]},
            "fileDownloadName": "scan.pdf"
        }))
        .unwrap();
        assert_eq!(normalized.bytes.as_bytes(), b"%PDF");
        assert_eq!(normalized.declared_content_type, None);
    }

    #[test]
    fn conventional_fields_are_checked_in_order() {
        let payload = RawPayload::inspect(&json!({"file": "Zg==", "content": [1]})).unwrap();
        assert_eq!(
            payload,
            RawPayload::GenericObject {
                field: "content",
                inner: Box::new(RawPayload::Bytes(vec![1])),
            }
        );
    }

    #[test]
    fn conventional_field_skips_non_byte_values() {
        let payload = RawPayload::inspect(&json!({"data": null, "base64": "AQ=="})).unwrap();
        assert_eq!(normalize(payload).unwrap().bytes.as_bytes(), &[1]);
    }

    #[test]
    fn nested_wrapped_file_in_field_is_unsupported() {
        let err = normalize_value(&json!({"data": {"fileContents": [1]}})).unwrap_err();
        assert!(matches!(err, PayloadError::UnsupportedPayloadShape { .. }));
    }

    #[test]
    fn scalars_are_unsupported() {
        for value in [json!(null), json!(true), json!(42)] {
            assert!(matches!(
                RawPayload::inspect(&value),
                Err(PayloadError::UnsupportedPayloadShape { .. })
            ));
        }
    }

    #[test]
    fn zero_length_payloads_are_empty() {
        for value in [json!([]), json!({}), json!(""), json!({"data": []})] {
            assert_eq!(normalize_value(&value), Err(PayloadError::EmptyPayload), "{value}");
        }
    }

    #[test]
    fn data_uri_mime_becomes_declared_type() {
        let normalized = normalize_value(&json!("data:image/gif;base64,R0lGODlh")).unwrap();
        assert_eq!(normalized.declared_content_type.as_deref(), Some("image/gif"));
        assert_eq!(normalized.bytes.as_bytes(), b"GIF89a");
    }

    #[test]
    fn shape_display_lists_keys() {
        let shape = PayloadShape::of(&json!({"id": 1, "name": "x"}));
        assert_eq!(shape.to_string(), "object {id, name}");
        assert_eq!(PayloadShape::of(&json!(1.5)).to_string(), "number");
    }
}
