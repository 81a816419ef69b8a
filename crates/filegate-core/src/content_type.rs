//! Reconciling a declared content type with what the bytes say.

use serde::de::IgnoredAny;
use serde::Serialize;
use tracing::debug;

use crate::config::ClassifierConfig;
use crate::mime_table::essence;
use crate::sniff::sniff_bytes;

pub const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentTypeResult {
    pub mime: String,
    /// `true` when the type comes from the bytes themselves.
    pub detected: bool,
}

impl ContentTypeResult {
    fn declared(mime: impl Into<String>) -> Self {
        Self {
            mime: mime.into(),
            detected: false,
        }
    }

    fn detected(mime: &str) -> Self {
        Self {
            mime: mime.to_string(),
            detected: true,
        }
    }
}

/// Final content type for `bytes` given the type the caller believes in.
///
/// 1. A declared JSON type on a payload that is not JSON is replaced by the
///    configured default.
/// 2. A signature match wins over whatever was declared, even when the
///    match is a plain zip or compound document declared as an Office type.
/// 3. With nothing left, [`OCTET_STREAM`].
pub fn reconcile(
    declared: Option<&str>,
    bytes: &[u8],
    config: &ClassifierConfig,
) -> ContentTypeResult {
    let mut declared = declared
        .map(essence)
        .filter(|m| !m.is_empty())
        .map(str::to_ascii_lowercase);

    if declared.as_deref().is_some_and(|m| m.contains("json")) && !looks_like_json(bytes) {
        debug!(
            declared = ?declared,
            default = ?config.default_content_type,
            "declared json type on binary payload replaced by default"
        );
        declared = config.default_content_type.clone();
    }

    if let Some(sniffed) = sniff_bytes(bytes) {
        if declared.as_deref() != Some(sniffed) {
            debug!(declared = ?declared, sniffed, "sniffed type overrides declared type");
        }
        return ContentTypeResult::detected(sniffed);
    }

    declared.map_or_else(
        || ContentTypeResult::declared(OCTET_STREAM),
        ContentTypeResult::declared,
    )
}

fn looks_like_json(bytes: &[u8]) -> bool {
    serde_json::from_slice::<IgnoredAny>(bytes).is_ok()
}
