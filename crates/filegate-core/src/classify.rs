//! The full pipeline: normalize, sniff and reconcile, resolve the filename.

use serde_json::Value;
use tracing::debug;

use crate::buffer::ByteBuffer;
use crate::config::ClassifierConfig;
use crate::content_type::{reconcile, ContentTypeResult};
use crate::error::ClassifyError;
use crate::file_name::{resolve_file_name, ResolvedFileName};
use crate::mime_table::mime_for_file_name;
use crate::payload::{normalize, RawPayload};

/// What the HTTP request contributes to classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Name the caller knows the file by, used when the upstream declares none.
    pub file_name: Option<String>,
    /// Filename passed as a query parameter.
    pub file_name_override: Option<String>,
}

impl DownloadRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn with_override(mut self, name: impl Into<String>) -> Self {
        self.file_name_override = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub bytes: ByteBuffer,
    pub content_type: ContentTypeResult,
    pub file_name: ResolvedFileName,
}

/// Runs the pipeline on an inspected payload.
pub fn classify(
    payload: RawPayload,
    request: &DownloadRequest,
    config: &ClassifierConfig,
) -> Result<Classification, ClassifyError> {
    let normalized = normalize(payload)?;

    let base = normalized
        .declared_file_name
        .as_deref()
        .or(request.file_name.as_deref())
        .unwrap_or_default();
    let file_name_override = request.file_name_override.as_deref();

    let declared = normalized
        .declared_content_type
        .as_deref()
        .or_else(|| mime_for_file_name(base))
        .or_else(|| file_name_override.and_then(mime_for_file_name))
        .or(config.default_content_type.as_deref());

    let content_type = reconcile(declared, &normalized.bytes, config);
    let file_name = resolve_file_name(
        base,
        file_name_override,
        &content_type.mime,
        &config.default_extension,
        &config.fallback_file_name,
    );

    debug!(
        mime = %content_type.mime,
        detected = content_type.detected,
        file_name = %file_name,
        len = normalized.bytes.len(),
        "attachment classified"
    );

    Ok(Classification {
        bytes: normalized.bytes,
        content_type,
        file_name,
    })
}

/// Inspects an upstream JSON value and runs the pipeline on it.
pub fn classify_value(
    value: &Value,
    request: &DownloadRequest,
    config: &ClassifierConfig,
) -> Result<Classification, ClassifyError> {
    let payload = RawPayload::inspect(value)?;
    classify(payload, request, config)
}
