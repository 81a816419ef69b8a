//! filegate-core - classify binary attachments before they are sent to a browser.
//!
//! Download endpoints receive file data from an upstream gateway in several
//! shapes (raw bytes, a wrapped "file content result", base64 text, array-like
//! objects). This crate turns any of those into one byte buffer, decides a
//! trustworthy MIME type and produces a filename with a matching extension.
//!
//! # Overview
//!
//! - [`RawPayload`] - shape inspection of an upstream value
//! - [`normalize`] - payload to [`ByteBuffer`]
//! - [`sniff_bytes`] / [`mime_for_file_name`] - content-type detection
//! - [`resolve_file_name`] - extension-safe filenames
//! - [`classify`] - the whole pipeline
//! - [`DownloadResponse`] / [`ErrorBody`] - what an HTTP layer writes out
//!
//! # Example
//!
//! ```
//! use filegate_core::{classify_value, ClassifierConfig, DownloadRequest};
//! use serde_json::json;
//!
//! let payload = json!({
//!     "fileContents": [0x25, 0x50, 0x44, 0x46, 0x2d, 0x31],
//!     "contentType": "application/json",
//!     "fileDownloadName": "handover"
//! });
//! let out = classify_value(&payload, &DownloadRequest::default(), &ClassifierConfig::default())
//!     .unwrap();
//! assert_eq!(out.content_type.mime, "application/pdf");
//! assert_eq!(out.file_name.as_str(), "handover.pdf");
//! ```

mod buffer;
mod classify;
mod config;
mod content_type;
mod error;
mod file_name;
mod mime_table;
mod payload;
mod response;
mod sniff;

pub use buffer::{print_octets, ByteBuffer};
pub use classify::{classify, classify_value, Classification, DownloadRequest};
pub use config::{ClassifierConfig, Profile};
pub use content_type::{reconcile, ContentTypeResult, OCTET_STREAM};
pub use error::{ClassifyError, ConfigError, PayloadError};
pub use file_name::{has_extension, resolve_file_name, ResolvedFileName};
pub use mime_table::{extension_for_mime, mime_for_extension, mime_for_file_name};
pub use payload::{normalize, normalize_value, NormalizedPayload, PayloadShape, RawPayload};
pub use response::{content_disposition, DownloadResponse, ErrorBody};
pub use sniff::{sniff_bytes, SNIFF_PREFIX_LEN};
