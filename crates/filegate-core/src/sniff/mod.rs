//! Content-type detection from leading bytes.

mod signatures;

use tracing::debug;

use crate::mime_table::{MIME_DOCX, MIME_PPTX, MIME_XLSX, MIME_ZIP};

use signatures::SIGNATURES;

/// Bytes inspected for a signature match.
pub const SNIFF_PREFIX_LEN: usize = 16;

/// Bytes of a zip archive scanned for Office Open XML entry names.
const ZIP_SCAN_LEN: usize = 100;

/// Entry name prefixes promoting a zip archive, checked in this order.
const OOXML_MARKERS: [(&[u8], &str); 3] = [
    (b"word/", MIME_DOCX),
    (b"xl/", MIME_XLSX),
    (b"ppt/", MIME_PPTX),
];

/// Guesses a MIME type from magic bytes. `None` means unknown.
///
/// ```
/// use filegate_core::sniff_bytes;
///
/// assert_eq!(sniff_bytes(b"%PDF-1.7\n"), Some("application/pdf"));
/// assert_eq!(sniff_bytes(b"plain text"), None);
/// ```
pub fn sniff_bytes(bytes: &[u8]) -> Option<&'static str> {
    let head = &bytes[..bytes.len().min(SNIFF_PREFIX_LEN)];
    let signature = SIGNATURES.iter().find(|s| s.matcher.matches(head))?;
    let mime = if signature.mime == MIME_ZIP {
        promote_zip(bytes)
    } else {
        signature.mime
    };
    debug!(mime, "content type sniffed from bytes");
    Some(mime)
}

fn promote_zip(bytes: &[u8]) -> &'static str {
    let scan = &bytes[..bytes.len().min(ZIP_SCAN_LEN)];
    OOXML_MARKERS
        .iter()
        .find(|(marker, _)| scan.windows(marker.len()).any(|w| w == *marker))
        .map_or(MIME_ZIP, |(_, mime)| *mime)
}
