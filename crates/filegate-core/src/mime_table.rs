//! Extension <-> MIME type tables.

pub(crate) const MIME_PDF: &str = "application/pdf";
pub(crate) const MIME_JPEG: &str = "image/jpeg";
pub(crate) const MIME_PNG: &str = "image/png";
pub(crate) const MIME_GIF: &str = "image/gif";
pub(crate) const MIME_BMP: &str = "image/bmp";
pub(crate) const MIME_WEBP: &str = "image/webp";
pub(crate) const MIME_DOC: &str = "application/msword";
pub(crate) const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub(crate) const MIME_XLS: &str = "application/vnd.ms-excel";
pub(crate) const MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub(crate) const MIME_PPT: &str = "application/vnd.ms-powerpoint";
pub(crate) const MIME_PPTX: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";
pub(crate) const MIME_TXT: &str = "text/plain";
pub(crate) const MIME_CSV: &str = "text/csv";
pub(crate) const MIME_ZIP: &str = "application/zip";
pub(crate) const MIME_RAR: &str = "application/x-rar-compressed";
pub(crate) const MIME_7Z: &str = "application/x-7z-compressed";
pub(crate) const MIME_MP4: &str = "video/mp4";
pub(crate) const MIME_AVI: &str = "video/x-msvideo";
pub(crate) const MIME_MOV: &str = "video/quicktime";
pub(crate) const MIME_MP3: &str = "audio/mpeg";
pub(crate) const MIME_WAV: &str = "audio/wav";

/// Extension to MIME. The first row for a MIME type is its preferred
/// extension in the reverse direction (`image/jpeg -> jpg`).
const EXTENSIONS: &[(&str, &str)] = &[
    ("pdf", MIME_PDF),
    ("jpg", MIME_JPEG),
    ("jpeg", MIME_JPEG),
    ("png", MIME_PNG),
    ("gif", MIME_GIF),
    ("bmp", MIME_BMP),
    ("webp", MIME_WEBP),
    ("doc", MIME_DOC),
    ("docx", MIME_DOCX),
    ("xls", MIME_XLS),
    ("xlsx", MIME_XLSX),
    ("ppt", MIME_PPT),
    ("pptx", MIME_PPTX),
    ("txt", MIME_TXT),
    ("csv", MIME_CSV),
    ("zip", MIME_ZIP),
    ("rar", MIME_RAR),
    ("7z", MIME_7Z),
    ("mp4", MIME_MP4),
    ("avi", MIME_AVI),
    ("mov", MIME_MOV),
    ("mp3", MIME_MP3),
    ("wav", MIME_WAV),
];

/// Case-insensitive extension lookup, without the leading dot.
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    EXTENSIONS
        .iter()
        .find(|(e, _)| e.eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
}

/// Looks up the text after the last `.` of `file_name`.
///
/// ```
/// use filegate_core::mime_for_file_name;
///
/// assert_eq!(mime_for_file_name("Scan.JPEG"), Some("image/jpeg"));
/// assert_eq!(mime_for_file_name("archive.tar.gz"), None);
/// assert_eq!(mime_for_file_name("README"), None);
/// ```
pub fn mime_for_file_name(file_name: &str) -> Option<&'static str> {
    let (_, ext) = file_name.rsplit_once('.')?;
    mime_for_extension(ext)
}

/// Preferred extension for a MIME type. Parameters (`; charset=...`) and
/// case are ignored.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    let essence = essence(mime);
    EXTENSIONS
        .iter()
        .find(|(_, m)| m.eq_ignore_ascii_case(essence))
        .map(|(ext, _)| *ext)
}

/// `type/subtype` without parameters or surrounding whitespace.
pub(crate) fn essence(mime: &str) -> &str {
    mime.split(';').next().unwrap_or_default().trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_lookup_prefers_first_extension() {
        assert_eq!(extension_for_mime("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for_mime("Application/PDF; charset=binary"), Some("pdf"));
        assert_eq!(extension_for_mime("application/octet-stream"), None);
    }

    #[test]
    fn every_extension_round_trips_to_its_mime() {
        for (ext, mime) in EXTENSIONS {
            assert_eq!(mime_for_extension(ext), Some(*mime));
            let preferred = extension_for_mime(mime).unwrap();
            assert_eq!(mime_for_extension(preferred), Some(*mime));
        }
    }

    #[test]
    fn trailing_dot_has_no_extension() {
        assert_eq!(mime_for_file_name("report."), None);
        assert_eq!(mime_for_file_name(".pdf"), Some("application/pdf"));
    }
}
