//! Magic-byte classification, one case per signature row.

use filegate_core::{mime_for_file_name, sniff_bytes, SNIFF_PREFIX_LEN};

fn with_padding(prefix: &[u8]) -> Vec<u8> {
    let mut out = prefix.to_vec();
    out.extend((0..40u8).map(|i| i.wrapping_mul(37)));
    out
}

fn riff(form: &[u8; 4]) -> Vec<u8> {
    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&[0x24, 0x08, 0x00, 0x00]);
    out.extend_from_slice(form);
    out
}

fn signature_cases() -> Vec<(Vec<u8>, &'static str)> {
    vec![
        (vec![0x25, 0x50, 0x44, 0x46], "application/pdf"),
        (vec![0xff, 0xd8, 0xff], "image/jpeg"),
        (vec![0x89, 0x50, 0x4e, 0x47], "image/png"),
        (vec![0x47, 0x49, 0x46], "image/gif"),
        (vec![0x42, 0x4d], "image/bmp"),
        (riff(b"WEBP"), "image/webp"),
        (riff(b"WAVE"), "audio/wav"),
        (vec![0x50, 0x4b, 0x03, 0x04], "application/zip"),
        (vec![0x52, 0x61, 0x72, 0x21], "application/x-rar-compressed"),
        (vec![0x37, 0x7a, 0xbc, 0xaf], "application/x-7z-compressed"),
        (vec![0x00, 0x00, 0x00, 0x20, 0x66, 0x74, 0x79, 0x70], "video/mp4"),
        (vec![0xff, 0xfb], "audio/mpeg"),
        (vec![0x49, 0x44, 0x33], "audio/mpeg"),
        (vec![0xd0, 0xcf, 0x11, 0xe0], "application/msword"),
    ]
}

#[test]
fn every_signature_row_classifies_with_padding() {
    for (prefix, mime) in signature_cases() {
        assert_eq!(sniff_bytes(&with_padding(&prefix)), Some(mime), "prefix {prefix:02x?}");
    }
}

#[test]
fn every_signature_row_classifies_without_padding() {
    for (prefix, mime) in signature_cases() {
        assert_eq!(sniff_bytes(&prefix), Some(mime), "prefix {prefix:02x?}");
    }
}

#[test]
fn legacy_compound_document_is_always_word() {
    // Excel 97-2003 workbooks share the compound document header.
    let xls = with_padding(&[0xd0, 0xcf, 0x11, 0xe0, 0xa1, 0xb1, 0x1a, 0xe1]);
    assert_eq!(sniff_bytes(&xls), Some("application/msword"));
}

#[test]
fn ooxml_promotion_by_entry_name() {
    let cases = [
        ("word/document.xml", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        ("xl/workbook.xml", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        ("ppt/presentation.xml", "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
    ];
    for (entry, mime) in cases {
        let mut zip = vec![0x50, 0x4b, 0x03, 0x04, 0x14, 0x00, 0x06, 0x00];
        zip.extend_from_slice(&[0u8; 22]);
        zip.extend_from_slice(entry.as_bytes());
        assert_eq!(sniff_bytes(&zip), Some(mime), "{entry}");
    }
}

#[test]
fn only_the_prefix_is_inspected_for_signatures() {
    let mut text = vec![b' '; SNIFF_PREFIX_LEN];
    text.extend_from_slice(b"%PDF-1.4");
    assert_eq!(sniff_bytes(&text), None);
}

#[test]
fn unknown_formats_fall_through() {
    for bytes in [&b"<html></html>"[..], b"{\"a\":1}", b"\x00\x00\x00\x00", b"\x1f\x8b\x08"] {
        assert_eq!(sniff_bytes(bytes), None, "{bytes:02x?}");
    }
}

#[test]
fn extension_table_covers_listed_formats() {
    let cases = [
        ("a.pdf", "application/pdf"),
        ("a.JPG", "image/jpeg"),
        ("a.jpeg", "image/jpeg"),
        ("a.png", "image/png"),
        ("a.gif", "image/gif"),
        ("a.bmp", "image/bmp"),
        ("a.webp", "image/webp"),
        ("a.doc", "application/msword"),
        ("a.docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        ("a.xls", "application/vnd.ms-excel"),
        ("a.xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        ("a.ppt", "application/vnd.ms-powerpoint"),
        ("a.pptx", "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
        ("a.txt", "text/plain"),
        ("a.csv", "text/csv"),
        ("a.zip", "application/zip"),
        ("a.rar", "application/x-rar-compressed"),
        ("a.7z", "application/x-7z-compressed"),
        ("a.mp4", "video/mp4"),
        ("a.avi", "video/x-msvideo"),
        ("a.mov", "video/quicktime"),
        ("a.mp3", "audio/mpeg"),
        ("a.wav", "audio/wav"),
    ];
    for (name, mime) in cases {
        assert_eq!(mime_for_file_name(name), Some(mime), "{name}");
    }
    assert_eq!(mime_for_file_name("a.heic"), None);
}
