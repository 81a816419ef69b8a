//! Magic-byte table, in match priority order.

use crate::mime_table::{
    MIME_7Z, MIME_BMP, MIME_DOC, MIME_GIF, MIME_JPEG, MIME_MP3, MIME_MP4, MIME_PDF, MIME_PNG,
    MIME_RAR, MIME_WAV, MIME_WEBP, MIME_ZIP,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Matcher {
    /// Bytes at offset 0.
    Prefix(&'static [u8]),
    /// Bytes at a fixed offset.
    At(usize, &'static [u8]),
    /// `RIFF` container with the given form type at bytes 8-11.
    Riff(&'static [u8; 4]),
    /// MPEG audio frame sync (`FF` + top three bits set) or an `ID3` tag.
    MpegAudio,
}

impl Matcher {
    pub(crate) fn matches(self, head: &[u8]) -> bool {
        match self {
            Matcher::Prefix(magic) => head.starts_with(magic),
            Matcher::At(offset, magic) => head
                .get(offset..offset + magic.len())
                .is_some_and(|window| window == magic),
            Matcher::Riff(form) => head.starts_with(b"RIFF") && head.get(8..12) == Some(&form[..]),
            Matcher::MpegAudio => match head {
                [0xff, second, ..] if second & 0xe0 == 0xe0 => true,
                _ => head.starts_with(b"ID3"),
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Signature {
    pub matcher: Matcher,
    pub mime: &'static str,
}

const fn sig(matcher: Matcher, mime: &'static str) -> Signature {
    Signature { matcher, mime }
}

/// Zip is listed with its container type; the caller promotes it to an
/// Office Open XML type by scanning entry names.
///
/// `D0 CF 11 E0` is the legacy compound document header shared by Word,
/// Excel and PowerPoint. It is always reported as Word.
pub(crate) const SIGNATURES: &[Signature] = &[
    sig(Matcher::Prefix(&[0x25, 0x50, 0x44, 0x46]), MIME_PDF),
    sig(Matcher::Prefix(&[0xff, 0xd8, 0xff]), MIME_JPEG),
    sig(Matcher::Prefix(&[0x89, 0x50, 0x4e, 0x47]), MIME_PNG),
    sig(Matcher::Prefix(&[0x47, 0x49, 0x46]), MIME_GIF),
    sig(Matcher::Prefix(&[0x42, 0x4d]), MIME_BMP),
    sig(Matcher::Riff(b"WEBP"), MIME_WEBP),
    sig(Matcher::Riff(b"WAVE"), MIME_WAV),
    sig(Matcher::Prefix(&[0x50, 0x4b]), MIME_ZIP),
    sig(Matcher::Prefix(&[0x52, 0x61, 0x72, 0x21]), MIME_RAR),
    sig(Matcher::Prefix(&[0x37, 0x7a, 0xbc, 0xaf]), MIME_7Z),
    sig(Matcher::At(4, b"ftyp"), MIME_MP4),
    sig(Matcher::MpegAudio, MIME_MP3),
    sig(Matcher::Prefix(&[0xd0, 0xcf, 0x11, 0xe0]), MIME_DOC),
];
