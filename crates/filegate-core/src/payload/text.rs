//! String payload decoding: optional data URI header, base64, latin1 fallback.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use tracing::debug;

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DecodedString {
    pub bytes: Vec<u8>,
    /// MIME type taken from a `data:<mime>;base64,` header, if present.
    pub data_uri_mime: Option<String>,
}

/// Decodes a string payload. Never fails: text that is not base64 is read
/// as latin1, one byte per character.
pub(crate) fn decode_string(text: &str) -> DecodedString {
    let (data_uri_mime, body) = split_data_uri(text);
    if let Some(mime) = &data_uri_mime {
        debug!(mime = %mime, "payload string carries a data URI header");
    }
    let bytes = match decode_base64(body) {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(error = %err, len = body.len(), "payload string is not base64, decoding as latin1");
            latin1_bytes(body)
        }
    };
    DecodedString {
        bytes,
        data_uri_mime,
    }
}

/// Standard alphabet first, URL-safe alphabet second. Padding is optional,
/// non-zero trailing bits are accepted and ASCII whitespace (wrapped lines)
/// is ignored.
pub(crate) fn decode_base64(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: std::borrow::Cow<'_, str> = if text.bytes().any(|b| b.is_ascii_whitespace()) {
        text.chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect::<String>()
            .into()
    } else {
        text.into()
    };
    match STANDARD_LENIENT.decode(compact.as_bytes()) {
        Ok(bytes) => Ok(bytes),
        Err(err) if compact.contains(['-', '_']) => {
            URL_SAFE_LENIENT.decode(compact.as_bytes()).map_err(|_| err)
        }
        Err(err) => Err(err),
    }
}

/// Low eight bits of every code point, like a latin1 byte decoder.
pub(crate) fn latin1_bytes(text: &str) -> Vec<u8> {
    text.chars().map(|c| (c as u32 & 0xff) as u8).collect()
}

/// Splits `data:<mime>[;param]*;base64,<body>` into the MIME type and body.
/// Anything else is returned unchanged with no MIME type.
fn split_data_uri(text: &str) -> (Option<String>, &str) {
    let Some(rest) = text
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &text[5..])
    else {
        return (None, text);
    };
    let Some(comma) = rest.find(',') else {
        return (None, text);
    };
    let header = &rest[..comma];
    if !header.to_ascii_lowercase().ends_with(";base64") {
        return (None, text);
    }
    let mime = header
        .split(';')
        .next()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_ascii_lowercase);
    (mime, &rest[comma + 1..])
}
