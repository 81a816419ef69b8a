//! Immutable, non-empty byte buffer produced by payload normalization.

use std::fmt::Write as _;
use std::ops::Deref;

use crate::error::PayloadError;

/// Bytes of one downloaded file.
///
/// A `ByteBuffer` is never empty: [`ByteBuffer::new`] rejects zero-length input
/// with [`PayloadError::EmptyPayload`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ByteBuffer {
    bytes: Box<[u8]>,
}

impl ByteBuffer {
    pub fn new(bytes: Vec<u8>) -> Result<Self, PayloadError> {
        if bytes.is_empty() {
            return Err(PayloadError::EmptyPayload);
        }
        Ok(Self {
            bytes: bytes.into_boxed_slice(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes.into_vec()
    }
}

impl Deref for ByteBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<Vec<u8>> for ByteBuffer {
    type Error = PayloadError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        ByteBuffer::new(bytes)
    }
}

impl std::fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ByteBuffer({} bytes: {})", self.len(), print_octets(self, 16))
    }
}

/// Formats the first `max` bytes as space separated hex, for log lines.
///
/// ```
/// use filegate_core::print_octets;
///
/// assert_eq!(print_octets(&[0x25, 0x50, 0x44, 0x46], 16), "25 50 44 46");
/// assert_eq!(print_octets(&[1, 2, 3], 2), "01 02... (1 more)");
/// ```
pub fn print_octets(octets: &[u8], max: usize) -> String {
    let mut out = String::with_capacity(octets.len().min(max) * 3);
    for (i, byte) in octets.iter().take(max).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02x}");
    }
    if octets.len() > max {
        let _ = write!(out, "... ({} more)", octets.len() - max);
    }
    out
}
