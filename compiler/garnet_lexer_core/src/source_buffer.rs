//! Sentinel-terminated source buffer.
//!
//! The buffer guarantees `0x00` bytes after the source content. The total
//! size is rounded up to the next 64-byte boundary, which also gives
//! `peek()` and `peek2()` safe padding near the end of the buffer.

use crate::Cursor;

const CACHE_LINE: usize = 64;

/// UTF-8 byte order mark, skipped before lexing.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    buf: Vec<u8>,
    source_len: u32,
    bom_len: u32,
}

impl SourceBuffer {
    /// Copy `source` into a padded buffer.
    ///
    /// Sources longer than `u32::MAX` bytes are truncated to that length;
    /// locations are 32-bit.
    pub fn new(source: &[u8]) -> Self {
        let source_len = source.len().min(u32::MAX as usize - CACHE_LINE);
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(&source[..source_len]);

        let bom_len = if source.starts_with(UTF8_BOM) { 3 } else { 0 };

        Self {
            buf,
            source_len: u32::try_from(source_len).unwrap_or(u32::MAX),
            bom_len,
        }
    }

    /// The source bytes, without sentinel or padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Cursor positioned after the byte order mark, if any.
    pub fn cursor(&self) -> Cursor<'_> {
        let mut cursor = Cursor::new(&self.buf, self.source_len);
        cursor.set_pos(self.bom_len);
        cursor
    }

    pub fn len(&self) -> u32 {
        self.source_len
    }

    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Length of the leading UTF-8 byte order mark (0 or 3).
    pub fn bom_len(&self) -> u32 {
        self.bom_len
    }
}

#[cfg(test)]
mod tests;
