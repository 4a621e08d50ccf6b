//! Little-endian primitives shared by every codec.

use garnet_ir::Location;

/// Growable output buffer.
#[derive(Default)]
pub(crate) struct Writer {
    bytes: Vec<u8>,
}

impl Writer {
    pub(crate) fn new() -> Self {
        Writer::default()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub(crate) fn u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    #[inline]
    pub(crate) fn u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub(crate) fn u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub(crate) fn i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    #[inline]
    pub(crate) fn u64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub(crate) fn raw(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub(crate) fn bool(&mut self, value: bool) {
        self.u8(u8::from(value));
    }

    /// `u64` element count of a list.
    pub(crate) fn count(&mut self, count: usize) {
        self.u64(count as u64);
    }

    /// `u32` length followed by the bytes.
    ///
    /// Everything written this way is a slice of, or derived from, a source
    /// whose offsets fit in `u32`.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn bytes(&mut self, bytes: &[u8]) {
        debug_assert!(u32::try_from(bytes.len()).is_ok());
        self.u32(bytes.len() as u32);
        self.raw(bytes);
    }

    pub(crate) fn location(&mut self, location: Location) {
        self.u64(u64::from(location.start));
        self.u64(u64::from(location.end));
    }

    /// Overwrite a `u64` written earlier at `at`.
    pub(crate) fn patch_u64(&mut self, at: usize, value: u64) {
        self.bytes[at..at + 8].copy_from_slice(&value.to_le_bytes());
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

/// A read ran past the end of the input.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Short {
    pub offset: usize,
    pub needed: usize,
}

/// Bounds-checked cursor over an input buffer.
pub(crate) struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, offset: 0 }
    }

    pub(crate) fn at(bytes: &'a [u8], offset: usize) -> Self {
        Reader { bytes, offset }
    }

    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    pub(crate) fn take(&mut self, len: usize) -> Result<&'a [u8], Short> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(Short {
                offset: self.offset,
                needed: len - remaining,
            });
        }
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], Short> {
        let mut out = [0; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub(crate) fn u8(&mut self) -> Result<u8, Short> {
        Ok(self.array::<1>()?[0])
    }

    pub(crate) fn u16(&mut self) -> Result<u16, Short> {
        self.array().map(u16::from_le_bytes)
    }

    pub(crate) fn u32(&mut self) -> Result<u32, Short> {
        self.array().map(u32::from_le_bytes)
    }

    pub(crate) fn i32(&mut self) -> Result<i32, Short> {
        self.array().map(i32::from_le_bytes)
    }

    pub(crate) fn u64(&mut self) -> Result<u64, Short> {
        self.array().map(u64::from_le_bytes)
    }

    pub(crate) fn magic(&mut self) -> Result<[u8; 4], Short> {
        self.array()
    }

    pub(crate) fn version(&mut self) -> Result<[u8; 3], Short> {
        self.array()
    }

    /// `u32` length followed by that many bytes.
    pub(crate) fn bytes(&mut self) -> Result<&'a [u8], Short> {
        let len = self.u32()? as usize;
        self.take(len)
    }

    /// `u64` element count, clamped to what a `usize` can index.
    ///
    /// A count larger than the input can hold fails on the first element
    /// that runs out of bytes.
    pub(crate) fn count(&mut self) -> Result<usize, Short> {
        let count = self.u64()?;
        Ok(usize::try_from(count).unwrap_or(usize::MAX))
    }

    /// Capacity hint for a list of `count` elements of at least
    /// `min_size` bytes each.
    pub(crate) fn capacity(&self, count: usize, min_size: usize) -> usize {
        count.min(self.remaining() / min_size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn primitives_are_little_endian() {
        let mut writer = Writer::new();
        writer.u16(0x0102);
        writer.u32(0x0304_0506);
        writer.i32(-1);
        assert_eq!(writer.finish(), vec![0x02, 0x01, 0x06, 0x05, 0x04, 0x03, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn patched_length_overwrites_placeholder() {
        let mut writer = Writer::new();
        writer.u8(7);
        writer.u64(0);
        writer.patch_u64(1, 9);
        let bytes = writer.finish();
        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.u8(), Ok(7));
        assert_eq!(reader.u64(), Ok(9));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn short_read_reports_offset_and_shortfall() {
        let mut reader = Reader::new(&[1, 2, 3]);
        assert_eq!(reader.u8(), Ok(1));
        assert_eq!(reader.u32(), Err(Short { offset: 1, needed: 2 }));
    }

    #[test]
    fn length_prefixed_bytes() {
        let mut writer = Writer::new();
        writer.bytes(b"abc");
        let bytes = writer.finish();
        assert_eq!(Reader::new(&bytes).bytes(), Ok(&b"abc"[..]));
    }

    #[test]
    fn capacity_is_bounded_by_input() {
        let reader = Reader::new(&[0; 16]);
        assert_eq!(reader.capacity(usize::MAX, 8), 2);
        assert_eq!(reader.capacity(1, 8), 1);
    }
}
