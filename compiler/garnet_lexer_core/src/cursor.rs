//! Byte cursor over a [`SourceBuffer`](crate::SourceBuffer).
//!
//! The cursor never moves past the end of the source: every advance is
//! clamped to `source_len`, where the sentinel `0x00` lives. Reads past the
//! padding return `0`, so callers can treat `0` at EOF as a terminator.

/// A forward-mostly byte cursor.
///
/// The lexer rewinds only to positions it previously recorded (heredoc
/// bodies are lexed out of line and scanning resumes after the marker).
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: u32,
    source_len: u32,
}

const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    #[inline]
    pub fn current(&self) -> u8 {
        self.peek_at(0)
    }

    #[inline]
    pub fn peek(&self) -> u8 {
        self.peek_at(1)
    }

    #[inline]
    pub fn peek2(&self) -> u8 {
        self.peek_at(2)
    }

    /// Byte `n` positions ahead, or `0` past the end of the buffer.
    #[inline]
    pub fn peek_at(&self, n: u32) -> u8 {
        self.buf
            .get(self.pos as usize + n as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Byte at an absolute offset, or `0` past the end of the buffer.
    #[inline]
    pub fn byte_at(&self, offset: u32) -> u8 {
        self.buf.get(offset as usize).copied().unwrap_or(0)
    }

    #[inline]
    pub fn advance(&mut self) {
        self.advance_n(1);
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos = self.pos.saturating_add(n).min(self.source_len);
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Move to an absolute position, clamped to the end of the source.
    #[inline]
    pub fn set_pos(&mut self, pos: u32) {
        self.pos = pos.min(self.source_len);
    }

    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Source bytes in `[start, end)`, clamped to the source.
    pub fn slice(&self, start: u32, end: u32) -> &'a [u8] {
        let end = end.min(self.source_len) as usize;
        let start = (start as usize).min(end);
        &self.buf[start..end]
    }

    pub fn slice_from(&self, start: u32) -> &'a [u8] {
        self.slice(start, self.pos)
    }

    /// Source bytes from the cursor to the end.
    pub fn rest(&self) -> &'a [u8] {
        self.slice(self.pos, self.source_len)
    }

    /// Whether the source at the cursor starts with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.rest().starts_with(prefix)
    }

    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Skip spaces, tabs, form feeds, and vertical tabs.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(|b| matches!(b, b' ' | b'\t' | b'\x0c' | b'\x0b'));
    }

    /// Move to the next `\n` (not past it), or to EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        match memchr::memchr(b'\n', self.rest()) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source_len,
        }
    }

    /// Offset of the next `byte` at or after `from`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < remaining.len() <= source_len which fits in u32"
    )]
    pub fn find_from(&self, from: u32, byte: u8) -> Option<u32> {
        let remaining = self.slice(from, self.source_len);
        memchr::memchr(byte, remaining).map(|offset| from + offset as u32)
    }

    /// Offset just past the end of the line containing `offset` (after its
    /// `\n`), or the end of the source.
    pub fn next_line_start(&self, offset: u32) -> u32 {
        self.find_from(offset, b'\n')
            .map_or(self.source_len, |newline| newline + 1)
    }

    /// Whether `offset` is at the start of a line.
    pub fn is_line_start(&self, offset: u32) -> bool {
        offset == 0 || self.byte_at(offset - 1) == b'\n'
    }
}

#[cfg(test)]
mod tests;
