//! The source buffer a tree was parsed from, with a line-offset table.

/// Borrowed source bytes plus the offsets where each line starts.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Source<'src> {
    bytes: &'src [u8],
    start_line: i32,
    line_offsets: Vec<u32>,
}

impl<'src> Source<'src> {
    /// Index `bytes`. `start_line` is the number of the first line.
    pub fn new(bytes: &'src [u8], start_line: i32) -> Self {
        let mut line_offsets = vec![0];
        line_offsets.extend(
            memchr::memchr_iter(b'\n', bytes).map(|i| u32::try_from(i + 1).unwrap_or(u32::MAX)),
        );
        Source {
            bytes,
            start_line,
            line_offsets,
        }
    }

    #[inline]
    pub fn bytes(&self) -> &'src [u8] {
        self.bytes
    }

    #[inline]
    pub fn start_line(&self) -> i32 {
        self.start_line
    }

    /// Byte offset of the start of every line.
    pub fn line_offsets(&self) -> &[u32] {
        &self.line_offsets
    }

    /// 1-based line (shifted by the start line) and 0-based byte column.
    pub fn line_column(&self, offset: u32) -> (i32, u32) {
        let index = match self.line_offsets.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index.saturating_sub(1),
        };
        let line = self
            .start_line
            .saturating_add(i32::try_from(index).unwrap_or(i32::MAX));
        (line, offset - self.line_offsets[index])
    }

    /// Full text of the line containing `offset`, without its newline.
    pub fn line_text(&self, offset: u32) -> &'src [u8] {
        let (line, _) = self.line_column(offset);
        let index = usize::try_from(line.saturating_sub(self.start_line)).unwrap_or(0);
        let start = self.line_offsets.get(index).copied().unwrap_or(0) as usize;
        let end = self
            .line_offsets
            .get(index + 1)
            .map_or(self.bytes.len(), |&next| next as usize - 1);
        self.bytes.get(start..end.max(start)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests;
