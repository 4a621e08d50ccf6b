//! Magic comment recognition.
//!
//! Two shapes are accepted: a comment that is exactly `key: value`, and the
//! Emacs form `-*- key: value; key: value -*-`. Offsets are relative to the
//! comment text after `#`.

/// One `key: value` pair, as offsets into the comment text.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct MagicPair {
    pub key: (u32, u32),
    pub value: (u32, u32),
}

impl MagicPair {
    pub fn key<'a>(&self, text: &'a [u8]) -> &'a [u8] {
        &text[self.key.0 as usize..self.key.1 as usize]
    }

    pub fn value<'a>(&self, text: &'a [u8]) -> &'a [u8] {
        &text[self.value.0 as usize..self.value.1 as usize]
    }
}

/// Compare magic comment keys; `-` and `_` are interchangeable and case is
/// ignored.
pub(crate) fn key_is(key: &[u8], expected: &str) -> bool {
    key.len() == expected.len()
        && key.iter().zip(expected.bytes()).all(|(&a, b)| {
            let a = if a == b'-' { b'_' } else { a.to_ascii_lowercase() };
            a == b
        })
}

pub(crate) fn pairs(text: &[u8]) -> Vec<MagicPair> {
    if let Some(open) = find(text, b"-*-", 0) {
        let inner_start = open + 3;
        return match find(text, b"-*-", inner_start) {
            Some(close) => emacs_pairs(text, inner_start, close),
            None => Vec::new(),
        };
    }
    single_pair(text).into_iter().collect()
}

/// `coding: x` or `coding=x` anywhere in the comment, as editors write it
/// (`# vim: set fileencoding=utf-8`).
pub(crate) fn coding_anywhere(text: &[u8]) -> Option<MagicPair> {
    let at = find(text, b"coding", 0)?;
    let mut pos = at + 6;
    if !matches!(text.get(pos), Some(b':' | b'=')) {
        return None;
    }
    pos += 1;
    while matches!(text.get(pos), Some(b' ' | b'\t')) {
        pos += 1;
    }
    let value_start = pos;
    while matches!(text.get(pos), Some(b) if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.')) {
        pos += 1;
    }
    (pos > value_start).then(|| pair(at, at + 6, value_start, pos))
}

fn single_pair(text: &[u8]) -> Option<MagicPair> {
    let mut pos = skip_space(text, 0);
    let key_start = pos;
    while matches!(text.get(pos), Some(b) if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_')) {
        pos += 1;
    }
    let key_end = pos;
    if key_end == key_start {
        return None;
    }
    pos = skip_space(text, pos);
    if text.get(pos) != Some(&b':') {
        return None;
    }
    pos = skip_space(text, pos + 1);
    let value_start = pos;
    while matches!(text.get(pos), Some(b) if !b.is_ascii_whitespace() && *b != b';') {
        pos += 1;
    }
    let value_end = pos;
    if value_end == value_start || skip_space(text, pos) != text.len() {
        return None;
    }
    Some(pair(key_start, key_end, value_start, value_end))
}

fn emacs_pairs(text: &[u8], start: usize, end: usize) -> Vec<MagicPair> {
    let mut out = Vec::new();
    let mut pos = start;
    while pos < end {
        pos = skip_space(text, pos);
        let key_start = pos;
        while pos < end && !matches!(text[pos], b':' | b';') && !text[pos].is_ascii_whitespace() {
            pos += 1;
        }
        let key_end = pos;
        pos = skip_space(text, pos).min(end);
        if pos >= end || text[pos] != b':' {
            // Skip a malformed entry up to the next separator.
            while pos < end && text[pos] != b';' {
                pos += 1;
            }
            pos += 1;
            continue;
        }
        pos = skip_space(text, pos + 1).min(end);
        let value_start = pos;
        while pos < end && text[pos] != b';' && !text[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if key_end > key_start && pos > value_start {
            out.push(pair(key_start, key_end, value_start, pos));
        }
        while pos < end && text[pos] != b';' {
            pos += 1;
        }
        pos += 1;
    }
    out
}

fn skip_space(text: &[u8], mut pos: usize) -> usize {
    while matches!(text.get(pos), Some(b' ' | b'\t' | b'\r')) {
        pos += 1;
    }
    pos
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|i| i + from)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "comment text is a slice of a source capped at u32::MAX bytes"
)]
fn pair(key_start: usize, key_end: usize, value_start: usize, value_end: usize) -> MagicPair {
    MagicPair {
        key: (key_start as u32, key_end as u32),
        value: (value_start as u32, value_end as u32),
    }
}

#[cfg(test)]
mod tests;
