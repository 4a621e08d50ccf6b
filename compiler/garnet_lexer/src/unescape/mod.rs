//! Escape processing for string-like literal content.
//!
//! [`unescape`] is pure: it takes the raw bytes between the delimiters and
//! a [`Strictness`], and returns the processed bytes plus what the encoding
//! classification needs to know about them. Errors are reported with
//! offsets relative to the input; callers shift them to source offsets.

use garnet_diagnostic::DiagnosticId;
use garnet_ir::Encoding;

/// Which escapes a literal honours.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Strictness {
    /// Regexp bodies: escapes are left for the regexp engine. Only an
    /// escaped non-bracket delimiter loses its backslash.
    None,
    /// Single-quoted literals: `\\` and escaped delimiters.
    Minimal,
    /// Double-quoted and interpolating literals: every escape form.
    All,
}

/// Delimiters of the literal being unescaped.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Delimiters {
    pub terminator: u8,
    /// Nesting opener, or 0.
    pub incrementor: u8,
    /// `%w`/`%i` words: an escaped whitespace byte stands for itself.
    pub words: bool,
}

impl Delimiters {
    pub const fn new(terminator: u8, incrementor: u8) -> Self {
        Delimiters {
            terminator,
            incrementor,
            words: false,
        }
    }

    /// Heredocs, character literals, and other bodies with no closing byte.
    pub const NONE: Delimiters = Delimiters::new(0, 0);

    fn is_delimiter(self, byte: u8) -> bool {
        byte != 0 && (byte == self.terminator || byte == self.incrementor)
    }
}

/// An escape the literal could not process.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EscapeError {
    pub id: DiagnosticId,
    pub start: u32,
    pub end: u32,
}

/// How a literal's bytes relate to the source encoding.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ForcedEncoding {
    /// Valid as declared.
    None,
    /// A `\u` escape produced a non-ASCII character.
    Utf8,
    /// The bytes are not valid in the source encoding.
    Binary,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Unescaped {
    pub bytes: Vec<u8>,
    /// A `\u` escape produced a character outside ASCII.
    pub unicode_escape: bool,
    /// A byte escape (`\xFF`, `\377`, `\M-a`) produced a byte outside ASCII.
    pub byte_escape: bool,
    pub errors: Vec<EscapeError>,
}

impl Unescaped {
    /// Classify the literal against the source encoding.
    ///
    /// Returns the classification and whether the literal mixes a `\u`
    /// escape with non-ASCII byte escapes in a source that is not UTF-8.
    pub fn classify(&self, encoding: Encoding) -> (ForcedEncoding, bool) {
        if self.unicode_escape {
            return (ForcedEncoding::Utf8, self.byte_escape && !encoding.is_utf8());
        }
        if encoding.is_valid(&self.bytes) {
            (ForcedEncoding::None, false)
        } else {
            (ForcedEncoding::Binary, false)
        }
    }
}

/// Process the escapes in `input`.
pub fn unescape(input: &[u8], strictness: Strictness, delimiters: Delimiters) -> Unescaped {
    let mut out = Unescaped {
        bytes: Vec::with_capacity(input.len()),
        ..Unescaped::default()
    };
    let Some(first) = memchr::memchr(b'\\', input) else {
        out.bytes.extend_from_slice(input);
        return out;
    };
    out.bytes.extend_from_slice(&input[..first]);

    let mut pos = first;
    while pos < input.len() {
        let byte = input[pos];
        if byte != b'\\' {
            out.bytes.push(byte);
            pos += 1;
            continue;
        }
        let Some(&next) = input.get(pos + 1) else {
            out.bytes.push(b'\\');
            break;
        };
        pos = match strictness {
            Strictness::None => escape_none(input, pos, next, delimiters, &mut out),
            Strictness::Minimal => escape_minimal(pos, next, delimiters, &mut out),
            Strictness::All => escape_all(input, pos, next, &mut out),
        };
    }
    out
}

fn escape_none(
    input: &[u8],
    pos: usize,
    next: u8,
    delimiters: Delimiters,
    out: &mut Unescaped,
) -> usize {
    let bracket = matches!(delimiters.terminator, b')' | b']' | b'}' | b'>');
    if next == delimiters.terminator && delimiters.terminator != 0 && !bracket {
        out.bytes.push(next);
        return pos + 2;
    }
    // Escapes stay verbatim, but still decide the literal's encoding.
    match next {
        b'u' => {
            let mut scratch = Unescaped::default();
            let end = escape_unicode(input, pos, &mut scratch);
            out.unicode_escape |= scratch.unicode_escape;
            out.errors.extend(scratch.errors);
            out.bytes.extend_from_slice(&input[pos..end]);
            end
        }
        b'x' | b'0'..=b'7' => {
            let (value, end, _) = escape_byte(input, pos);
            if value.is_some_and(|v| v >= 0x80) {
                out.byte_escape = true;
            }
            out.bytes.extend_from_slice(&input[pos..end]);
            end
        }
        _ => {
            out.bytes.push(b'\\');
            out.bytes.push(next);
            pos + 2
        }
    }
}

fn escape_minimal(pos: usize, next: u8, delimiters: Delimiters, out: &mut Unescaped) -> usize {
    if next == b'\\' || delimiters.is_delimiter(next) {
        out.bytes.push(next);
    } else if delimiters.words && is_word_separator(next) {
        out.bytes.push(next);
    } else {
        out.bytes.push(b'\\');
        out.bytes.push(next);
    }
    pos + 2
}

fn escape_all(input: &[u8], pos: usize, next: u8, out: &mut Unescaped) -> usize {
    match next {
        b'u' => escape_unicode(input, pos, out),
        b'\n' => pos + 2,
        b'\r' if input.get(pos + 2) == Some(&b'\n') => pos + 3,
        b'x' | b'0'..=b'7' | b'c' | b'C' | b'M' | b'n' | b't' | b's' | b'r' | b'a' | b'b'
        | b'e' | b'f' | b'v' => {
            let (value, end, error) = escape_byte(input, pos);
            if let Some(id) = error {
                out.errors.push(error_at(id, pos, end));
            }
            if let Some(value) = value {
                out.byte_escape |= value >= 0x80;
                out.bytes.push(value);
            }
            end
        }
        _ => {
            // Any other escaped character stands for itself, including a
            // whole multi-byte character.
            let width = char_len(&input[pos + 1..]);
            out.bytes.extend_from_slice(&input[pos + 1..pos + 1 + width]);
            pos + 1 + width
        }
    }
}

/// Escapes that produce one byte. `pos` is at the backslash.
///
/// Returns the byte (if any), the offset after the escape, and an error.
fn escape_byte(input: &[u8], pos: usize) -> (Option<u8>, usize, Option<DiagnosticId>) {
    let at = |i: usize| input.get(i).copied().unwrap_or(0);
    let next = at(pos + 1);
    match next {
        b'n' => (Some(b'\n'), pos + 2, None),
        b't' => (Some(b'\t'), pos + 2, None),
        b's' => (Some(b' '), pos + 2, None),
        b'r' => (Some(b'\r'), pos + 2, None),
        b'a' => (Some(0x07), pos + 2, None),
        b'b' => (Some(0x08), pos + 2, None),
        b'e' => (Some(0x1b), pos + 2, None),
        b'f' => (Some(0x0c), pos + 2, None),
        b'v' => (Some(0x0b), pos + 2, None),
        b'0'..=b'7' => {
            let mut value: u32 = 0;
            let mut end = pos + 1;
            while end < pos + 4 && matches!(at(end), b'0'..=b'7') {
                value = value * 8 + u32::from(at(end) - b'0');
                end += 1;
            }
            (Some((value & 0xff) as u8), end, None)
        }
        b'x' => {
            let mut value: u8 = 0;
            let mut end = pos + 2;
            while end < pos + 4 && at(end).is_ascii_hexdigit() {
                value = value.wrapping_mul(16).wrapping_add(hex_value(at(end)));
                end += 1;
            }
            if end == pos + 2 {
                (None, end, Some(DiagnosticId::EscapeInvalidHex))
            } else {
                (Some(value), end, None)
            }
        }
        b'c' => control(input, pos + 2),
        b'C' => {
            if at(pos + 2) == b'-' {
                control(input, pos + 3)
            } else {
                (None, pos + 2, Some(DiagnosticId::EscapeInvalidControl))
            }
        }
        b'M' => {
            if at(pos + 2) != b'-' {
                return (None, pos + 2, Some(DiagnosticId::EscapeInvalidMeta));
            }
            let target = pos + 3;
            match at(target) {
                0 if target >= input.len() => {
                    (None, target, Some(DiagnosticId::EscapeInvalidMeta))
                }
                b'\\' => {
                    let (value, end, error) = escape_byte(input, target);
                    (value.map(|v| v | 0x80), end, error)
                }
                byte => (Some(byte | 0x80), target + 1, None),
            }
        }
        _ => (None, pos + 2, Some(DiagnosticId::InvalidEscape)),
    }
}

/// Body of `\cx` / `\C-x` starting at `target`.
fn control(input: &[u8], target: usize) -> (Option<u8>, usize, Option<DiagnosticId>) {
    match input.get(target).copied() {
        None => (None, target, Some(DiagnosticId::EscapeInvalidControl)),
        Some(b'?') => (Some(0x7f), target + 1, None),
        Some(b'\\') => {
            let (value, end, error) = escape_byte(input, target);
            (value.map(|v| v & 0x9f), end, error)
        }
        Some(byte) => (Some(byte & 0x9f), target + 1, None),
    }
}

/// `\uXXXX` and `\u{X Y Z}`. `pos` is at the backslash.
fn escape_unicode(input: &[u8], pos: usize, out: &mut Unescaped) -> usize {
    let at = |i: usize| input.get(i).copied().unwrap_or(0);
    let start = pos + 2;
    if at(start) == b'{' {
        let mut cursor = start + 1;
        loop {
            while matches!(at(cursor), b' ' | b'\t') {
                cursor += 1;
            }
            if at(cursor) == b'}' {
                return cursor + 1;
            }
            let digits_start = cursor;
            while cursor < input.len() && at(cursor).is_ascii_hexdigit() {
                cursor += 1;
            }
            let digits = &input[digits_start..cursor];
            if digits.is_empty() || digits.len() > 6 {
                out.errors.push(error_at(DiagnosticId::EscapeInvalidUnicode, pos, cursor.max(start)));
                // Skip to the closing brace so the rest of the literal survives.
                let end = input[cursor..]
                    .iter()
                    .position(|&b| b == b'}')
                    .map_or(input.len(), |i| cursor + i + 1);
                return end;
            }
            push_codepoint(parse_hex(digits), pos, cursor, out);
        }
    }
    let end = start + 4;
    if end <= input.len() && input[start..end].iter().all(u8::is_ascii_hexdigit) {
        push_codepoint(parse_hex(&input[start..end]), pos, end, out);
        end
    } else {
        let mut end = start;
        while end < input.len() && end < start + 4 && input[end].is_ascii_hexdigit() {
            end += 1;
        }
        out.errors.push(error_at(DiagnosticId::EscapeInvalidUnicode, pos, end));
        end
    }
}

fn push_codepoint(value: u32, start: usize, end: usize, out: &mut Unescaped) {
    match char::from_u32(value) {
        Some(ch) => {
            if !ch.is_ascii() {
                out.unicode_escape = true;
            }
            let mut buf = [0u8; 4];
            out.bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        }
        None => out.errors.push(error_at(DiagnosticId::EscapeInvalidUnicode, start, end)),
    }
}

fn parse_hex(digits: &[u8]) -> u32 {
    digits
        .iter()
        .fold(0u32, |acc, &d| acc.saturating_mul(16).saturating_add(u32::from(hex_value(d))))
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

/// Width of the UTF-8 sequence starting `bytes`, or 1 for stray bytes.
fn char_len(bytes: &[u8]) -> usize {
    let width = match bytes.first() {
        Some(0xC2..=0xDF) => 2,
        Some(0xE0..=0xEF) => 3,
        Some(0xF0..=0xF4) => 4,
        _ => 1,
    };
    if bytes.len() >= width && std::str::from_utf8(&bytes[..width]).is_ok() {
        width
    } else {
        1
    }
}

fn is_word_separator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "literal bodies are slices of a source capped at u32::MAX bytes"
)]
fn error_at(id: DiagnosticId, start: usize, end: usize) -> EscapeError {
    EscapeError {
        id,
        start: start as u32,
        end: end as u32,
    }
}

#[cfg(test)]
mod tests;
