//! Source encodings the parser can be told about.
//!
//! Only the properties parsing needs are modelled: the canonical name, the
//! aliases accepted by magic comments and options, and how wide a character
//! starting at a given byte is.

use std::fmt;

/// A source encoding.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    UsAscii,
    /// Binary; every byte is a character.
    Ascii8Bit,
    /// ISO-8859-n for n in 1..=16 (there is no 12).
    Iso8859(u8),
    Windows1250,
    Windows1251,
    Windows1252,
}

impl Encoding {
    /// Look up an encoding by name or alias, ignoring ASCII case.
    ///
    /// Emacs line-ending suffixes (`-unix`, `-dos`, `-mac`) are accepted.
    pub fn find(name: &[u8]) -> Option<Encoding> {
        let lower = name.to_ascii_lowercase();
        let mut name = lower.as_slice();
        for suffix in [&b"-unix"[..], b"-dos", b"-mac"] {
            if let Some(stripped) = name.strip_suffix(suffix) {
                if !stripped.is_empty() {
                    name = stripped;
                    break;
                }
            }
        }
        let encoding = match name {
            b"utf-8" | b"utf8" | b"utf8-mac" | b"utf-8-hfs" | b"locale" | b"external"
            | b"filesystem" => Encoding::Utf8,
            b"us-ascii" | b"ascii" | b"ansi_x3.4-1968" | b"646" => Encoding::UsAscii,
            b"ascii-8bit" | b"binary" => Encoding::Ascii8Bit,
            b"windows-1250" | b"cp1250" => Encoding::Windows1250,
            b"windows-1251" | b"cp1251" => Encoding::Windows1251,
            b"windows-1252" | b"cp1252" => Encoding::Windows1252,
            _ => {
                let digits = name
                    .strip_prefix(b"iso-8859-")
                    .or_else(|| name.strip_prefix(b"iso8859-"))?;
                let n: u8 = std::str::from_utf8(digits).ok()?.parse().ok()?;
                if !(1..=16).contains(&n) || n == 12 {
                    return None;
                }
                Encoding::Iso8859(n)
            }
        };
        Some(encoding)
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::UsAscii => "US-ASCII",
            Encoding::Ascii8Bit => "ASCII-8BIT",
            Encoding::Iso8859(n) => ISO_8859_NAMES
                .get(usize::from(n))
                .copied()
                .unwrap_or("ISO-8859-1"),
            Encoding::Windows1250 => "Windows-1250",
            Encoding::Windows1251 => "Windows-1251",
            Encoding::Windows1252 => "Windows-1252",
        }
    }

    pub fn is_utf8(self) -> bool {
        self == Encoding::Utf8
    }

    /// Whether every byte is a character, so nothing can be invalid.
    pub fn is_single_byte(self) -> bool {
        !matches!(self, Encoding::Utf8 | Encoding::UsAscii)
    }

    /// Width of the character starting at `bytes[0]`, or `None` if the
    /// bytes do not form a valid character in this encoding.
    pub fn char_width(self, bytes: &[u8]) -> Option<usize> {
        let &first = bytes.first()?;
        if first < 0x80 {
            return Some(1);
        }
        match self {
            Encoding::UsAscii => None,
            Encoding::Utf8 => {
                let width = match first {
                    0xC2..=0xDF => 2,
                    0xE0..=0xEF => 3,
                    0xF0..=0xF4 => 4,
                    _ => return None,
                };
                let chunk = bytes.get(..width)?;
                std::str::from_utf8(chunk).ok().map(|_| width)
            }
            _ => Some(1),
        }
    }

    /// Whether `bytes` is entirely valid in this encoding.
    pub fn is_valid(self, bytes: &[u8]) -> bool {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes).is_ok(),
            Encoding::UsAscii => bytes.is_ascii(),
            _ => true,
        }
    }

    /// Width of the identifier character starting at `bytes[0]`, if it is one.
    /// Any valid non-ASCII character counts.
    pub fn ident_char_width(self, bytes: &[u8]) -> Option<usize> {
        let &first = bytes.first()?;
        if first.is_ascii_alphanumeric() || first == b'_' {
            return Some(1);
        }
        if first < 0x80 {
            return None;
        }
        self.char_width(bytes)
    }
}

const ISO_8859_NAMES: [&str; 17] = [
    "",
    "ISO-8859-1",
    "ISO-8859-2",
    "ISO-8859-3",
    "ISO-8859-4",
    "ISO-8859-5",
    "ISO-8859-6",
    "ISO-8859-7",
    "ISO-8859-8",
    "ISO-8859-9",
    "ISO-8859-10",
    "ISO-8859-11",
    "",
    "ISO-8859-13",
    "ISO-8859-14",
    "ISO-8859-15",
    "ISO-8859-16",
];

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;
