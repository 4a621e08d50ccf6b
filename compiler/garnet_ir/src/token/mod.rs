//! Token types shared by the lexer, parser, and token-stream codec.

mod kind;

pub use kind::TokenKind;

use std::fmt;

use crate::Location;

/// A token with its location and the raw source bytes it covers.
///
/// Tokens are immutable once the lexer hands them out. `raw` always equals
/// `source[location.start..location.end]`; the token codec relies on that to
/// drop the text from the wire and re-slice it on decode.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub location: Location,
    pub raw: &'a [u8],
}

impl<'a> Token<'a> {
    #[inline]
    pub fn new(kind: TokenKind, location: Location, raw: &'a [u8]) -> Self {
        Token {
            kind,
            location,
            raw,
        }
    }

    /// Rebind the token to a different buffer holding the same bytes.
    ///
    /// Returns `None` when the location falls outside `source`.
    pub fn rebind<'b>(&self, source: &'b [u8]) -> Option<Token<'b>> {
        Some(Token {
            kind: self.kind,
            location: self.location,
            raw: self.location.slice(source)?,
        })
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:?} @ {}",
            self.kind,
            String::from_utf8_lossy(self.raw),
            self.location
        )
    }
}

#[cfg(test)]
mod tests;
