//! Decode failures.
//!
//! Every failure is fatal for the buffer being read: the decoders never
//! hand back a partially rebuilt tree or token stream.

use garnet_ir::{FieldError, Location, LocationError};
use garnet_parse::ConfigError;
use thiserror::Error;

use crate::buffer::Short;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("bad magic tag {found:?}, expected {expected:?}")]
    BadMagic { expected: [u8; 4], found: [u8; 4] },

    #[error("unsupported format version {}.{}.{}", found[0], found[1], found[2])]
    UnsupportedVersion { found: [u8; 3] },

    #[error("buffer truncated: needed {needed} more bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("unknown node tag {tag} at offset {offset}")]
    UnknownNodeType { tag: u8, offset: usize },

    #[error("unknown token tag {tag} at offset {offset}")]
    UnknownTokenKind { tag: u8, offset: usize },

    #[error("unknown comment kind {tag} at offset {offset}")]
    UnknownCommentKind { tag: u8, offset: usize },

    #[error("unknown diagnostic id {id} at offset {offset}")]
    UnknownDiagnostic { id: u16, offset: usize },

    #[error("invalid {field} byte {value:#04x} at offset {offset}")]
    InvalidByte {
        field: &'static str,
        value: u8,
        offset: usize,
    },

    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),

    #[error("{field} at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str, offset: usize },

    #[error("invalid location at offset {offset}: {source}")]
    Location {
        offset: usize,
        #[source]
        source: LocationError,
    },

    #[error("location {location} at offset {offset} is outside the {len}-byte source")]
    OutOfBounds {
        location: Location,
        offset: usize,
        len: usize,
    },

    #[error("{node} record at offset {offset} declares {declared} bytes but spans {actual}")]
    LengthMismatch {
        node: &'static str,
        offset: usize,
        declared: u64,
        actual: u64,
    },

    #[error("malformed {node} record at offset {offset}: {source}")]
    Field {
        node: &'static str,
        offset: usize,
        #[source]
        source: FieldError,
    },

    #[error("{count} trailing bytes after the payload")]
    TrailingBytes { count: usize },
}

impl From<Short> for DecodeError {
    fn from(short: Short) -> Self {
        DecodeError::Truncated {
            offset: short.offset,
            needed: short.needed,
        }
    }
}

impl From<Short> for ConfigError {
    fn from(short: Short) -> Self {
        ConfigError::Truncated {
            offset: short.offset,
            needed: short.needed,
        }
    }
}
