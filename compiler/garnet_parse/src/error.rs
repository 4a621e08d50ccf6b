//! Configuration errors.
//!
//! Syntax errors are never `Err`s; they are diagnostics on the parse
//! result. A [`ConfigError`] means the options themselves are unusable and
//! no parse was attempted.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid version: {0}")]
    UnknownVersion(String),

    #[error("invalid command-line flag: `{0}`")]
    UnknownCommandLineFlag(char),

    #[error("invalid forwarding parameter: `{0}`")]
    UnknownForwarding(String),

    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("options payload truncated: needed {needed} more bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("options payload has a non-zero reserved byte at offset {offset}")]
    Reserved { offset: usize },

    #[error("options payload has an invalid {field} value {value:#04x} at offset {offset}")]
    InvalidByte {
        field: &'static str,
        value: u8,
        offset: usize,
    },

    #[error("options payload has {count} trailing bytes")]
    TrailingBytes { count: usize },
}
