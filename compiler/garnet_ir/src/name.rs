//! Identifier and constant names.
//!
//! Names are stored as raw bytes because source files need not be UTF-8;
//! short names (the overwhelming majority) stay inline.

use smallvec::SmallVec;
use std::fmt;

/// An identifier, constant, method, or variable name as raw source bytes.
#[derive(Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct Name(SmallVec<[u8; 16]>);

impl Name {
    pub fn new(bytes: &[u8]) -> Self {
        Name(SmallVec::from_slice(bytes))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The name as UTF-8, replacing invalid sequences.
    pub fn to_string_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value.as_bytes())
    }
}

impl From<&[u8]> for Name {
    fn from(value: &[u8]) -> Self {
        Name::new(value)
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.to_string_lossy())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
